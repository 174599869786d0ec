//! Terminal rendering for calculation output.

use chrono::NaiveDate;
use serde::Serialize;

use pack_core::calculations::{
    estimate_timeline, insights, plan_truck_load, rate, AnalyticsReport, CalculationResults,
    EfficiencySummary, Insight, ProductData, TimelineEstimate, TruckBed, TruckLoadPlan,
};
use pack_core::errors::CalcResult;
use pack_core::store::SavedConfiguration;

const RULE: &str = "═══════════════════════════════════════";

/// Everything derived from one input, as printed or dumped to JSON.
#[derive(Debug, Serialize)]
pub struct CalculationReport {
    pub input: ProductData,
    pub results: CalculationResults,
    pub efficiency: EfficiencySummary,
    pub insights: Vec<Insight>,
    /// Absent when the schedule dates fall outside the calendar
    pub timeline: Option<TimelineEstimate>,
    /// Absent when no pallet fits the truck bed
    pub truck: Option<TruckLoadPlan>,
    pub analytics: AnalyticsReport,
}

impl CalculationReport {
    /// Bundle the projections for validated results.
    ///
    /// A projection that fails is logged and left out; the engine results are
    /// always reported.
    pub fn build(
        input: ProductData,
        results: CalculationResults,
        start: NaiveDate,
        bed: &TruckBed,
    ) -> Self {
        let timeline = projection("timeline", estimate_timeline(&input, &results, start));
        let truck = projection("truck load", plan_truck_load(&input, &results, bed));
        CalculationReport {
            efficiency: rate(&results),
            insights: insights(&input, &results),
            analytics: AnalyticsReport::build(&input, &results),
            timeline,
            truck,
            results,
            input,
        }
    }

    pub fn print(&self) {
        let r = &self.results;
        let c = self.input.container_dimensions();

        println!("{}", RULE);
        println!("  PACKAGING CALCULATION RESULTS");
        println!("{}", RULE);
        println!();
        println!("Input:");
        println!(
            "  Product:  {:.0} x {:.0} x {:.0} mm, {:.3} kg",
            self.input.product_width,
            self.input.product_length,
            self.input.product_height,
            self.input.product_weight
        );
        match self.input.box_dimensions() {
            Some(_) => println!("  Box:      {:.0} x {:.0} x {:.0} mm", c.width, c.length, c.height),
            None => println!("  Box:      none (product is the container)"),
        }
        println!(
            "  Pallet:   {:.0} x {:.0} mm, max {:.0} mm",
            self.input.pallet_width,
            self.input.pallet_length,
            self.input.effective_pallet_max_height()
        );
        println!();
        println!("Quantities:");
        println!("  Units per box:      {:.0}", r.units_per_box);
        println!("  Boxes per layer:    {:.0}", r.boxes_per_pallet_layer);
        println!("  Layers per pallet:  {:.0}", r.layers_per_pallet);
        println!("  Units per pallet:   {:.0}", r.total_units_per_pallet);
        println!();
        println!("Weight / Cost:");
        println!("  Per box:     {:>10.2} kg  {:>12.2}", r.weight_per_box, r.cost_per_box);
        println!("  Per layer:   {:>10.2} kg  {:>12.2}", r.weight_per_pallet_layer, r.cost_per_pallet_layer);
        println!("  Per pallet:  {:>10.2} kg  {:>12.2}", r.weight_per_pallet, r.cost_per_pallet);
        println!();
        println!("Demand:");
        println!("  Pallets:     {:.0}", r.total_pallets_needed);
        println!("  Boxes:       {:.0}", r.total_boxes_needed);
        println!("  Units:       {:.0}", r.total_units_needed());
        println!("  Weight:      {:.2} kg", r.total_weight);
        println!("  Cost:        {:.2}", r.total_cost);
        println!();
        println!("Efficiency:");
        println!(
            "  Pallet: {:>6.1}% {}",
            r.pallet_utilization,
            self.efficiency.pallet.display_name()
        );
        println!("  Box:    {:>6.1}% {}", r.box_utilization, self.efficiency.r#box.display_name());
        for insight in &self.insights {
            let tag = if insight.is_warning() { "[WARN]" } else { "[OK]" };
            println!("  {} {}", tag, insight.message());
        }
        println!();
        self.print_timeline();
        println!();
        self.print_truck();
        println!();
        println!("{}", RULE);
    }

    fn print_timeline(&self) {
        println!("Timeline:");
        let Some(t) = &self.timeline else {
            println!("  not available");
            return;
        };
        println!(
            "  {} -> {} ({} calendar days at {:.0} units/day)",
            t.start_date, t.completion_date, t.calendar_days, t.daily_production
        );
        for phase in &t.phases {
            println!(
                "  {:<24} {:>3} d  {:>8.0} units",
                phase.name, phase.duration_days, phase.units
            );
        }
        if let (Some(deadline), Some(slack)) = (t.deadline, t.slack_days) {
            let status = if t.deadline_conflict { "[LATE]" } else { "[OK]" };
            println!("  Deadline {}: {} days slack {}", deadline, slack, status);
        }
    }

    fn print_truck(&self) {
        println!("Truck:");
        let Some(p) = &self.truck else {
            println!("  pallet does not fit the truck bed");
            return;
        };
        println!(
            "  {} x {} = {} pallets per truck, {} truck(s) required",
            p.pallets_across, p.pallets_along, p.capacity, p.trucks_required
        );
        println!("  First truck: {} pallets, {:.1}% of slots", p.pallets_loaded, p.utilization);
    }
}

fn projection<T>(name: &str, outcome: CalcResult<T>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(projection = name, error = %e, "projection skipped");
            None
        }
    }
}

/// One saved configuration as a compact block.
pub fn print_configuration(saved: &SavedConfiguration) {
    let r = &saved.results;
    println!("{}", RULE);
    println!("  {} ({})", saved.configuration_name, saved.user_id);
    println!("{}", RULE);
    println!("  Updated:           {}", saved.updated.format("%Y-%m-%d %H:%M"));
    if let Some(notes) = &saved.notes {
        println!("  Notes:             {}", notes);
    }
    println!("  Units per box:     {:.0}", r.units_per_box);
    println!("  Units per pallet:  {:.0}", r.total_units_per_pallet);
    println!("  Pallets needed:    {:.0}", r.total_pallets_needed);
    println!("  Total cost:        {:.2}", r.total_cost);
    println!("  Estimated days:    {:.1}", r.estimated_days);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pack_core::calculations::calculate;

    #[test]
    fn test_report_json_shape() {
        let input = ProductData {
            box_width: Some(300.0),
            box_length: Some(450.0),
            box_height: Some(150.0),
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        };
        let results = calculate(&input).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let report = CalculationReport::build(input, results, start, &TruckBed::default());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"]["unitsPerBox"], 27.0);
        assert_eq!(json["truck"]["capacity"], 14);
        assert_eq!(json["timeline"]["calendar_days"], 5);
        assert_eq!(json["insights"][0]["kind"], "LowPalletUtilization");
    }

    #[test]
    fn test_oversized_pallet_still_reports_results() {
        let input = ProductData {
            pallet_width: 2500.0,
            pallet_length: 1200.0,
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        };
        let results = calculate(&input).unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let report = CalculationReport::build(input, results, start, &TruckBed::default());

        assert!(report.truck.is_none());
        assert!(report.timeline.is_some());
        assert_eq!(report.results.boxes_per_pallet_layer, 200.0);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["truck"].is_null());
        assert_eq!(json["results"]["layersPerPallet"], 36.0);
    }
}
