//! # Analytics Datasets
//!
//! Chart-ready series derived from a calculation: quantities per packaging
//! level, weight and cost breakdowns, utilization against targets, and a
//! cumulative production curve. Drawing is left to the consumer.

use serde::{Deserialize, Serialize};

use super::packaging::{CalculationResults, ProductData};
use crate::units::{Kilograms, Tonnes};

/// Target pallet footprint utilization (%)
pub const PALLET_UTILIZATION_TARGET: f64 = 85.0;
/// Target box volume utilization (%)
pub const BOX_UTILIZATION_TARGET: f64 = 80.0;
/// Longest production curve emitted; longer schedules are sampled
pub const MAX_SERIES_POINTS: u64 = 366;

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: f64,
}

impl DataPoint {
    fn new(name: &str, value: f64) -> Self {
        DataPoint {
            name: name.to_string(),
            value,
        }
    }
}

/// Actual utilization next to its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetric {
    pub name: String,
    pub value: f64,
    pub target: f64,
}

impl EfficiencyMetric {
    pub fn meets_target(&self) -> bool {
        self.value >= self.target
    }
}

/// One day of the production curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPoint {
    pub day: u64,
    pub cumulative: f64,
    pub daily: f64,
    pub target: f64,
}

/// Weight figures beyond the per-level rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub total: Tonnes,
    pub average_per_pallet: Kilograms,
    /// Share of box weight that is product rather than packaging (%)
    pub product_weight_ratio: f64,
    /// Shipped weight per unit including packaging
    pub per_unit: Kilograms,
}

/// Cost figures beyond the per-level rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Product and box share of one box's cost
    pub per_box_breakdown: Vec<DataPoint>,
    /// Box cost as a share of the cost per box (%)
    pub packaging_cost_ratio: f64,
    /// Cost at each packaging level
    pub per_level: Vec<DataPoint>,
}

/// All datasets for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub quantities: Vec<DataPoint>,
    pub weight_distribution: Vec<DataPoint>,
    pub weight: WeightSummary,
    pub cost: CostSummary,
    pub efficiency: Vec<EfficiencyMetric>,
    pub production: Vec<ProductionPoint>,
}

impl AnalyticsReport {
    pub fn build(data: &ProductData, results: &CalculationResults) -> Self {
        AnalyticsReport {
            quantities: quantities(results),
            weight_distribution: weight_distribution(results),
            weight: weight_summary(data, results),
            cost: cost_summary(data, results),
            efficiency: efficiency(results),
            production: production_series(results),
        }
    }
}

fn quantities(results: &CalculationResults) -> Vec<DataPoint> {
    vec![
        DataPoint::new("Units per Box", results.units_per_box),
        DataPoint::new("Boxes per Layer", results.boxes_per_pallet_layer),
        DataPoint::new("Layers per Pallet", results.layers_per_pallet),
        DataPoint::new("Units per Pallet", results.total_units_per_pallet),
    ]
}

fn weight_distribution(results: &CalculationResults) -> Vec<DataPoint> {
    vec![
        DataPoint::new("Per Box", results.weight_per_box),
        DataPoint::new("Per Layer", results.weight_per_pallet_layer),
        DataPoint::new("Per Pallet", results.weight_per_pallet),
    ]
}

fn weight_summary(data: &ProductData, results: &CalculationResults) -> WeightSummary {
    let box_weight = data.box_weight.unwrap_or(0.0);
    WeightSummary {
        total: Kilograms(results.total_weight).into(),
        average_per_pallet: Kilograms(results.total_weight / results.total_pallets_needed),
        product_weight_ratio: data.product_weight / (data.product_weight + box_weight) * 100.0,
        per_unit: Kilograms(results.total_weight / results.total_units_needed()),
    }
}

fn cost_summary(data: &ProductData, results: &CalculationResults) -> CostSummary {
    let box_cost = data.box_cost.unwrap_or(0.0);
    CostSummary {
        per_box_breakdown: vec![
            DataPoint::new("Product Cost", data.product_cost * results.units_per_box),
            DataPoint::new("Box Cost", box_cost),
        ],
        packaging_cost_ratio: box_cost / results.cost_per_box * 100.0,
        per_level: vec![
            DataPoint::new("Per Box", results.cost_per_box),
            DataPoint::new("Per Layer", results.cost_per_pallet_layer),
            DataPoint::new("Per Pallet", results.cost_per_pallet),
        ],
    }
}

fn efficiency(results: &CalculationResults) -> Vec<EfficiencyMetric> {
    vec![
        EfficiencyMetric {
            name: "Pallet Utilization".to_string(),
            value: results.pallet_utilization,
            target: PALLET_UTILIZATION_TARGET,
        },
        EfficiencyMetric {
            name: "Box Utilization".to_string(),
            value: results.box_utilization,
            target: BOX_UTILIZATION_TARGET,
        },
    ]
}

/// Cumulative output per day over `ceil(estimatedDays)` days.
///
/// Schedules longer than [`MAX_SERIES_POINTS`] days are sampled at an even
/// stride; the last day is always included. Empty when `estimatedDays` is
/// not a finite positive number.
fn production_series(results: &CalculationResults) -> Vec<ProductionPoint> {
    if !results.estimated_days.is_finite() || results.estimated_days <= 0.0 {
        return Vec::new();
    }

    let target = results.total_units_needed();
    let days = results.estimated_days.ceil() as u64;
    let stride = days.div_ceil(MAX_SERIES_POINTS).max(1);

    let point = |day: u64| {
        let d = day as f64;
        ProductionPoint {
            day,
            cumulative: (d * results.daily_production).min(target),
            daily: if d <= results.estimated_days {
                results.daily_production
            } else {
                0.0
            },
            target,
        }
    };

    let mut series: Vec<ProductionPoint> = (1..=days).step_by(stride as usize).map(point).collect();
    if series.last().is_some_and(|p| p.day != days) {
        series.push(point(days));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::packaging::calculate;

    fn reference() -> (ProductData, CalculationResults) {
        let input = ProductData {
            box_width: Some(300.0),
            box_length: Some(450.0),
            box_height: Some(150.0),
            box_weight: Some(0.1),
            box_cost: Some(1.2),
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        };
        let results = calculate(&input).unwrap();
        (input, results)
    }

    #[test]
    fn test_quantities_follow_results() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);
        let values: Vec<f64> = report.quantities.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![27.0, 4.0, 12.0, 1296.0]);
    }

    #[test]
    fn test_weight_summary() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);

        assert!((report.weight.total.0 - 0.6528).abs() < 1e-9);
        assert!((report.weight.average_per_pallet.0 - 652.8).abs() < 1e-9);
        // 0.5 / 0.6
        assert!((report.weight.product_weight_ratio - 83.333_333_333).abs() < 1e-6);
        assert!((report.weight.per_unit.0 - 652.8 / 1296.0).abs() < 1e-12);
    }

    #[test]
    fn test_cost_breakdown() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);

        assert_eq!(report.cost.per_box_breakdown[0].value, 12.5 * 27.0);
        assert_eq!(report.cost.per_box_breakdown[1].value, 1.2);
        assert!((report.cost.packaging_cost_ratio - 1.2 / 338.7 * 100.0).abs() < 1e-9);
        assert_eq!(report.cost.per_level.len(), 3);
    }

    #[test]
    fn test_efficiency_targets() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);
        assert!(!report.efficiency[0].meets_target());
        assert!(report.efficiency[1].meets_target());
        assert_eq!(report.efficiency[0].target, 85.0);
        assert_eq!(report.efficiency[1].target, 80.0);
    }

    #[test]
    fn test_production_series() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);

        // estimatedDays = 4.2 -> 5 points
        assert_eq!(report.production.len(), 5);
        assert_eq!(report.production[0].cumulative, 500.0);
        assert_eq!(report.production[2].cumulative, 1296.0);
        assert_eq!(report.production[3].daily, 500.0);
        assert_eq!(report.production[4].daily, 0.0);
        assert!(report.production.iter().all(|p| p.target == 1296.0));
    }

    #[test]
    fn test_long_schedule_is_sampled() {
        // 1000 pallets at 0.01 units/day: 60,480,000 estimated days
        let input = ProductData {
            target_pallets: Some(1000),
            production_speed: 0.01,
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        };
        let results = calculate(&input).unwrap();
        assert_eq!(results.estimated_days, 60_480_000.0);

        let report = AnalyticsReport::build(&input, &results);
        let series = &report.production;
        assert!(series.len() as u64 <= MAX_SERIES_POINTS + 1);
        assert_eq!(series[0].day, 1);

        let last = series.last().unwrap();
        assert_eq!(last.day, 60_480_000);
        assert_eq!(last.cumulative, last.target);
        assert!(series.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn test_short_schedule_keeps_every_day() {
        let (input, results) = reference();
        let report = AnalyticsReport::build(&input, &results);
        let days: Vec<u64> = report.production.iter().map(|p| p.day).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5]);
    }
}
