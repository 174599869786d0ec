//! # Production Timeline
//!
//! Turns the engine's `estimatedDays` into calendar dates, production phases
//! and a first-week milestone table, and checks the result against the
//! optional deadline.
//!
//! The start date is passed in rather than read from the clock so the
//! projection stays a pure function of its inputs.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pack_core::calculations::packaging::{calculate, ProductData};
//! use pack_core::calculations::timeline::estimate_timeline;
//!
//! let input = ProductData {
//!     target_products: Some(10_000),
//!     deadline: NaiveDate::from_ymd_opt(2026, 11, 1),
//!     ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
//! };
//! let results = calculate(&input).unwrap();
//! let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let timeline = estimate_timeline(&input, &results, start).unwrap();
//!
//! println!("Done by {}", timeline.completion_date);
//! ```

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::packaging::{CalculationResults, ProductData};
use crate::errors::{CalcError, CalcResult};

/// Number of leading days covered by the milestone table
const MILESTONE_DAYS: u64 = 7;

/// One block of the production schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPhase {
    pub name: String,
    /// Calendar days
    pub duration_days: u64,
    /// Nominal share of the schedule (%)
    pub share_percent: f64,
    /// Units produced during the phase
    pub units: f64,
}

/// Cumulative progress at the end of a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMilestone {
    /// 1-based day number
    pub day: u64,
    pub date: NaiveDate,
    pub cumulative_units: f64,
    pub progress_percent: f64,
    /// Pallets' worth of units produced so far (fractional)
    pub pallet_progress: f64,
    pub is_working_day: bool,
}

/// Dated production schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEstimate {
    pub start_date: NaiveDate,
    pub completion_date: NaiveDate,
    /// `ceil(estimatedDays)`
    pub calendar_days: u64,
    /// Calendar days scaled back to working days
    pub working_days_equivalent: f64,
    pub daily_production: f64,
    pub total_units_needed: f64,
    pub deadline: Option<NaiveDate>,
    /// Days from start to deadline
    pub days_to_deadline: Option<i64>,
    /// Days between completion and deadline (negative when late)
    pub slack_days: Option<i64>,
    pub deadline_conflict: bool,
    pub phases: Vec<ProductionPhase>,
    pub milestones: Vec<DailyMilestone>,
}

impl TimelineEstimate {
    /// True when a deadline is set and the schedule meets it
    pub fn meets_deadline(&self) -> bool {
        self.deadline.is_some() && !self.deadline_conflict
    }
}

/// Build the dated schedule for a calculation.
///
/// # Returns
///
/// * `Ok(TimelineEstimate)` - Dates, phases and milestones
/// * `Err(CalcError::CalculationFailed)` - `estimatedDays` is not a finite,
///   non-negative number (unvalidated input) or the dates overflow
pub fn estimate_timeline(
    data: &ProductData,
    results: &CalculationResults,
    start: NaiveDate,
) -> CalcResult<TimelineEstimate> {
    let estimated = results.estimated_days;
    if !estimated.is_finite() || estimated < 0.0 {
        return Err(CalcError::calculation_failed(
            "timeline",
            format!("estimatedDays must be a finite non-negative number, got {}", estimated),
        ));
    }

    let calendar_days = estimated.ceil() as u64;
    let completion_date = add_days(start, calendar_days)?;
    let total_units_needed = results.total_units_needed();
    let working_days_equivalent = calendar_days as f64 / 7.0 * data.working_days as f64;

    let days_to_deadline = data.deadline.map(|d| (d - start).num_days());
    let slack_days = data.deadline.map(|d| (d - completion_date).num_days());
    let deadline_conflict = slack_days.is_some_and(|slack| slack < 0);

    let phases = production_phases(estimated, total_units_needed);
    let milestones = daily_milestones(data, results, start, calendar_days)?;

    if deadline_conflict {
        tracing::warn!(%completion_date, deadline = ?data.deadline, "schedule misses deadline");
    }

    Ok(TimelineEstimate {
        start_date: start,
        completion_date,
        calendar_days,
        working_days_equivalent,
        daily_production: results.daily_production,
        total_units_needed,
        deadline: data.deadline,
        days_to_deadline,
        slack_days,
        deadline_conflict,
        phases,
        milestones,
    })
}

fn production_phases(estimated_days: f64, total_units: f64) -> Vec<ProductionPhase> {
    let bulk_units = (total_units * 0.4).floor();
    let phase = |name: &str, duration: f64, share: f64, units: f64| ProductionPhase {
        name: name.to_string(),
        duration_days: duration as u64,
        share_percent: share,
        units,
    };

    vec![
        phase("Production Setup", 1.0, 5.0, 0.0),
        phase("Production Phase 1", (estimated_days * 0.4).ceil(), 40.0, bulk_units),
        phase("Production Phase 2", (estimated_days * 0.4).ceil(), 40.0, bulk_units),
        phase(
            "Final Production & QC",
            (estimated_days * 0.2).ceil(),
            15.0,
            total_units - (total_units * 0.8).floor(),
        ),
    ]
}

fn daily_milestones(
    data: &ProductData,
    results: &CalculationResults,
    start: NaiveDate,
    calendar_days: u64,
) -> CalcResult<Vec<DailyMilestone>> {
    let total_units = results.total_units_needed();

    (0..calendar_days.min(MILESTONE_DAYS))
        .map(|i| {
            let day = i + 1;
            let cumulative_units = (day as f64 * results.daily_production).min(total_units);
            Ok(DailyMilestone {
                day,
                date: add_days(start, i)?,
                cumulative_units,
                progress_percent: cumulative_units / total_units * 100.0,
                pallet_progress: cumulative_units / results.total_units_per_pallet,
                is_working_day: i % 7 < u64::from(data.working_days),
            })
        })
        .collect()
}

fn add_days(date: NaiveDate, days: u64) -> CalcResult<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| {
        CalcError::calculation_failed(
            "timeline",
            format!("{} + {} days is out of range", date, days),
        )
    })
}
