//! # Packaging Calculations
//!
//! The packaging engine and the projections built on top of its results.
//! The engine follows the pattern:
//!
//! - `ProductData` - Input parameters (JSON-serializable)
//! - `CalculationResults` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<CalculationResults, CalcError>` - Validated calculation
//!
//! Projections take the input together with its results and never re-run the
//! engine.
//!
//! ## Available Calculations
//!
//! - [`packaging`] - Units per box, boxes per layer, layers per pallet, totals
//! - [`timeline`] - Dated production schedule and deadline check
//! - [`truck`] - Pallets per truck and trucks required
//! - [`insights`] - Efficiency ratings and recommendations
//! - [`analytics`] - Chart-ready breakdowns

pub mod analytics;
pub mod insights;
pub mod packaging;
pub mod timeline;
pub mod truck;

// Re-export commonly used types
pub use analytics::AnalyticsReport;
pub use insights::{insights, rate, EfficiencyRating, EfficiencySummary, Insight};
pub use packaging::{
    calculate, compute, CalculationResults, DemandTarget, Dimensions, ProductData,
    ProductDataUpdate,
};
pub use timeline::{estimate_timeline, TimelineEstimate};
pub use truck::{plan_truck_load, TruckBed, TruckLoadPlan};
