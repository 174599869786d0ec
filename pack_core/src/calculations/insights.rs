//! # Efficiency Insights
//!
//! Rates the utilization figures and lists recommendations for improving a
//! packaging configuration.

use serde::{Deserialize, Serialize};

use super::packaging::{CalculationResults, ProductData};

/// Utilization at or above this is rated Excellent (%)
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// Utilization at or above this is rated Good (%)
pub const GOOD_THRESHOLD: f64 = 60.0;
/// Box utilization below this triggers the oversized-box recommendation (%)
pub const LOW_BOX_UTILIZATION: f64 = 70.0;

/// Qualitative rating of a utilization percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Poor,
}

impl EfficiencyRating {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            EfficiencyRating::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            EfficiencyRating::Good
        } else {
            EfficiencyRating::Poor
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EfficiencyRating::Excellent => "Excellent",
            EfficiencyRating::Good => "Good",
            EfficiencyRating::Poor => "Poor",
        }
    }
}

/// A single recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Insight {
    /// Containers leave too much of the pallet footprint empty
    LowPalletUtilization { utilization: f64 },
    /// The box is too large for the products it holds
    LowBoxUtilization { utilization: f64 },
    /// Both pallet and box are well filled
    OptimalPacking,
    /// Only one layer fits under the stack height limit
    SingleLayer,
}

impl Insight {
    /// Human-readable advice
    pub fn message(&self) -> String {
        match self {
            Insight::LowPalletUtilization { utilization } => format!(
                "Low pallet utilization ({:.1}%): consider adjusting box dimensions or product arrangement to better fill the pallet space.",
                utilization
            ),
            Insight::LowBoxUtilization { utilization } => format!(
                "Low box utilization ({:.1}%): the current box size is too large for the products. Consider smaller box dimensions.",
                utilization
            ),
            Insight::OptimalPacking => {
                "Excellent packing efficiency: the current configuration makes optimal use of space.".to_string()
            }
            Insight::SingleLayer => {
                "Single layer stacking: you may be able to stack more layers if the product can support additional weight."
                    .to_string()
            }
        }
    }

    /// True for insights that point at a problem
    pub fn is_warning(&self) -> bool {
        !matches!(self, Insight::OptimalPacking)
    }
}

/// Ratings for both utilization figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub pallet: EfficiencyRating,
    pub r#box: EfficiencyRating,
}

pub fn rate(results: &CalculationResults) -> EfficiencySummary {
    EfficiencySummary {
        pallet: EfficiencyRating::from_percentage(results.pallet_utilization),
        r#box: EfficiencyRating::from_percentage(results.box_utilization),
    }
}

/// Recommendations for a calculation, in display order.
pub fn insights(data: &ProductData, results: &CalculationResults) -> Vec<Insight> {
    let mut found = Vec::new();

    if results.pallet_utilization < EXCELLENT_THRESHOLD {
        found.push(Insight::LowPalletUtilization {
            utilization: results.pallet_utilization,
        });
    }

    // Without a box the ratio is a self-comparison and says nothing
    if results.box_utilization < LOW_BOX_UTILIZATION && data.box_dimensions().is_some() {
        found.push(Insight::LowBoxUtilization {
            utilization: results.box_utilization,
        });
    }

    if results.pallet_utilization >= EXCELLENT_THRESHOLD
        && results.box_utilization >= EXCELLENT_THRESHOLD
    {
        found.push(Insight::OptimalPacking);
    }

    if results.layers_per_pallet == 1.0 {
        found.push(Insight::SingleLayer);
    }

    found
}
