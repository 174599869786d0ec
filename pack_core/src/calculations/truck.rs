//! # Truck Load Plan
//!
//! How many pallets fit on a truck bed and how many trucks the demand needs.
//! Pallets are laid out on an axis-aligned grid, like containers on a pallet.
//!
//! ## Example
//!
//! ```rust
//! use pack_core::calculations::packaging::{calculate, ProductData};
//! use pack_core::calculations::truck::{plan_truck_load, TruckBed};
//!
//! let input = ProductData {
//!     target_pallets: Some(20),
//!     ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
//! };
//! let results = calculate(&input).unwrap();
//! let plan = plan_truck_load(&input, &results, &TruckBed::default()).unwrap();
//!
//! // 2400 / 1200 = 2 across, 6000 / 800 = 7 along
//! assert_eq!(plan.capacity, 14);
//! assert_eq!(plan.trucks_required, 2);
//! ```

use serde::{Deserialize, Serialize};

use super::packaging::{CalculationResults, Dimensions, ProductData};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Millimeters, SqMeters};

/// Usable cargo bed of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckBed {
    pub width: Millimeters,
    pub length: Millimeters,
}

impl Default for TruckBed {
    fn default() -> Self {
        TruckBed {
            width: Millimeters(2400.0),
            length: Millimeters(6000.0),
        }
    }
}

impl TruckBed {
    pub fn new(width_mm: f64, length_mm: f64) -> Self {
        TruckBed {
            width: Millimeters(width_mm),
            length: Millimeters(length_mm),
        }
    }

    pub fn area(&self) -> SqMeters {
        SqMeters::from_mm(self.width, self.length)
    }
}

/// Result of laying pallets out on a truck bed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckLoadPlan {
    /// Pallets side by side across the bed width
    pub pallets_across: u64,
    /// Pallets in a row along the bed length
    pub pallets_along: u64,
    /// Pallets per truck
    pub capacity: u64,
    /// Pallets on the first truck: min(needed, capacity)
    pub pallets_loaded: u64,
    /// Share of the first truck's pallet slots in use (%)
    pub utilization: f64,
    /// Trucks needed to move every pallet
    pub trucks_required: u64,
    /// Floor space covered by the loaded pallets
    pub loaded_area: SqMeters,
    /// Container stacked on each pallet, for layout consumers
    pub container: Dimensions,
}

/// Lay pallets out on the truck bed.
///
/// # Returns
///
/// * `Ok(TruckLoadPlan)` - Layout and truck count
/// * `Err(CalcError::CalculationFailed)` - Not a single pallet fits the bed
pub fn plan_truck_load(
    data: &ProductData,
    results: &CalculationResults,
    bed: &TruckBed,
) -> CalcResult<TruckLoadPlan> {
    let pallets_across = grid_count(bed.width.0, data.pallet_width);
    let pallets_along = grid_count(bed.length.0, data.pallet_length);
    let capacity = pallets_across * pallets_along;

    if capacity == 0 {
        return Err(CalcError::calculation_failed(
            "truck_load",
            format!(
                "Pallet {}x{} mm does not fit a {}x{} mm truck bed",
                data.pallet_width, data.pallet_length, bed.width.0, bed.length.0
            ),
        ));
    }

    let needed = results.total_pallets_needed.max(0.0) as u64;
    let pallets_loaded = needed.min(capacity);
    let utilization = pallets_loaded as f64 / capacity as f64 * 100.0;
    let trucks_required = needed.div_ceil(capacity);

    let pallet_area =
        SqMeters::from_mm(Millimeters(data.pallet_width), Millimeters(data.pallet_length));

    tracing::debug!(capacity, trucks_required, "truck load planned");

    Ok(TruckLoadPlan {
        pallets_across,
        pallets_along,
        capacity,
        pallets_loaded,
        utilization,
        trucks_required,
        loaded_area: pallet_area * pallets_loaded as f64,
        container: data.container_dimensions(),
    })
}

fn grid_count(space: f64, item: f64) -> u64 {
    if item > 0.0 && space.is_finite() {
        (space / item).floor().max(0.0) as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::packaging::calculate;

    fn input_with_target(pallets: u64) -> ProductData {
        ProductData {
            target_pallets: Some(pallets),
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        }
    }

    #[test]
    fn test_standard_bed_layout() {
        let input = input_with_target(3);
        let results = calculate(&input).unwrap();
        let plan = plan_truck_load(&input, &results, &TruckBed::default()).unwrap();

        assert_eq!(plan.pallets_across, 2);
        assert_eq!(plan.pallets_along, 7);
        assert_eq!(plan.capacity, 14);
        assert_eq!(plan.pallets_loaded, 3);
        assert!((plan.utilization - 3.0 / 14.0 * 100.0).abs() < 1e-9);
        assert_eq!(plan.trucks_required, 1);
        assert!((plan.loaded_area.0 - 3.0 * 0.96).abs() < 1e-9);
    }

    #[test]
    fn test_overflow_needs_more_trucks() {
        let input = input_with_target(29);
        let results = calculate(&input).unwrap();
        let plan = plan_truck_load(&input, &results, &TruckBed::default()).unwrap();

        assert_eq!(plan.pallets_loaded, 14);
        assert_eq!(plan.utilization, 100.0);
        assert_eq!(plan.trucks_required, 3);
    }

    #[test]
    fn test_pallet_too_large_for_bed() {
        let input = input_with_target(1);
        let results = calculate(&input).unwrap();
        let err = plan_truck_load(&input, &results, &TruckBed::new(1000.0, 6000.0)).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_container_reported() {
        let input = ProductData {
            box_width: Some(300.0),
            box_length: Some(450.0),
            box_height: Some(150.0),
            ..input_with_target(1)
        };
        let results = calculate(&input).unwrap();
        let plan = plan_truck_load(&input, &results, &TruckBed::default()).unwrap();
        assert_eq!(plan.container, Dimensions::new(300.0, 450.0, 150.0));
    }
}
