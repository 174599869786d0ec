//! # Packaging Calculation
//!
//! Derives box, layer and pallet quantities plus weight, cost, timeline and
//! utilization figures from product/box/pallet geometry.
//!
//! ## Assumptions
//!
//! - Axis-aligned grid packing only: no rotation, no mixed orientation
//! - Leftover space is wasted space, visible only in the utilization ratios
//! - Without a box, the product itself is the container placed on the pallet
//! - Linear dimensions in mm, weights in kg, costs in an abstract currency
//!
//! ## Example
//!
//! ```rust
//! use pack_core::calculations::packaging::{calculate, ProductData};
//!
//! let input = ProductData {
//!     box_width: Some(300.0),
//!     box_length: Some(450.0),
//!     box_height: Some(150.0),
//!     box_weight: Some(0.1),
//!     box_cost: Some(1.2),
//!     ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.units_per_box, 27.0);
//! assert_eq!(result.total_units_per_pallet, 1296.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, FieldViolation};
use crate::settings::PackagingDefaults;

/// Stack height used when no pallet maximum height is given (mm)
pub const DEFAULT_PALLET_MAX_HEIGHT_MM: f64 = 1800.0;

/// Engine input.
///
/// Field names serialize in camelCase (`productWidth`, `boxHeight`, ...) so
/// the JSON shape matches what form and dashboard consumers exchange.
///
/// ## JSON Example
///
/// ```json
/// {
///   "productWidth": 100.0,
///   "productLength": 150.0,
///   "productHeight": 50.0,
///   "boxWidth": 300.0,
///   "boxLength": 450.0,
///   "boxHeight": 150.0,
///   "palletWidth": 1200.0,
///   "palletLength": 800.0,
///   "palletMaxHeight": 1800.0,
///   "productWeight": 0.5,
///   "boxWeight": 0.1,
///   "productCost": 12.5,
///   "boxCost": 1.2,
///   "targetProducts": 5000,
///   "productionSpeed": 100.0,
///   "workingDays": 5,
///   "deadline": "2026-11-30"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// Width of one sellable unit (mm)
    pub product_width: f64,
    /// Length of one sellable unit (mm)
    pub product_length: f64,
    /// Height of one sellable unit (mm)
    pub product_height: f64,

    /// Outer box width (mm); the box only counts when all three are given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_height: Option<f64>,

    /// Pallet footprint width (mm)
    pub pallet_width: f64,
    /// Pallet footprint length (mm)
    pub pallet_length: f64,
    /// Maximum stack height (mm), 1800 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pallet_max_height: Option<f64>,

    /// Weight of one unit (kg)
    pub product_weight: f64,
    /// Weight of an empty box (kg), 0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_weight: Option<f64>,

    /// Cost of one unit
    pub product_cost: f64,
    /// Cost of an empty box, 0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_cost: Option<f64>,

    /// Demand target in pallets; wins over `target_products`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pallets: Option<u64>,
    /// Demand target in units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_products: Option<u64>,

    /// Units produced per working day
    pub production_speed: f64,
    /// Working days per 7-day week (1..=7)
    pub working_days: u32,
    /// Delivery deadline, only read by the timeline projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// Width/length/height triple in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Dimensions { width, length, height }
    }

    /// Footprint area (mm²)
    pub fn footprint(&self) -> f64 {
        self.width * self.length
    }

    /// Volume (mm³)
    pub fn volume(&self) -> f64 {
        self.width * self.length * self.height
    }
}

/// Resolved demand target, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandTarget {
    /// A fixed number of full pallets
    Pallets(u64),
    /// A number of units, rounded up to whole pallets and boxes
    Products(u64),
    /// No target: one pallet's worth
    SinglePallet,
}

impl ProductData {
    /// Create an input with mandatory product fields set and everything else
    /// taken from [`PackagingDefaults::default`].
    pub fn new(
        product_width: f64,
        product_length: f64,
        product_height: f64,
        product_weight: f64,
        product_cost: f64,
    ) -> Self {
        ProductData {
            product_width,
            product_length,
            product_height,
            product_weight,
            product_cost,
            ..ProductData::from_defaults(&PackagingDefaults::default())
        }
    }

    /// Blank input seeded from defaults: zero product fields, default
    /// pallet and production settings, no box and no target.
    pub fn from_defaults(defaults: &PackagingDefaults) -> Self {
        ProductData {
            product_width: 0.0,
            product_length: 0.0,
            product_height: 0.0,
            box_width: None,
            box_length: None,
            box_height: None,
            pallet_width: defaults.pallet_width_mm,
            pallet_length: defaults.pallet_length_mm,
            pallet_max_height: Some(defaults.pallet_max_height_mm),
            product_weight: 0.0,
            box_weight: None,
            product_cost: 0.0,
            box_cost: None,
            target_pallets: None,
            target_products: None,
            production_speed: defaults.production_speed,
            working_days: defaults.working_days,
            deadline: None,
        }
    }

    /// Return a copy with the fields present in `update` replaced.
    pub fn with_update(&self, update: &ProductDataUpdate) -> Self {
        let mut next = self.clone();
        next.product_width = update.product_width.unwrap_or(next.product_width);
        next.product_length = update.product_length.unwrap_or(next.product_length);
        next.product_height = update.product_height.unwrap_or(next.product_height);
        next.pallet_width = update.pallet_width.unwrap_or(next.pallet_width);
        next.pallet_length = update.pallet_length.unwrap_or(next.pallet_length);
        next.product_weight = update.product_weight.unwrap_or(next.product_weight);
        next.product_cost = update.product_cost.unwrap_or(next.product_cost);
        next.production_speed = update.production_speed.unwrap_or(next.production_speed);
        next.working_days = update.working_days.unwrap_or(next.working_days);
        next.box_width = update.box_width.or(next.box_width);
        next.box_length = update.box_length.or(next.box_length);
        next.box_height = update.box_height.or(next.box_height);
        next.pallet_max_height = update.pallet_max_height.or(next.pallet_max_height);
        next.box_weight = update.box_weight.or(next.box_weight);
        next.box_cost = update.box_cost.or(next.box_cost);
        next.target_pallets = update.target_pallets.or(next.target_pallets);
        next.target_products = update.target_products.or(next.target_products);
        next.deadline = update.deadline.or(next.deadline);
        next
    }

    /// Return a copy with the box removed (product becomes the container).
    pub fn without_box(&self) -> Self {
        ProductData {
            box_width: None,
            box_length: None,
            box_height: None,
            ..self.clone()
        }
    }

    /// Dimensions of one unit
    pub fn product_dimensions(&self) -> Dimensions {
        Dimensions::new(self.product_width, self.product_length, self.product_height)
    }

    /// Box dimensions, only when all three are given
    pub fn box_dimensions(&self) -> Option<Dimensions> {
        match (self.box_width, self.box_length, self.box_height) {
            (Some(w), Some(l), Some(h)) => Some(Dimensions::new(w, l, h)),
            _ => None,
        }
    }

    /// Whatever gets stacked on the pallet: the box if defined, else the product
    pub fn container_dimensions(&self) -> Dimensions {
        self.box_dimensions().unwrap_or_else(|| self.product_dimensions())
    }

    pub fn effective_pallet_max_height(&self) -> f64 {
        self.pallet_max_height.unwrap_or(DEFAULT_PALLET_MAX_HEIGHT_MM)
    }

    pub fn demand_target(&self) -> DemandTarget {
        match (self.target_pallets, self.target_products) {
            (Some(pallets), _) => DemandTarget::Pallets(pallets),
            (None, Some(products)) => DemandTarget::Products(products),
            (None, None) => DemandTarget::SinglePallet,
        }
    }

    /// True when both demand targets are set (pallets take precedence).
    pub fn has_ambiguous_target(&self) -> bool {
        self.target_pallets.is_some() && self.target_products.is_some()
    }

    /// Validate input parameters, reporting every violation at once.
    pub fn validate(&self) -> CalcResult<()> {
        let mut violations = Vec::new();

        require_positive(&mut violations, "productWidth", self.product_width, "Product width");
        require_positive(&mut violations, "productLength", self.product_length, "Product length");
        require_positive(&mut violations, "productHeight", self.product_height, "Product height");

        let box_fields = [
            ("boxWidth", self.box_width, "Box width"),
            ("boxLength", self.box_length, "Box length"),
            ("boxHeight", self.box_height, "Box height"),
        ];
        let given = box_fields.iter().filter(|(_, v, _)| v.is_some()).count();
        for (field, value, label) in box_fields {
            match value {
                Some(v) => require_positive(&mut violations, field, v, label),
                None if given > 0 => violations.push(FieldViolation::new(
                    field,
                    "missing",
                    "Box width, length and height must be given together",
                )),
                None => {}
            }
        }

        require_positive(&mut violations, "palletWidth", self.pallet_width, "Pallet width");
        require_positive(&mut violations, "palletLength", self.pallet_length, "Pallet length");
        if let Some(h) = self.pallet_max_height {
            require_positive(&mut violations, "palletMaxHeight", h, "Pallet max height");
        }

        require_non_negative(
            &mut violations,
            "productWeight",
            self.product_weight,
            "Product weight",
        );
        if let Some(w) = self.box_weight {
            require_non_negative(&mut violations, "boxWeight", w, "Box weight");
        }
        require_non_negative(&mut violations, "productCost", self.product_cost, "Product cost");
        if let Some(c) = self.box_cost {
            require_non_negative(&mut violations, "boxCost", c, "Box cost");
        }

        require_positive(
            &mut violations,
            "productionSpeed",
            self.production_speed,
            "Production speed",
        );
        if !(1..=7).contains(&self.working_days) {
            violations.push(FieldViolation::new(
                "workingDays",
                self.working_days.to_string(),
                "Working days must be between 1 and 7",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CalcError::invalid_inputs(violations))
        }
    }
}

fn require_positive(violations: &mut Vec<FieldViolation>, field: &str, value: f64, label: &str) {
    if !(value > 0.0) || !value.is_finite() {
        violations.push(FieldViolation::new(
            field,
            value.to_string(),
            format!("{} must be a positive number", label),
        ));
    }
}

fn require_non_negative(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: f64,
    label: &str,
) {
    if !(value >= 0.0) || !value.is_finite() {
        violations.push(FieldViolation::new(
            field,
            value.to_string(),
            format!("{} cannot be negative", label),
        ));
    }
}

/// Partial form update. Every `Some` field replaces the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDataUpdate {
    pub product_width: Option<f64>,
    pub product_length: Option<f64>,
    pub product_height: Option<f64>,
    pub box_width: Option<f64>,
    pub box_length: Option<f64>,
    pub box_height: Option<f64>,
    pub pallet_width: Option<f64>,
    pub pallet_length: Option<f64>,
    pub pallet_max_height: Option<f64>,
    pub product_weight: Option<f64>,
    pub box_weight: Option<f64>,
    pub product_cost: Option<f64>,
    pub box_cost: Option<f64>,
    pub target_pallets: Option<u64>,
    pub target_products: Option<u64>,
    pub production_speed: Option<f64>,
    pub working_days: Option<u32>,
    pub deadline: Option<NaiveDate>,
}

/// Engine output: 18 derived figures, camelCase on the wire.
///
/// Counts are kept as `f64` so that an unvalidated [`compute`] can report
/// `NaN`/`Infinity` instead of panicking on a zero denominator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unitsPerBox": 27.0,
///   "boxesPerPalletLayer": 4.0,
///   "layersPerPallet": 12.0,
///   "totalUnitsPerPallet": 1296.0,
///   "totalBoxesNeeded": 48.0,
///   "totalPalletsNeeded": 1.0,
///   "weightPerBox": 13.6,
///   "weightPerPalletLayer": 54.4,
///   "weightPerPallet": 652.8,
///   "totalWeight": 652.8,
///   "costPerBox": 338.7,
///   "costPerPalletLayer": 1354.8,
///   "costPerPallet": 16257.6,
///   "totalCost": 16257.6,
///   "estimatedDays": 4.2,
///   "dailyProduction": 500.0,
///   "palletUtilization": 56.25,
///   "boxUtilization": 100.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    pub units_per_box: f64,
    pub boxes_per_pallet_layer: f64,
    pub layers_per_pallet: f64,
    pub total_units_per_pallet: f64,
    pub total_boxes_needed: f64,
    pub total_pallets_needed: f64,

    /// kg
    pub weight_per_box: f64,
    pub weight_per_pallet_layer: f64,
    pub weight_per_pallet: f64,
    pub total_weight: f64,

    pub cost_per_box: f64,
    pub cost_per_pallet_layer: f64,
    pub cost_per_pallet: f64,
    pub total_cost: f64,

    /// Calendar days (may be fractional)
    pub estimated_days: f64,
    /// productionSpeed x workingDays
    pub daily_production: f64,

    /// Footprint share of the pallet covered by containers (%)
    pub pallet_utilization: f64,
    /// Volume share of the box filled by units (%)
    pub box_utilization: f64,
}

impl CalculationResults {
    /// Units that the demand target resolves to
    pub fn total_units_needed(&self) -> f64 {
        self.total_pallets_needed * self.total_units_per_pallet
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.units_per_box,
            self.boxes_per_pallet_layer,
            self.layers_per_pallet,
            self.total_units_per_pallet,
            self.total_boxes_needed,
            self.total_pallets_needed,
            self.weight_per_box,
            self.weight_per_pallet_layer,
            self.weight_per_pallet,
            self.total_weight,
            self.cost_per_box,
            self.cost_per_pallet_layer,
            self.cost_per_pallet,
            self.total_cost,
            self.estimated_days,
            self.daily_production,
            self.pallet_utilization,
            self.box_utilization,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Run the packaging arithmetic without validation.
///
/// Never fails. Zero or missing mandatory values show up as `NaN`/`Infinity`
/// in the result; use [`calculate`] to reject them up front.
pub fn compute(data: &ProductData) -> CalculationResults {
    let product = data.product_dimensions();
    let packaging = data.box_dimensions();
    let container = packaging.unwrap_or(product);

    let units_per_box = match packaging {
        Some(b) => {
            (b.width / product.width).floor()
                * (b.length / product.length).floor()
                * (b.height / product.height).floor()
        }
        None => 1.0,
    };

    let boxes_per_pallet_layer = (data.pallet_width / container.width).floor()
        * (data.pallet_length / container.length).floor();
    let layers_per_pallet = (data.effective_pallet_max_height() / container.height).floor();
    let total_units_per_pallet = units_per_box * boxes_per_pallet_layer * layers_per_pallet;

    let (total_pallets_needed, total_boxes_needed) = match data.demand_target() {
        DemandTarget::Pallets(pallets) => {
            let pallets = pallets as f64;
            (pallets, pallets * boxes_per_pallet_layer * layers_per_pallet)
        }
        DemandTarget::Products(products) => {
            let products = products as f64;
            (
                (products / total_units_per_pallet).ceil(),
                (products / units_per_box).ceil(),
            )
        }
        DemandTarget::SinglePallet => (1.0, boxes_per_pallet_layer * layers_per_pallet),
    };

    let weight_per_box = data.product_weight * units_per_box + data.box_weight.unwrap_or(0.0);
    let weight_per_pallet_layer = weight_per_box * boxes_per_pallet_layer;
    let weight_per_pallet = weight_per_pallet_layer * layers_per_pallet;
    let total_weight = weight_per_pallet * total_pallets_needed;

    let cost_per_box = data.product_cost * units_per_box + data.box_cost.unwrap_or(0.0);
    let cost_per_pallet_layer = cost_per_box * boxes_per_pallet_layer;
    let cost_per_pallet = cost_per_pallet_layer * layers_per_pallet;
    let total_cost = cost_per_pallet * total_pallets_needed;

    // Working-day count spread over a uniform 7-day week
    let working_days = data.working_days as f64;
    let total_units_needed = total_pallets_needed * total_units_per_pallet;
    let daily_production = data.production_speed * working_days;
    let estimated_days = (total_units_needed / daily_production).ceil() * 7.0 / working_days;

    let pallet_area = data.pallet_width * data.pallet_length;
    let used_area = boxes_per_pallet_layer * container.width * container.length;
    let pallet_utilization = (used_area / pallet_area) * 100.0;

    let box_volume = packaging.unwrap_or(container).volume();
    let box_utilization = (units_per_box * product.volume()) / box_volume * 100.0;

    CalculationResults {
        units_per_box,
        boxes_per_pallet_layer,
        layers_per_pallet,
        total_units_per_pallet,
        total_boxes_needed,
        total_pallets_needed,
        weight_per_box,
        weight_per_pallet_layer,
        weight_per_pallet,
        total_weight,
        cost_per_box,
        cost_per_pallet_layer,
        cost_per_pallet,
        total_cost,
        estimated_days,
        daily_production,
        pallet_utilization,
        box_utilization,
    }
}

/// Validate the input, then run the packaging arithmetic.
///
/// # Returns
///
/// * `Ok(CalculationResults)` - All figures derived from valid input
/// * `Err(CalcError::InvalidInputs)` - Every violated constraint, by field
pub fn calculate(data: &ProductData) -> CalcResult<CalculationResults> {
    data.validate()?;

    if data.has_ambiguous_target() {
        tracing::warn!(
            target_pallets = ?data.target_pallets,
            target_products = ?data.target_products,
            "both demand targets set, using targetPallets"
        );
    }

    let results = compute(data);
    tracing::debug!(
        units_per_box = results.units_per_box,
        boxes_per_layer = results.boxes_per_pallet_layer,
        layers = results.layers_per_pallet,
        pallets = results.total_pallets_needed,
        "packaging calculated"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn reference_input() -> ProductData {
        ProductData {
            box_width: Some(300.0),
            box_length: Some(450.0),
            box_height: Some(150.0),
            box_weight: Some(0.1),
            box_cost: Some(1.2),
            pallet_max_height: Some(1800.0),
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&reference_input()).unwrap();

        assert_eq!(result.units_per_box, 27.0);
        assert_eq!(result.boxes_per_pallet_layer, 4.0);
        assert_eq!(result.layers_per_pallet, 12.0);
        assert_eq!(result.total_units_per_pallet, 1296.0);
        assert_eq!(result.total_pallets_needed, 1.0);
        assert_eq!(result.total_boxes_needed, 48.0);

        assert_close(result.weight_per_box, 13.6);
        assert_close(result.weight_per_pallet, 652.8);
        assert_close(result.total_weight, 652.8);

        assert_close(result.cost_per_box, 338.7);
        assert_close(result.cost_per_pallet, 16257.6);
        assert_close(result.total_cost, 16257.6);

        assert_eq!(result.daily_production, 500.0);
        assert_close(result.estimated_days, 4.2);
        assert_close(result.pallet_utilization, 56.25);
        assert_close(result.box_utilization, 100.0);
    }

    #[test]
    fn test_deterministic() {
        let input = reference_input();
        assert_eq!(compute(&input), compute(&input));
    }

    #[test]
    fn test_no_box_packs_products_directly() {
        let input = reference_input().without_box();
        let result = calculate(&input).unwrap();

        assert_eq!(result.units_per_box, 1.0);
        // floor(1200/100) * floor(800/150) = 12 * 5
        assert_eq!(result.boxes_per_pallet_layer, 60.0);
        // floor(1800/50)
        assert_eq!(result.layers_per_pallet, 36.0);
        assert_close(result.box_utilization, 100.0);
        // 60 * 100 * 150 / 960000
        assert_close(result.pallet_utilization, 93.75);
    }

    #[test]
    fn test_target_pallets_wins_over_target_products() {
        let input = ProductData {
            target_pallets: Some(5),
            target_products: Some(100_000),
            ..reference_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_pallets_needed, 5.0);
        assert_eq!(result.total_boxes_needed, 5.0 * 48.0);
        assert_close(result.total_weight, 652.8 * 5.0);
    }

    #[test]
    fn test_target_products_rounds_up() {
        let input = ProductData {
            target_products: Some(1300),
            ..reference_input()
        };
        let result = calculate(&input).unwrap();
        // ceil(1300 / 1296), ceil(1300 / 27)
        assert_eq!(result.total_pallets_needed, 2.0);
        assert_eq!(result.total_boxes_needed, 49.0);
        // ceil(2592 / 500) * 7 / 5
        assert_close(result.estimated_days, 6.0 * 7.0 / 5.0);
    }

    #[test]
    fn test_zero_target_is_a_target() {
        let input = ProductData {
            target_products: Some(0),
            ..reference_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.total_pallets_needed, 0.0);
        assert_eq!(result.total_boxes_needed, 0.0);
        assert_eq!(result.estimated_days, 0.0);
    }

    #[test]
    fn test_default_max_height_applies() {
        let input = ProductData {
            pallet_max_height: None,
            ..reference_input()
        };
        assert_eq!(compute(&input).layers_per_pallet, 12.0);

        let low = ProductData {
            pallet_max_height: Some(1000.0),
            ..reference_input()
        };
        assert_eq!(compute(&low).layers_per_pallet, 6.0);
    }

    #[test]
    fn test_utilization_is_raw_formula() {
        // Box 250x400x100 holding 2x2x2 products of 100x150x50
        let input = ProductData {
            box_width: Some(250.0),
            box_length: Some(400.0),
            box_height: Some(100.0),
            ..reference_input()
        };
        let result = compute(&input);
        assert_eq!(result.units_per_box, 8.0);
        let expected_box = (8.0 * 750_000.0) / (250.0 * 400.0 * 100.0) * 100.0;
        assert_eq!(result.box_utilization, expected_box);
        // floor(1200/250) * floor(800/400) = 4 * 2
        let expected_pallet = (8.0 * 250.0 * 400.0) / (1200.0 * 800.0) * 100.0;
        assert_eq!(result.pallet_utilization, expected_pallet);
    }

    #[test]
    fn test_zero_width_propagates_without_validation() {
        let input = ProductData {
            product_width: 0.0,
            ..reference_input()
        };
        let result = compute(&input);
        assert!(result.units_per_box.is_infinite());
        assert!(!result.is_finite());
    }

    #[test]
    fn test_zero_width_rejected_by_name() {
        let input = ProductData {
            product_width: 0.0,
            ..reference_input()
        };
        match calculate(&input) {
            Err(CalcError::InvalidInputs { violations }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "productWidth");
            }
            other => panic!("expected InvalidInputs, got {:?}", other),
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let input = ProductData {
            product_width: 0.0,
            pallet_length: -800.0,
            product_cost: -1.0,
            production_speed: 0.0,
            working_days: 0,
            ..reference_input()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["productWidth", "palletLength", "productCost", "productionSpeed", "workingDays"]
        );
    }

    #[test]
    fn test_partial_box_dimensions_rejected() {
        let input = ProductData {
            box_height: None,
            ..reference_input()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUTS");
        assert_eq!(err.fields(), vec!["boxHeight"]);

        // Unvalidated, a partial box is no box at all
        assert_eq!(compute(&input).units_per_box, 1.0);
    }

    #[test]
    fn test_nan_rejected() {
        let input = ProductData {
            product_weight: f64::NAN,
            ..reference_input()
        };
        assert_eq!(input.validate().unwrap_err().fields(), vec!["productWeight"]);
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(5, true)]
    #[case(7, true)]
    #[case(8, false)]
    fn test_working_days_range(#[case] days: u32, #[case] valid: bool) {
        let input = ProductData {
            working_days: days,
            ..reference_input()
        };
        assert_eq!(input.validate().is_ok(), valid);
    }

    #[rstest]
    #[case(1, 91.0)]
    #[case(5, 4.2)]
    #[case(7, 2.0)]
    fn test_estimated_days_by_working_days(#[case] days: u32, #[case] expected: f64) {
        // 1296 units at 100 per working day: ceil(1296 / (100 * days)) * 7 / days
        let input = ProductData {
            working_days: days,
            ..reference_input()
        };
        let result = calculate(&input).unwrap();
        assert_close(result.estimated_days, expected);
    }

    #[test]
    fn test_with_update_returns_new_value() {
        let original = reference_input();
        let update = ProductDataUpdate {
            product_width: Some(75.0),
            target_pallets: Some(3),
            working_days: Some(6),
            ..ProductDataUpdate::default()
        };
        let updated = original.with_update(&update);

        assert_eq!(original.product_width, 100.0);
        assert_eq!(original.target_pallets, None);
        assert_eq!(updated.product_width, 75.0);
        assert_eq!(updated.target_pallets, Some(3));
        assert_eq!(updated.box_width, original.box_width);
        assert_eq!(updated.working_days, 6);
        assert_eq!(updated.production_speed, original.production_speed);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let input = reference_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"productWidth\":100.0"));
        assert!(json.contains("\"workingDays\":5"));
        assert!(!json.contains("targetPallets"));

        let result = compute(&input);
        let json = serde_json::to_value(result).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 18);
        assert!(obj.contains_key("boxesPerPalletLayer"));
        assert!(obj.contains_key("weightPerPalletLayer"));
        assert!(obj.contains_key("palletUtilization"));
    }

    #[test]
    fn test_minimal_json_input() {
        let json = r#"{
            "productWidth": 100, "productLength": 150, "productHeight": 50,
            "palletWidth": 1200, "palletLength": 800,
            "productWeight": 0.5, "productCost": 12.5,
            "productionSpeed": 100, "workingDays": 5,
            "deadline": "2026-11-30"
        }"#;
        let input: ProductData = serde_json::from_str(json).unwrap();
        assert_eq!(input.box_dimensions(), None);
        assert_eq!(input.effective_pallet_max_height(), DEFAULT_PALLET_MAX_HEIGHT_MM);
        assert_eq!(input.deadline, NaiveDate::from_ymd_opt(2026, 11, 30));
        assert!(calculate(&input).is_ok());
    }

    proptest! {
        #[test]
        fn prop_compute_is_deterministic(
            width in 1.0f64..500.0,
            length in 1.0f64..500.0,
            height in 1.0f64..500.0,
            target in 0u64..1_000_000,
        ) {
            let input = ProductData {
                target_products: Some(target),
                ..ProductData::new(width, length, height, 1.0, 1.0)
            };
            let a = compute(&input);
            let b = compute(&input);
            prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        }

        #[test]
        fn prop_more_products_never_fewer_pallets(
            smaller in 0u64..500_000,
            extra in 0u64..500_000,
        ) {
            let base = reference_input();
            let low = compute(&ProductData { target_products: Some(smaller), ..base.clone() });
            let high = compute(&ProductData { target_products: Some(smaller + extra), ..base });
            prop_assert!(high.total_pallets_needed >= low.total_pallets_needed);
            prop_assert!(high.total_boxes_needed >= low.total_boxes_needed);
        }
    }
}
