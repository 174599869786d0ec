//! # Packaging Defaults
//!
//! Values used to seed a new configuration before the user has entered
//! anything: standard pallet footprint, stack height, production rate and the
//! truck bed used for load planning.
//!
//! Defaults live in the store's settings block and can be overridden from a
//! TOML file with a `[defaults]` table:
//!
//! ```toml
//! [defaults]
//! pallet_width_mm = 1200.0
//! pallet_length_mm = 1000.0
//! working_days = 6
//!
//! [defaults.truck_bed]
//! width = 2450.0
//! length = 13600.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::truck::TruckBed;
use crate::errors::{CalcError, CalcResult};

/// Seed values for new inputs.
///
/// Missing keys in a TOML/JSON document fall back to the built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingDefaults {
    /// Pallet footprint width (mm)
    pub pallet_width_mm: f64,
    /// Pallet footprint length (mm)
    pub pallet_length_mm: f64,
    /// Maximum stack height (mm)
    pub pallet_max_height_mm: f64,
    /// Units produced per working day
    pub production_speed: f64,
    /// Working days per week
    pub working_days: u32,
    /// Truck bed used for load planning
    pub truck_bed: TruckBed,
}

impl Default for PackagingDefaults {
    fn default() -> Self {
        PackagingDefaults {
            pallet_width_mm: 1200.0,
            pallet_length_mm: 800.0,
            pallet_max_height_mm: 1800.0,
            production_speed: 100.0,
            working_days: 5,
            truck_bed: TruckBed::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    defaults: PackagingDefaults,
}

impl PackagingDefaults {
    /// Parse the `[defaults]` table of a TOML settings document.
    pub fn from_toml_str(content: &str) -> CalcResult<Self> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| CalcError::serialization(format!("TOML parsing error: {}", e)))?;
        Ok(file.defaults)
    }

    /// Read and parse a TOML settings file.
    pub fn from_file(path: &Path) -> CalcResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let defaults = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded packaging defaults");
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let d = PackagingDefaults::default();
        assert_eq!(d.pallet_width_mm, 1200.0);
        assert_eq!(d.pallet_length_mm, 800.0);
        assert_eq!(d.pallet_max_height_mm, 1800.0);
        assert_eq!(d.production_speed, 100.0);
        assert_eq!(d.working_days, 5);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml = r#"
            [defaults]
            pallet_length_mm = 1000.0
            working_days = 6

            [defaults.truck_bed]
            length = 13600.0
        "#;
        let d = PackagingDefaults::from_toml_str(toml).unwrap();
        assert_eq!(d.pallet_width_mm, 1200.0);
        assert_eq!(d.pallet_length_mm, 1000.0);
        assert_eq!(d.working_days, 6);
        assert_eq!(d.truck_bed.length.0, 13600.0);
        assert_eq!(d.truck_bed.width.0, 2400.0);
    }

    #[test]
    fn test_empty_document_uses_builtins() {
        let d = PackagingDefaults::from_toml_str("").unwrap();
        assert_eq!(d, PackagingDefaults::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = PackagingDefaults::from_toml_str("[defaults\nworking_days = ").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
