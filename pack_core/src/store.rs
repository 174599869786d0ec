//! # Packaging Store
//!
//! The `PackagingStore` is the root container for the product catalog and the
//! packaging configurations users have saved against it. Stores serialize to
//! `.pack` files as human-readable JSON (see [`file_io`](crate::file_io)).
//!
//! ## Structure
//!
//! ```text
//! PackagingStore
//! ├── meta: StoreMetadata (version, owner, timestamps)
//! ├── settings: PackagingDefaults (seed values for new inputs)
//! ├── products: BTreeMap<u64, Product>
//! └── configurations: HashMap<Uuid, SavedConfiguration>
//! ```
//!
//! Each user keeps at most one configuration per product; saving again
//! replaces it.
//!
//! ## Example
//!
//! ```rust
//! use pack_core::store::{PackagingStore, Product};
//!
//! let mut store = PackagingStore::new("Operations");
//! store.add_product(Product::new(42, "WID-042", "Widget", 12.5)).unwrap();
//!
//! let mut input = store.seed_input(42, "alice").unwrap();
//! assert_eq!(input.product_cost, 12.5);
//!
//! input.product_width = 100.0;
//! input.product_length = 150.0;
//! input.product_height = 50.0;
//! input.product_weight = 0.5;
//!
//! store.save_configuration(42, "alice", "  Standard  ", None, input).unwrap();
//! let saved = store.configuration_for(42, "alice").unwrap();
//! assert_eq!(saved.configuration_name, "Standard");
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::packaging::{calculate, CalculationResults, ProductData};
use crate::errors::{CalcError, CalcResult};
use crate::settings::PackagingDefaults;

/// Current schema version for .pack files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// A catalog entry that configurations are saved against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: u64,
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sales unit, e.g. "each" or "pack"
    pub unit_of_measure: String,
    /// List price of one unit, used to seed `productCost`
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl Product {
    pub fn new(
        product_id: u64,
        sku: impl Into<String>,
        name: impl Into<String>,
        base_price: f64,
    ) -> Self {
        Product {
            product_id,
            sku: sku.into(),
            name: name.into(),
            description: None,
            unit_of_measure: "each".to_string(),
            base_price,
            barcode: None,
        }
    }
}

/// A user's saved packaging configuration for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub id: Uuid,
    pub product_id: u64,
    pub user_id: String,
    pub configuration_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub input: ProductData,
    /// Results computed from `input` at save time
    pub results: CalculationResults,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Store metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Team or person responsible for the store
    pub owner: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Root store container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingStore {
    pub meta: StoreMetadata,

    #[serde(default)]
    pub settings: PackagingDefaults,

    pub products: BTreeMap<u64, Product>,

    /// Saved configurations, keyed by UUID
    pub configurations: HashMap<Uuid, SavedConfiguration>,
}

impl PackagingStore {
    /// Create an empty store with built-in defaults.
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        PackagingStore {
            meta: StoreMetadata {
                version: SCHEMA_VERSION.to_string(),
                owner: owner.into(),
                created: now,
                modified: now,
            },
            settings: PackagingDefaults::default(),
            products: BTreeMap::new(),
            configurations: HashMap::new(),
        }
    }

    /// Add a product to the catalog, replacing any entry with the same id.
    ///
    /// Returns the replaced product, if any.
    pub fn add_product(&mut self, product: Product) -> CalcResult<Option<Product>> {
        if product.sku.trim().is_empty() {
            return Err(CalcError::invalid_input("sku", &product.sku, "SKU must not be empty"));
        }
        if product.name.trim().is_empty() {
            return Err(CalcError::invalid_input("name", &product.name, "Product name must not be empty"));
        }
        if !product.base_price.is_finite() || product.base_price < 0.0 {
            return Err(CalcError::invalid_input(
                "base_price",
                product.base_price.to_string(),
                "Base price must be a non-negative number",
            ));
        }

        tracing::info!(product_id = product.product_id, sku = %product.sku, "product added");
        let replaced = self.products.insert(product.product_id, product);
        self.touch();
        Ok(replaced)
    }

    pub fn product(&self, product_id: u64) -> Option<&Product> {
        self.products.get(&product_id)
    }

    /// Save a user's configuration for a product.
    ///
    /// Results are recomputed from `input`. An existing configuration for the
    /// same (product, user) pair is replaced in place, keeping its id and
    /// creation time.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - Id of the saved configuration
    /// * `Err(CalcError::ProductNotFound)` - Unknown product
    /// * `Err(CalcError::InvalidInput)` - Blank configuration name
    /// * `Err(CalcError::InvalidInputs)` - `input` failed validation
    pub fn save_configuration(
        &mut self,
        product_id: u64,
        user_id: impl Into<String>,
        name: &str,
        notes: Option<String>,
        input: ProductData,
    ) -> CalcResult<Uuid> {
        if !self.products.contains_key(&product_id) {
            return Err(CalcError::product_not_found(product_id));
        }

        let configuration_name = name.trim();
        if configuration_name.is_empty() {
            return Err(CalcError::invalid_input(
                "configurationName",
                name,
                "Configuration name must not be empty",
            ));
        }

        let results = calculate(&input)?;
        let user_id = user_id.into();
        let now = Utc::now();

        let existing = self.find_configuration(product_id, &user_id).map(|c| c.id);
        let id = match existing {
            Some(id) => {
                if let Some(saved) = self.configurations.get_mut(&id) {
                    saved.configuration_name = configuration_name.to_string();
                    saved.notes = notes;
                    saved.input = input;
                    saved.results = results;
                    saved.updated = now;
                }
                tracing::info!(product_id, user = %user_id, %id, "configuration updated");
                id
            }
            None => {
                let id = Uuid::new_v4();
                tracing::info!(product_id, user = %user_id, %id, "configuration created");
                self.configurations.insert(
                    id,
                    SavedConfiguration {
                        id,
                        product_id,
                        user_id,
                        configuration_name: configuration_name.to_string(),
                        notes,
                        input,
                        results,
                        created: now,
                        updated: now,
                    },
                );
                id
            }
        };

        self.touch();
        Ok(id)
    }

    /// The configuration `user_id` saved for `product_id`, if any.
    pub fn configuration_for(&self, product_id: u64, user_id: &str) -> Option<&SavedConfiguration> {
        self.find_configuration(product_id, user_id)
    }

    /// Remove and return a user's configuration for a product.
    pub fn remove_configuration(
        &mut self,
        product_id: u64,
        user_id: &str,
    ) -> CalcResult<SavedConfiguration> {
        let id = self
            .find_configuration(product_id, user_id)
            .map(|c| c.id)
            .ok_or_else(|| CalcError::ConfigurationNotFound {
                product_id,
                user: user_id.to_string(),
            })?;

        let removed = self.configurations.remove(&id).ok_or_else(|| CalcError::Internal {
            message: format!("configuration {} vanished during removal", id),
        })?;
        self.touch();
        Ok(removed)
    }

    /// Every configuration saved for a product, ordered by user.
    pub fn configurations_for_product(&self, product_id: u64) -> Vec<&SavedConfiguration> {
        let mut found: Vec<_> = self
            .configurations
            .values()
            .filter(|c| c.product_id == product_id)
            .collect();
        found.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        found
    }

    /// Starting input for editing a product's configuration.
    ///
    /// The user's saved input when one exists, otherwise the store defaults
    /// with `productCost` set to the product's base price.
    pub fn seed_input(&self, product_id: u64, user_id: &str) -> CalcResult<ProductData> {
        let product = self
            .product(product_id)
            .ok_or_else(|| CalcError::product_not_found(product_id))?;

        if let Some(saved) = self.configuration_for(product_id, user_id) {
            return Ok(saved.input.clone());
        }

        Ok(ProductData {
            product_cost: product.base_price,
            ..ProductData::from_defaults(&self.settings)
        })
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    fn find_configuration(&self, product_id: u64, user_id: &str) -> Option<&SavedConfiguration> {
        self.configurations
            .values()
            .find(|c| c.product_id == product_id && c.user_id == user_id)
    }
}

impl Default for PackagingStore {
    fn default() -> Self {
        PackagingStore::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_input() -> ProductData {
        ProductData {
            box_width: Some(300.0),
            box_length: Some(450.0),
            box_height: Some(150.0),
            ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
        }
    }

    fn store_with_widget() -> PackagingStore {
        let mut store = PackagingStore::new("Ops");
        store.add_product(Product::new(1, "WID-1", "Widget", 12.5)).unwrap();
        store
    }

    #[test]
    fn test_store_creation() {
        let store = PackagingStore::new("Ops");
        assert_eq!(store.meta.owner, "Ops");
        assert_eq!(store.meta.version, SCHEMA_VERSION);
        assert!(store.products.is_empty());
        assert!(store.configurations.is_empty());
    }

    #[test]
    fn test_add_product_rejects_blank_sku() {
        let mut store = PackagingStore::new("Ops");
        let err = store.add_product(Product::new(1, "  ", "Widget", 1.0)).unwrap_err();
        assert_eq!(err.fields(), vec!["sku"]);
    }

    #[test]
    fn test_add_product_replaces_same_id() {
        let mut store = store_with_widget();
        let replaced = store.add_product(Product::new(1, "WID-1B", "Widget v2", 13.0)).unwrap();
        assert_eq!(replaced.map(|p| p.sku), Some("WID-1".to_string()));
        assert_eq!(store.products.len(), 1);
    }

    #[test]
    fn test_save_computes_results_and_trims_name() {
        let mut store = store_with_widget();
        let id = store
            .save_configuration(1, "alice", "  Standard case ", None, widget_input())
            .unwrap();

        let saved = &store.configurations[&id];
        assert_eq!(saved.configuration_name, "Standard case");
        assert_eq!(saved.results.total_units_per_pallet, 1296.0);
    }

    #[test]
    fn test_save_upserts_per_user() {
        let mut store = store_with_widget();
        let first = store.save_configuration(1, "alice", "A", None, widget_input()).unwrap();
        let created = store.configurations[&first].created;

        let second = store
            .save_configuration(1, "alice", "B", Some("no box".into()), widget_input().without_box())
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(store.configurations.len(), 1);

        let saved = store.configuration_for(1, "alice").unwrap();
        assert_eq!(saved.configuration_name, "B");
        assert_eq!(saved.created, created);
        assert_eq!(saved.results.units_per_box, 1.0);

        store.save_configuration(1, "bob", "C", None, widget_input()).unwrap();
        let users: Vec<&str> = store
            .configurations_for_product(1)
            .iter()
            .map(|c| c.user_id.as_str())
            .collect();
        assert_eq!(users, vec!["alice", "bob"]);
    }

    #[test]
    fn test_save_rejects_blank_name() {
        let mut store = store_with_widget();
        let err = store.save_configuration(1, "alice", "   ", None, widget_input()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(store.configurations.is_empty());
    }

    #[test]
    fn test_save_rejects_unknown_product() {
        let mut store = store_with_widget();
        let err = store.save_configuration(9, "alice", "A", None, widget_input()).unwrap_err();
        assert_eq!(err, CalcError::product_not_found(9));
    }

    #[test]
    fn test_save_rejects_invalid_input() {
        let mut store = store_with_widget();
        let input = ProductData {
            product_width: 0.0,
            ..widget_input()
        };
        let err = store.save_configuration(1, "alice", "A", None, input).unwrap_err();
        assert_eq!(err.fields(), vec!["productWidth"]);
    }

    #[test]
    fn test_seed_input_from_defaults_then_saved() {
        let mut store = store_with_widget();
        store.settings.pallet_length_mm = 1000.0;

        let seeded = store.seed_input(1, "alice").unwrap();
        assert_eq!(seeded.product_cost, 12.5);
        assert_eq!(seeded.pallet_length, 1000.0);
        assert!(seeded.box_width.is_none());

        store.save_configuration(1, "alice", "A", None, widget_input()).unwrap();
        assert_eq!(store.seed_input(1, "alice").unwrap(), widget_input());
        assert_eq!(store.seed_input(1, "bob").unwrap().product_width, 0.0);
    }

    #[test]
    fn test_seed_input_unknown_product() {
        let store = store_with_widget();
        assert_eq!(store.seed_input(2, "alice").unwrap_err().error_code(), "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn test_remove_configuration() {
        let mut store = store_with_widget();
        store.save_configuration(1, "alice", "A", None, widget_input()).unwrap();

        let removed = store.remove_configuration(1, "alice").unwrap();
        assert_eq!(removed.configuration_name, "A");
        assert!(store.configuration_for(1, "alice").is_none());

        let err = store.remove_configuration(1, "alice").unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_NOT_FOUND");
    }

    #[test]
    fn test_store_serialization() {
        let mut store = store_with_widget();
        store.save_configuration(1, "alice", "A", None, widget_input()).unwrap();

        let json = serde_json::to_string_pretty(&store).unwrap();
        assert!(json.contains("\"productWidth\""));
        assert!(json.contains("\"totalUnitsPerPallet\""));

        let roundtrip: PackagingStore = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.products, store.products);
        let saved = roundtrip.configuration_for(1, "alice").unwrap();
        assert_eq!(saved.input, widget_input());
        assert_eq!(saved.results.units_per_box, 27.0);
    }
}
