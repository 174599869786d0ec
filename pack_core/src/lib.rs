//! # pack_core - Packaging & Palletizing Calculation Engine
//!
//! `pack_core` answers the questions a packaging planner asks before a
//! production run: how many units fit in a box, how many boxes per pallet
//! layer, how many layers per pallet, and what the demand costs, weighs and
//! takes to produce. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: The engine is a pure function of its input
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Every invalid field is reported, not just the first
//!
//! ## Quick Start
//!
//! ```rust
//! use pack_core::calculations::{calculate, ProductData};
//!
//! let input = ProductData {
//!     box_width: Some(300.0),
//!     box_length: Some(450.0),
//!     box_height: Some(150.0),
//!     ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
//! };
//!
//! let results = calculate(&input).unwrap();
//! assert_eq!(results.layers_per_pallet, 12.0);
//!
//! let json = serde_json::to_string_pretty(&results).unwrap();
//! assert!(json.contains("\"unitsPerBox\""));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Packaging engine and projections (timeline, truck, insights, analytics)
//! - [`store`] - Product catalog and saved configurations
//! - [`file_io`] - File operations with atomic saves and locking
//! - [`settings`] - Seed values for new inputs
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod settings;
pub mod store;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, compute, CalculationResults, ProductData};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_store, save_store, FileLock};
pub use settings::PackagingDefaults;
pub use store::{PackagingStore, Product, SavedConfiguration};
