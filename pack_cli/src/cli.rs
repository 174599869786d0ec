use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Packaging and palletizing calculator.
#[derive(Debug, Parser)]
#[command(name = "packwise", version, about = "Packaging and palletizing calculator")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with a [defaults] table overriding the built-in defaults
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate a packaging configuration from a JSON input file
    Calculate(CalculateArgs),

    /// Run the built-in reference scenario
    Demo,

    /// Manage a product catalog and saved configurations
    #[command(subcommand)]
    Store(StoreCommand),
}

#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// ProductData JSON file
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// First production day for the timeline (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    /// Print a single JSON document instead of the report
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Create an empty store file
    Init {
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        #[arg(long)]
        owner: String,
    },

    /// Add or replace a catalog product
    AddProduct {
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        #[arg(long)]
        id: u64,

        #[arg(long)]
        sku: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        base_price: f64,
    },

    /// Calculate and save a configuration for a product
    Save {
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        #[arg(long)]
        product: u64,

        #[arg(long, default_value = "default")]
        user: String,

        /// Configuration name
        #[arg(long)]
        name: String,

        /// ProductData JSON file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        #[arg(long)]
        notes: Option<String>,

        /// Who holds the edit lock while saving
        #[arg(long)]
        by: String,
    },

    /// Show saved configurations for a product
    Show {
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        #[arg(long)]
        product: u64,

        /// Only this user's configuration
        #[arg(long)]
        user: Option<String>,
    },

    /// Print the starting input for editing a product's configuration
    Seed {
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        #[arg(long)]
        product: u64,

        #[arg(long, default_value = "default")]
        user: String,
    },
}
