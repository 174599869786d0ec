//! # Packwise CLI Application
//!
//! Command-line front-end for the packaging calculation engine: one-off
//! calculations from JSON input files and a small file-backed catalog of
//! saved configurations.

mod cli;
mod logger;
mod report;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use pack_core::calculations::{calculate, ProductData};
use pack_core::errors::CalcError;
use pack_core::file_io::{load_store, load_store_with_lock_check, save_store, FileLock};
use pack_core::settings::PackagingDefaults;
use pack_core::store::{PackagingStore, Product};

use cli::{CalculateArgs, Cli, Command, StoreCommand};
use report::{print_configuration, CalculationReport};

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!("command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        if let Some(calc_error) = e.downcast_ref::<CalcError>() {
            if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let defaults = match &cli.settings {
        Some(path) => PackagingDefaults::from_file(path)?,
        None => PackagingDefaults::default(),
    };

    match cli.command {
        Command::Calculate(args) => run_calculate(&args, &defaults),
        Command::Demo => run_demo(&defaults),
        Command::Store(command) => run_store(command, &defaults),
    }
}

fn read_input(path: &Path) -> Result<ProductData> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading input {}", path.display()))?;
    let input = serde_json::from_str(&content).map_err(|e| {
        CalcError::serialization(format!("Invalid ProductData in {}: {}", path.display(), e))
    })?;
    Ok(input)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run_calculate(args: &CalculateArgs, defaults: &PackagingDefaults) -> Result<()> {
    let input = read_input(&args.input)?;
    let results = calculate(&input)?;
    let start = args.start.unwrap_or_else(today);
    let report = CalculationReport::build(input, results, start, &defaults.truck_bed);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

fn run_demo(defaults: &PackagingDefaults) -> Result<()> {
    let input = ProductData {
        box_width: Some(300.0),
        box_length: Some(450.0),
        box_height: Some(150.0),
        box_weight: Some(0.1),
        box_cost: Some(1.2),
        ..ProductData::new(100.0, 150.0, 50.0, 0.5, 12.5)
    };

    println!("Packwise - Packaging & Palletizing Calculator");
    println!("=============================================");
    println!();
    println!("Reference scenario: 100x150x50 mm product in a 300x450x150 mm box");
    println!();

    let results = calculate(&input)?;
    let report = CalculationReport::build(input, results, today(), &defaults.truck_bed);
    report.print();

    println!();
    println!("JSON Output (for API use):");
    println!("{}", serde_json::to_string_pretty(&report.results)?);
    Ok(())
}

fn run_store(command: StoreCommand, defaults: &PackagingDefaults) -> Result<()> {
    match command {
        StoreCommand::Init { path, owner } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            let mut store = PackagingStore::new(owner);
            store.settings = defaults.clone();
            save_store(&store, &path)?;
            println!("Created {}", path.display());
        }

        StoreCommand::AddProduct {
            path,
            id,
            sku,
            name,
            base_price,
        } => {
            let mut store = load_store(&path)?;
            let replaced = store.add_product(Product::new(id, sku, name, base_price))?;
            save_store(&store, &path)?;
            let verb = if replaced.is_some() { "Replaced" } else { "Added" };
            println!("{} product {}", verb, id);
        }

        StoreCommand::Save {
            path,
            product,
            user,
            name,
            input,
            notes,
            by,
        } => {
            let data = read_input(&input)?;
            let _lock = FileLock::acquire(&path, by)?;
            let mut store = load_store(&path)?;
            let id = store.save_configuration(product, user.as_str(), &name, notes, data)?;
            save_store(&store, &path)?;

            if let Some(saved) = store.configuration_for(product, &user) {
                print_configuration(saved);
            }
            println!("Saved configuration {}", id);
        }

        StoreCommand::Show { path, product, user } => {
            let (store, lock) = load_store_with_lock_check(&path)?;
            if let Some(info) = lock {
                println!("Note: {} is being edited by {}", path.display(), info.holder());
            }

            let item = store.product(product).ok_or_else(|| CalcError::product_not_found(product))?;
            println!("{} {} ({:.2} per {})", item.sku, item.name, item.base_price, item.unit_of_measure);

            match user {
                Some(user) => {
                    let saved = store
                        .configuration_for(product, &user)
                        .ok_or_else(|| CalcError::ConfigurationNotFound {
                            product_id: product,
                            user,
                        })?;
                    print_configuration(saved);
                }
                None => {
                    let all = store.configurations_for_product(product);
                    if all.is_empty() {
                        println!("No saved configurations");
                    }
                    for saved in all {
                        print_configuration(saved);
                    }
                }
            }
        }

        StoreCommand::Seed { path, product, user } => {
            let store = load_store(&path)?;
            let seeded = store.seed_input(product, &user)?;
            println!("{}", serde_json::to_string_pretty(&seeded)?);
        }
    }
    Ok(())
}
