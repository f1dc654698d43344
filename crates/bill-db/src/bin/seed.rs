//! # Seed Data Generator
//!
//! Populates the database with sample reference data for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./bill_dev.db
//! cargo run -p bill-db --bin seed
//!
//! # Specify database path
//! cargo run -p bill-db --bin seed -- --db ./data/bill.db
//! ```
//!
//! ## Generated Data
//! - A handful of companies, each with a few product types
//! - Clients to bill
//! - Catalog items, each classified by one of the types
//!
//! Invoices are not generated; create them through the API.

use bill_core::{Client, Company, Item, Money, ProductType};
use bill_db::{Database, DbConfig, Repository};
use std::env;

/// Companies and the product types they own.
const COMPANIES: &[(&str, &[&str])] = &[
    ("Northwind Traders", &["Beverages", "Condiments", "Confections"]),
    ("Contoso Hardware", &["Fasteners", "Hand Tools", "Power Tools"]),
    ("Fabrikam Services", &["Consulting", "Installation", "Support"]),
];

/// Catalog items per type: (name, list price in cents).
const ITEMS: &[(&str, &[(&str, i64)])] = &[
    ("Beverages", &[("Green Tea 500ml", 250), ("Sparkling Water 1l", 180)]),
    ("Condiments", &[("Chili Sauce", 420), ("Mustard Jar", 310)]),
    ("Confections", &[("Dark Chocolate Bar", 399)]),
    ("Fasteners", &[("Hex Bolt M8", 35), ("Wood Screw 4x40", 8)]),
    ("Hand Tools", &[("Claw Hammer", 1899), ("Screwdriver Set", 2450)]),
    ("Power Tools", &[("Cordless Drill", 8999)]),
    ("Consulting", &[("Consulting Hour", 12000)]),
    ("Installation", &[("On-site Installation", 7500)]),
    ("Support", &[("Support Plan (monthly)", 4900)]),
];

const CLIENTS: &[&str] = &[
    "Alfreds Futterkiste",
    "Bon App",
    "Ernst Handel",
    "Island Trading",
    "Wide World Importers",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bill_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bill System Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bill_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Bill System Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let mut uow = db.unit_of_work().await?;

    let existing = uow.companies().count().await? + uow.clients().count().await?;
    if existing > 0 {
        println!("⚠ Database already has reference data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut type_ids: Vec<(&str, String)> = Vec::new();

    for (company_name, type_names) in COMPANIES {
        let company = Company::new(*company_name);
        uow.companies().add(&company).await?;

        for type_name in type_names.iter() {
            let ty = ProductType::new(
                *type_name,
                Some(format!("{} range", company_name)),
                company.id.clone(),
            );
            uow.types().add(&ty).await?;
            type_ids.push((*type_name, ty.id));
        }
    }

    let mut item_count = 0;
    for (type_name, items) in ITEMS {
        let type_id = type_ids
            .iter()
            .find(|(name, _)| name == type_name)
            .map(|(_, id)| id.clone());

        for (name, price_cents) in items.iter() {
            let item = Item::new(*name, Money::from_cents(*price_cents), type_id.clone());
            uow.items().add(&item).await?;
            item_count += 1;
        }
    }

    for name in CLIENTS {
        uow.clients().add(&Client::new(*name)).await?;
    }

    uow.complete().await?;

    println!();
    println!("✓ {} companies", COMPANIES.len());
    println!("✓ {} types", type_ids.len());
    println!("✓ {} catalog items", item_count);
    println!("✓ {} clients", CLIENTS.len());
    println!();
    println!("✓ Seed complete!");

    db.close().await;

    Ok(())
}
