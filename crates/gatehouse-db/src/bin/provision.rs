//! # Spot Pool Provisioner
//!
//! Populates the database with parking spots for a lot.
//!
//! ## Usage
//! ```bash
//! # Provision the default lot (3 car spots, 2 bike spots)
//! cargo run -p gatehouse-db --bin provision
//!
//! # Custom pool sizes
//! cargo run -p gatehouse-db --bin provision -- --cars 20 --bikes 8
//!
//! # Specify database path
//! cargo run -p gatehouse-db --bin provision -- --db ./data/gatehouse.db
//! ```
//!
//! Car spots are numbered first, bike spots follow. Inserts are
//! idempotent: re-running against an existing lot leaves existing spot
//! numbers untouched.

use std::env;

use gatehouse_core::{ParkingSpot, VehicleType};
use gatehouse_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut cars: u32 = 3;
    let mut bikes: u32 = 2;
    let mut db_path = String::from("./gatehouse.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cars" | "-c" => {
                if i + 1 < args.len() {
                    cars = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--bikes" | "-b" => {
                if i + 1 < args.len() {
                    bikes = args[i + 1].parse().unwrap_or(2);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Gatehouse Spot Pool Provisioner");
                println!();
                println!("Usage: provision [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --cars <N>     Number of car spots (default: 3)");
                println!("  -b, --bikes <N>    Number of bike spots (default: 2)");
                println!("  -d, --db <PATH>    Database file path (default: ./gatehouse.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Gatehouse Spot Pool Provisioner");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Car spots: {}", cars);
    println!("Bike spots: {}", bikes);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("* Connected to database");
    println!("* Migrations applied");
    println!();

    let spots = db.spots();
    let mut inserted = 0;

    for number in 1..=cars {
        spots
            .insert(&ParkingSpot::new(number, VehicleType::Car, true))
            .await?;
        inserted += 1;
    }
    for number in (cars + 1)..=(cars + bikes) {
        spots
            .insert(&ParkingSpot::new(number, VehicleType::Bike, true))
            .await?;
        inserted += 1;
    }

    println!("* Provisioned {} spots", inserted);

    let free_cars = spots.available_count(VehicleType::Car).await?;
    let free_bikes = spots.available_count(VehicleType::Bike).await?;
    println!();
    println!("Free car spots:  {}", free_cars);
    println!("Free bike spots: {}", free_bikes);
    println!();
    println!("* Provision complete");

    Ok(())
}
