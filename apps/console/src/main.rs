//! # Gatehouse Operator Console
//!
//! Interactive terminal for the parking-lot operator.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Operator Console                               │
//! │                                                                     │
//! │  stdin ───► menu loop ───► ParkingService ───► SQLite              │
//! │                                  │                                  │
//! │                                  ▼                                  │
//! │                           fare / outcomes                           │
//! │                            (stdout)                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! - `GATEHOUSE_DB` - database file path (default: `./gatehouse.db`)
//! - `RUST_LOG` - tracing filter (default: `info`)

mod prompt;

use std::io::{self, Write};

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gatehouse_db::{Database, DbConfig};
use gatehouse_service::{EntryOutcome, ExitOutcome, ParkingService};

use crate::prompt::StdinPrompt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let db_path = std::env::var("GATEHOUSE_DB").unwrap_or_else(|_| "./gatehouse.db".to_string());
    info!(path = %db_path, "Starting Gatehouse operator console");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .context("failed to open database")?;

    let mut service = ParkingService::new(StdinPrompt::stdin(), db.spots(), db.tickets());

    println!("Welcome to Gatehouse!");

    let stdin = io::stdin();
    loop {
        println!();
        println!("Please select an option. Simply enter the number to choose an action");
        println!("1 New Vehicle Entering - Allocate Parking Space");
        println!("2 Vehicle Exiting - Generate Ticket Price");
        println!("3 Show Available Spots");
        println!("4 Shutdown System");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "1" => match service.process_incoming_vehicle().await {
                Ok(EntryOutcome::Parked { ticket, recurring }) => {
                    if recurring {
                        println!(
                            "Welcome back! As a recurring user of our parking lot, \
                             you'll benefit from a 5% discount."
                        );
                    }
                    println!("Generated Ticket and saved in DB");
                    println!(
                        "Please park your vehicle in spot number: {}",
                        ticket.spot.number
                    );
                    println!(
                        "Recorded in-time for vehicle number {} is: {}",
                        ticket.plate, ticket.in_time
                    );
                }
                Ok(EntryOutcome::LotFull { vehicle_type }) => {
                    println!("Sorry, no {} spot is currently available.", vehicle_type);
                }
                Ok(EntryOutcome::InvalidVehicleType) => {
                    println!("Incorrect input provided. Please select 1 or 2.");
                }
                Err(err) => {
                    error!(%err, "entry workflow failed");
                    println!("Unable to process incoming vehicle");
                }
            },
            "2" => match service.process_exiting_vehicle().await {
                Ok(ExitOutcome::Charged { ticket, discounted }) => {
                    let price = ticket.price.unwrap_or(0.0);
                    if discounted {
                        println!("Loyalty discount applied.");
                    }
                    println!("Please pay the parking fare: {:.2}", price);
                    if let Some(out_time) = ticket.out_time {
                        println!(
                            "Recorded out-time for vehicle number {} is: {}",
                            ticket.plate, out_time
                        );
                    }
                }
                Ok(ExitOutcome::NoOpenTicket { plate }) => {
                    println!("No open ticket found for vehicle number {}", plate);
                }
                Ok(ExitOutcome::UpdateFailed { plate }) => {
                    println!(
                        "Unable to update ticket for vehicle number {}. \
                         Please see a parking attendant.",
                        plate
                    );
                }
                Err(err) => {
                    error!(%err, "exit workflow failed");
                    println!("Unable to process exiting vehicle");
                }
            },
            "3" => match service.lot_status().await {
                Ok(status) => {
                    println!("Free car spots:  {}", status.free_car_spots);
                    println!("Free bike spots: {}", status.free_bike_spots);
                }
                Err(err) => {
                    error!(%err, "status query failed");
                    println!("Unable to read lot status");
                }
            },
            "4" => break,
            other => {
                println!("Unsupported option {:?}. Please enter a number from 1 to 4.", other);
            }
        }
    }

    println!("Exiting from the system!");
    db.close().await;

    Ok(())
}
