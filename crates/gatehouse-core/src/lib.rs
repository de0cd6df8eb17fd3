//! # gatehouse-core: Pure Business Logic for Gatehouse
//!
//! This crate is the **heart** of Gatehouse. It contains all parking-lot
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Gatehouse Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  Operator Console (apps/console)              │ │
//! │  │    category menu ──► plate prompt ──► fare display            │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │              gatehouse-service (workflows)                    │ │
//! │  │    process_incoming_vehicle, process_exiting_vehicle          │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │              ★ gatehouse-core (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │   ┌──────────┐  ┌──────────┐  ┌────────────┐  ┌───────────┐  │ │
//! │  │   │  types   │  │   fare   │  │ validation │  │   ports   │  │ │
//! │  │   │  Spot    │  │ FareCalc │  │   rules    │  │  traits   │  │ │
//! │  │   │  Ticket  │  │ discount │  │   checks   │  │  (seams)  │  │ │
//! │  │   └──────────┘  └──────────┘  └────────────┘  └───────────┘  │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO PROMPTS • PURE FUNCTIONS          │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                 gatehouse-db (Database Layer)                 │ │
//! │  │            SQLite queries, migrations, repositories           │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (VehicleType, ParkingSpot, Ticket)
//! - [`fare`] - Fare calculation (grace period, hourly rates, discount)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`ports`] - Storage and prompt collaborator contracts
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every fare computation is deterministic
//! 2. **No I/O**: Database, prompt and file system access is FORBIDDEN here
//! 3. **Closed Categories**: Vehicle categories are a closed enum so the
//!    fare table is exhaustively matched at compile time
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fare;
pub mod ports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gatehouse_core::Ticket` instead of
// `use gatehouse_core::types::Ticket`.

pub use error::{CoreError, CoreResult, ValidationError};
pub use fare::calculate_fare;
pub use ports::{OperatorPrompt, PromptError, SpotStore, StoreError, StoreResult, TicketStore};
pub use types::{ParkingSpot, Ticket, VehicleType};
pub use validation::validate_plate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hourly rate for cars.
pub const CAR_RATE_PER_HOUR: f64 = 1.5;

/// Hourly rate for bikes/motorcycles.
pub const BIKE_RATE_PER_HOUR: f64 = 1.0;

/// Grace period in milliseconds: any stay shorter than this is free,
/// regardless of vehicle category.
pub const FREE_PARKING_DURATION_MS: i64 = 30 * 60 * 1000;

/// Loyalty discount factor applied to the standard price for recurring
/// vehicles (5% off).
pub const LOYALTY_DISCOUNT_FACTOR: f64 = 0.95;

/// Milliseconds per hour, used to convert stay duration into billed hours.
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Maximum accepted length of a vehicle registration number.
///
/// ## Business Reason
/// Registration plates worldwide fit comfortably under this bound; anything
/// longer is operator input error.
pub const MAX_PLATE_LENGTH: usize = 20;
