//! # gatehouse-db: Database Layer for Gatehouse
//!
//! SQLite persistence for the parking lot: the spot pool and the ticket
//! ledger, behind repositories implementing the core store traits.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (spots, tickets)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatehouse_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/gatehouse.db");
//! let db = Database::new(config).await?;
//!
//! // Repositories implement the gatehouse-core store traits
//! let spot = db.spots().allocate(VehicleType::Car).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::spot::SpotRepository;
pub use repository::ticket::TicketRepository;
