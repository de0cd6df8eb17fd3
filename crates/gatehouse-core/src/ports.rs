//! # Collaborator Contracts
//!
//! Trait seams between the workflow layer and its external collaborators:
//! the persisted spot pool, the ticket store, and the operator prompt.
//!
//! The storage traits are async and return boxed errors so the workflow
//! layer stays agnostic of the backing store (SQLite in production,
//! in-memory fakes in tests).

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{ParkingSpot, Ticket, VehicleType};

/// Boxed storage error; the service layer reports it, it never inspects it.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Spot Store
// =============================================================================

/// Access to the persisted spot pool.
///
/// Spots are pre-provisioned: implementations never create spots on demand,
/// they only toggle availability.
#[async_trait]
pub trait SpotStore: Send + Sync {
    /// Atomically claims the lowest-numbered available spot of the given
    /// category: the lookup and the mark-occupied write happen in one
    /// transaction, so two concurrent operators can never double-book.
    ///
    /// Returns `None` when the pool has no free spot of that category,
    /// leaving the pool unchanged.
    async fn allocate(&self, vehicle_type: VehicleType) -> StoreResult<Option<ParkingSpot>>;

    /// Sets the availability flag of one spot.
    ///
    /// Used to release a spot at vehicle exit (and to roll back a claim
    /// when entry-side persistence fails).
    async fn set_availability(
        &self,
        spot_number: u32,
        vehicle_type: VehicleType,
        available: bool,
    ) -> StoreResult<()>;

    /// Number of free spots of the given category (status display).
    async fn available_count(&self, vehicle_type: VehicleType) -> StoreResult<i64>;
}

// =============================================================================
// Ticket Store
// =============================================================================

/// Access to persisted parking tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Persists a freshly issued (open) ticket.
    async fn save(&self, ticket: &Ticket) -> StoreResult<()>;

    /// Writes out-time and price onto an open ticket.
    ///
    /// Returns `false` when no open ticket matched (already closed, or
    /// gone); the caller decides how to recover.
    async fn update_on_exit(&self, ticket: &Ticket) -> StoreResult<bool>;

    /// The most recent open ticket (no out-time) for a plate, if any.
    async fn find_open_ticket(&self, plate: &str) -> StoreResult<Option<Ticket>>;

    /// Total number of tickets ever issued for a plate, open or closed.
    ///
    /// Drives loyalty-discount eligibility.
    async fn historical_count(&self, plate: &str) -> StoreResult<i64>;
}

// =============================================================================
// Operator Prompt
// =============================================================================

/// Errors raised while reading operator input.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The entered plate failed validation.
    #[error("invalid plate number: {0}")]
    InvalidPlate(#[from] crate::error::ValidationError),

    /// The input stream ended.
    #[error("input stream closed")]
    Closed,

    /// Underlying I/O failure.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Console-facing input collaborator.
///
/// Kept synchronous: the workflow is a single-operator sequential loop and
/// stdin reads block by design.
pub trait OperatorPrompt: Send {
    /// Asks the operator to pick a vehicle category.
    ///
    /// Returns `None` for a selection outside the menu; the workflow
    /// treats that as a graceful no-op, not a failure.
    fn select_vehicle_category(&mut self) -> Option<VehicleType>;

    /// Asks the operator for the vehicle registration number.
    ///
    /// Implementations return the validated, normalized plate.
    fn read_plate_number(&mut self) -> Result<String, PromptError>;
}
