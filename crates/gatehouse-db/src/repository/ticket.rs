//! # Ticket Repository
//!
//! Database operations for parking tickets.
//!
//! ## Ticket Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Ticket Lifecycle                              │
//! │                                                                     │
//! │  1. ENTRY                                                           │
//! │     └── save() → row with NULL out_time / price                     │
//! │                                                                     │
//! │  2. EXIT                                                            │
//! │     └── update_on_exit() → writes out_time + price, exactly once    │
//! │         (guarded by `out_time IS NULL`, so a closed ticket can      │
//! │          never be re-billed)                                        │
//! │                                                                     │
//! │  3. ARCHIVE                                                         │
//! │     └── rows are kept forever; they drive the loyalty discount      │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use gatehouse_core::ports::{StoreResult, TicketStore};
use gatehouse_core::{ParkingSpot, Ticket, VehicleType};

/// Row shape for the `tickets` table.
///
/// Kept separate from the domain [`Ticket`] because the spot snapshot is
/// flattened into columns.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: String,
    spot_number: u32,
    vehicle_type: VehicleType,
    plate: String,
    in_time: DateTime<Utc>,
    out_time: Option<DateTime<Utc>>,
    price: Option<f64>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            // A spot referenced by a stored ticket was occupied at issuance;
            // the snapshot rebuilds with available = false.
            spot: ParkingSpot::new(row.spot_number, row.vehicle_type, false),
            plate: row.plate,
            in_time: row.in_time,
            out_time: row.out_time,
            price: row.price,
        }
    }
}

const TICKET_COLUMNS: &str = "id, spot_number, vehicle_type, plate, in_time, out_time, price";

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    /// Persists a freshly issued (open) ticket.
    pub async fn save(&self, ticket: &Ticket) -> DbResult<()> {
        debug!(id = %ticket.id, plate = %ticket.plate, "Inserting ticket");

        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, spot_number, vehicle_type, plate,
                in_time, out_time, price, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&ticket.id)
        .bind(ticket.spot.number)
        .bind(ticket.spot.vehicle_type)
        .bind(&ticket.plate)
        .bind(ticket.in_time)
        .bind(ticket.out_time)
        .bind(ticket.price)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Writes out-time and price onto an open ticket.
    ///
    /// ## Returns
    /// * `Ok(true)` - The ticket was closed
    /// * `Ok(false)` - No open ticket matched (already closed, or gone)
    pub async fn update_on_exit(&self, ticket: &Ticket) -> DbResult<bool> {
        debug!(id = %ticket.id, plate = %ticket.plate, "Closing ticket");

        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET out_time = ?2, price = ?3
            WHERE id = ?1 AND out_time IS NULL
            "#,
        )
        .bind(&ticket.id)
        .bind(ticket.out_time)
        .bind(ticket.price)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The most recent open ticket (no out-time) for a plate, if any.
    pub async fn find_open_ticket(&self, plate: &str) -> DbResult<Option<Ticket>> {
        let row: Option<TicketRow> = sqlx::query_as(&format!(
            r#"
            SELECT {TICKET_COLUMNS}
            FROM tickets
            WHERE plate = ?1 AND out_time IS NULL
            ORDER BY in_time DESC
            LIMIT 1
            "#
        ))
        .bind(plate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ticket::from))
    }

    /// Total number of tickets ever issued for a plate, open or closed.
    pub async fn historical_count(&self, plate: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE plate = ?1")
            .bind(plate)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// TicketStore trait impl
// =============================================================================

#[async_trait::async_trait]
impl TicketStore for TicketRepository {
    async fn save(&self, ticket: &Ticket) -> StoreResult<()> {
        Ok(TicketRepository::save(self, ticket).await?)
    }

    async fn update_on_exit(&self, ticket: &Ticket) -> StoreResult<bool> {
        Ok(TicketRepository::update_on_exit(self, ticket).await?)
    }

    async fn find_open_ticket(&self, plate: &str) -> StoreResult<Option<Ticket>> {
        Ok(TicketRepository::find_open_ticket(self, plate).await?)
    }

    async fn historical_count(&self, plate: &str) -> StoreResult<i64> {
        Ok(TicketRepository::historical_count(self, plate).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
