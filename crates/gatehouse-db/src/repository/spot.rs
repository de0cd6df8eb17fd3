//! # Spot Repository
//!
//! Database operations for the parking-spot pool.
//!
//! ## Atomic Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     How allocate() Works                            │
//! │                                                                     │
//! │  BEGIN TRANSACTION                                                  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SELECT lowest spot_number WHERE vehicle_type = ? AND available     │
//! │       │                                                             │
//! │       ├── none ──► ROLLBACK, return None (pool unchanged)           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  UPDATE parking_spots SET available = 0 WHERE spot_number = ?       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  COMMIT ──► return the claimed spot                                 │
//! │                                                                     │
//! │  Lookup and claim share one transaction, so two operators can       │
//! │  never be handed the same spot.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use gatehouse_core::ports::{SpotStore, StoreResult};
use gatehouse_core::{ParkingSpot, VehicleType};

/// Repository for spot pool database operations.
#[derive(Debug, Clone)]
pub struct SpotRepository {
    pool: SqlitePool,
}

impl SpotRepository {
    /// Creates a new SpotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SpotRepository { pool }
    }

    /// Atomically claims the lowest-numbered available spot of a category.
    ///
    /// ## Returns
    /// * `Ok(Some(spot))` - Spot claimed (marked occupied)
    /// * `Ok(None)` - No free spot of that category; nothing changed
    pub async fn allocate(&self, vehicle_type: VehicleType) -> DbResult<Option<ParkingSpot>> {
        debug!(%vehicle_type, "Allocating spot");

        let mut tx = self.pool.begin().await?;

        let spot_number: Option<u32> = sqlx::query_scalar(
            r#"
            SELECT spot_number
            FROM parking_spots
            WHERE vehicle_type = ?1 AND available = 1
            ORDER BY spot_number
            LIMIT 1
            "#,
        )
        .bind(vehicle_type)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(number) = spot_number else {
            // Dropping the transaction rolls back; nothing was written.
            return Ok(None);
        };

        sqlx::query("UPDATE parking_spots SET available = 0 WHERE spot_number = ?1")
            .bind(number)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(spot = number, "Spot claimed");
        Ok(Some(ParkingSpot::new(number, vehicle_type, false)))
    }

    /// Lowest available spot number of a category, without claiming it.
    ///
    /// Read-only; prefer [`SpotRepository::allocate`] when the caller
    /// intends to occupy the spot.
    pub async fn next_available(&self, vehicle_type: VehicleType) -> DbResult<Option<u32>> {
        let spot_number: Option<u32> = sqlx::query_scalar(
            r#"
            SELECT spot_number
            FROM parking_spots
            WHERE vehicle_type = ?1 AND available = 1
            ORDER BY spot_number
            LIMIT 1
            "#,
        )
        .bind(vehicle_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(spot_number)
    }

    /// Sets the availability flag of one spot.
    ///
    /// The category is part of the match: a number/category mismatch means
    /// the caller's snapshot is corrupt and surfaces as NotFound.
    pub async fn set_availability(
        &self,
        spot_number: u32,
        vehicle_type: VehicleType,
        available: bool,
    ) -> DbResult<()> {
        debug!(spot = spot_number, available, "Updating spot availability");

        let result = sqlx::query(
            r#"
            UPDATE parking_spots
            SET available = ?3
            WHERE spot_number = ?1 AND vehicle_type = ?2
            "#,
        )
        .bind(spot_number)
        .bind(vehicle_type)
        .bind(available)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ParkingSpot", spot_number.to_string()));
        }

        Ok(())
    }

    /// Number of free spots of the given category.
    pub async fn available_count(&self, vehicle_type: VehicleType) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM parking_spots WHERE vehicle_type = ?1 AND available = 1",
        )
        .bind(vehicle_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Inserts a spot into the pool (provisioning only).
    ///
    /// Existing spot numbers are left untouched so provisioning is
    /// idempotent.
    pub async fn insert(&self, spot: &ParkingSpot) -> DbResult<()> {
        debug!(spot = spot.number, vehicle_type = %spot.vehicle_type, "Provisioning spot");

        sqlx::query(
            r#"
            INSERT OR IGNORE INTO parking_spots (spot_number, vehicle_type, available)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(spot.number)
        .bind(spot.vehicle_type)
        .bind(spot.available)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// SpotStore trait impl
// =============================================================================

#[async_trait::async_trait]
impl SpotStore for SpotRepository {
    async fn allocate(&self, vehicle_type: VehicleType) -> StoreResult<Option<ParkingSpot>> {
        Ok(SpotRepository::allocate(self, vehicle_type).await?)
    }

    async fn set_availability(
        &self,
        spot_number: u32,
        vehicle_type: VehicleType,
        available: bool,
    ) -> StoreResult<()> {
        Ok(SpotRepository::set_availability(self, spot_number, vehicle_type, available).await?)
    }

    async fn available_count(&self, vehicle_type: VehicleType) -> StoreResult<i64> {
        Ok(SpotRepository::available_count(self, vehicle_type).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn allocate_claims_lowest_spot_and_marks_it_occupied() {
        let db = test_db().await;
        let repo = db.spots();

        let spot = repo.allocate(VehicleType::Car).await.unwrap().unwrap();
        assert_eq!(spot.number, 1);
        assert!(!spot.available);

        // The claim is persisted: the next free car spot is number 2.
        assert_eq!(repo.next_available(VehicleType::Car).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn sequential_allocations_claim_distinct_spots() {
        let db = test_db().await;
        let repo = db.spots();

        let first = repo.allocate(VehicleType::Bike).await.unwrap().unwrap();
        let second = repo.allocate(VehicleType::Bike).await.unwrap().unwrap();

        assert_ne!(first.number, second.number);
        // Seed pool has two bike spots, both now taken.
        assert_eq!(repo.allocate(VehicleType::Bike).await.unwrap(), None);
    }

    #[tokio::test]
    async fn exhausted_pool_returns_none_and_changes_nothing() {
        let db = test_db().await;
        let repo = db.spots();

        repo.allocate(VehicleType::Bike).await.unwrap().unwrap();
        repo.allocate(VehicleType::Bike).await.unwrap().unwrap();

        let before: i64 = sqlx::query_scalar("SELECT SUM(available) FROM parking_spots")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(repo.allocate(VehicleType::Bike).await.unwrap(), None);

        let after: i64 = sqlx::query_scalar("SELECT SUM(available) FROM parking_spots")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn other_category_has_no_pool() {
        let db = test_db().await;
        let repo = db.spots();

        assert_eq!(repo.allocate(VehicleType::Other).await.unwrap(), None);
        assert_eq!(repo.available_count(VehicleType::Other).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn release_makes_spot_allocatable_again() {
        let db = test_db().await;
        let repo = db.spots();

        let spot = repo.allocate(VehicleType::Car).await.unwrap().unwrap();
        repo.set_availability(spot.number, spot.vehicle_type, true)
            .await
            .unwrap();

        let again = repo.allocate(VehicleType::Car).await.unwrap().unwrap();
        assert_eq!(again.number, spot.number);
    }

    #[tokio::test]
    async fn set_availability_rejects_unknown_spot() {
        let db = test_db().await;
        let repo = db.spots();

        let err = repo
            .set_availability(99, VehicleType::Car, true)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn set_availability_rejects_category_mismatch() {
        let db = test_db().await;
        let repo = db.spots();

        // Spot 1 is a car spot; releasing it as a bike spot is corruption.
        let err = repo
            .set_availability(1, VehicleType::Bike, true)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn available_count_tracks_allocation() {
        let db = test_db().await;
        let repo = db.spots();

        assert_eq!(repo.available_count(VehicleType::Car).await.unwrap(), 3);
        repo.allocate(VehicleType::Car).await.unwrap().unwrap();
        assert_eq!(repo.available_count(VehicleType::Car).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn insert_is_idempotent() {
        let db = test_db().await;
        let repo = db.spots();

        let spot = ParkingSpot::new(10, VehicleType::Car, true);
        repo.insert(&spot).await.unwrap();
        repo.insert(&spot).await.unwrap();

        assert_eq!(repo.available_count(VehicleType::Car).await.unwrap(), 4);
    }
}
