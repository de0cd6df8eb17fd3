//! # Domain Types
//!
//! Core domain types used throughout Gatehouse.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │  ParkingSpot    │   │     Ticket      │   │   VehicleType   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  number (u32)   │   │  id (UUID)      │   │  Car            │   │
//! │  │  vehicle_type   │   │  spot (snapshot)│   │  Bike           │   │
//! │  │  available      │   │  plate          │   │  Other          │   │
//! │  └─────────────────┘   │  in/out_time    │   └─────────────────┘   │
//! │                        │  price          │                          │
//! │                        └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A ticket embeds the spot as it was at issuance. Tickets are billing
//! records: later changes to the pool must not rewrite parking history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Vehicle Type
// =============================================================================

/// The category of vehicle a spot accepts.
///
/// ## Why a Closed Enum?
/// The fare table is fixed and exhaustive-match keeps every billing path
/// honest: adding a category without a rate fails to compile.
///
/// `Other` marks a spot whose stored category is unrecognized. It can be
/// decoded from storage but is never allocatable or billable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    /// Passenger car.
    Car,
    /// Bike / motorcycle.
    Bike,
    /// Unrecognized category marker (data corruption guard).
    Other,
}

impl VehicleType {
    /// Maps an operator menu selection to a category.
    ///
    /// ## Menu
    /// ```text
    /// 1 - CAR
    /// 2 - BIKE
    /// ```
    ///
    /// Anything outside the menu yields `None`: a user-input edge case
    /// handled gracefully, not an error.
    pub fn from_selection(selection: i64) -> Option<VehicleType> {
        match selection {
            1 => Some(VehicleType::Car),
            2 => Some(VehicleType::Bike),
            _ => None,
        }
    }

    /// Returns the configured hourly rate, or `None` for categories
    /// without a fare table entry.
    pub fn hourly_rate(&self) -> Option<f64> {
        match self {
            VehicleType::Car => Some(crate::CAR_RATE_PER_HOUR),
            VehicleType::Bike => Some(crate::BIKE_RATE_PER_HOUR),
            VehicleType::Other => None,
        }
    }

    /// Stable storage/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "CAR",
            VehicleType::Bike => "BIKE",
            VehicleType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Parking Spot
// =============================================================================

/// A physical parking slot, typed by vehicle category.
///
/// ## Invariants
/// - `number` is a positive integer, unique within the pool
/// - the category never changes after creation
/// - availability toggles only through allocation and release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Spot number (identity within the pool).
    pub number: u32,

    /// Category of vehicle this spot accepts. Fixed at creation.
    pub vehicle_type: VehicleType,

    /// Whether the spot is currently free.
    pub available: bool,
}

impl ParkingSpot {
    /// Creates a spot.
    pub fn new(number: u32, vehicle_type: VehicleType, available: bool) -> Self {
        ParkingSpot {
            number,
            vehicle_type,
            available,
        }
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// The record of one parking session, from entry to (eventually) exit
/// and billing.
///
/// ## Lifecycle
/// ```text
/// entry: Ticket { in_time: now, out_time: None, price: None }
///   │
///   ▼
/// exit:  Ticket { out_time: Some(now), price: Some(fare) }   (written once)
/// ```
///
/// ## Invariants
/// - `out_time`, when present, never precedes `in_time`
/// - `price` is defined only after `out_time` is set
/// - tickets are never deleted by the core (archival is a storage concern)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Spot as it was at issuance (snapshot, see module docs).
    pub spot: ParkingSpot,

    /// Vehicle registration number.
    pub plate: String,

    /// When the vehicle entered the lot.
    pub in_time: DateTime<Utc>,

    /// When the vehicle left. `None` while parked.
    pub out_time: Option<DateTime<Utc>>,

    /// Computed fare. `None` while parked.
    pub price: Option<f64>,
}

impl Ticket {
    /// Creates an open ticket for a vehicle entering the lot.
    pub fn open(spot: ParkingSpot, plate: impl Into<String>, in_time: DateTime<Utc>) -> Self {
        Ticket {
            id: Uuid::new_v4().to_string(),
            spot,
            plate: plate.into(),
            in_time,
            out_time: None,
            price: None,
        }
    }

    /// Whether the session is still in progress.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Session duration in milliseconds, if the ticket is closed.
    pub fn duration_ms(&self) -> Option<i64> {
        self.out_time
            .map(|out| out.signed_duration_since(self.in_time).num_milliseconds())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
