//! # Fare Calculation
//!
//! Pure fare computation for a parking session.
//!
//! ## Billing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Fare Calculation                             │
//! │                                                                     │
//! │  duration = out_time − in_time (milliseconds)                       │
//! │       │                                                             │
//! │       ├── duration < 30 min ──► price = 0 (grace period)            │
//! │       │                                                             │
//! │       └── otherwise ──► price = duration_hours × rate(category)     │
//! │                              │                                      │
//! │                              │  rate(CAR)  = 1.5 / hour             │
//! │                              │  rate(BIKE) = 1.0 / hour             │
//! │                              │  rate(other) = error                 │
//! │                              ▼                                      │
//! │            loyalty discount? ──► price × 0.95                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Numeric Semantics
//! Prices are computed in floating-point hours (`duration_ms / 3_600_000.0 ×
//! rate`) with no rounding beyond natural float precision. Callers may round
//! for display only.

use crate::error::{CoreError, CoreResult};
use crate::types::Ticket;
use crate::{FREE_PARKING_DURATION_MS, LOYALTY_DISCOUNT_FACTOR, MILLIS_PER_HOUR};

/// Computes the fare for a closed parking session.
///
/// ## Arguments
/// * `ticket` - The session to bill. `None` is rejected with a distinct
///   error so callers that lost the ticket fail loudly.
/// * `apply_discount` - Apply the 5% loyalty discount to the standard price.
///
/// ## Errors
/// * [`CoreError::TicketRequired`] - no ticket was supplied
/// * [`CoreError::InvalidOutTime`] - out-time missing or before in-time
/// * [`CoreError::UnknownParkingType`] - spot category has no configured rate
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use gatehouse_core::{calculate_fare, ParkingSpot, Ticket, VehicleType};
///
/// let spot = ParkingSpot::new(1, VehicleType::Car, false);
/// let in_time = Utc::now() - Duration::hours(1);
/// let mut ticket = Ticket::open(spot, "ABCDEF", in_time);
/// ticket.out_time = Some(Utc::now());
///
/// let price = calculate_fare(Some(&ticket), false).unwrap();
/// assert!((price - 1.5).abs() < 1e-3);
/// ```
pub fn calculate_fare(ticket: Option<&Ticket>, apply_discount: bool) -> CoreResult<f64> {
    let ticket = ticket.ok_or(CoreError::TicketRequired)?;

    let out_time = match ticket.out_time {
        Some(out) if out >= ticket.in_time => out,
        other => return Err(CoreError::InvalidOutTime { out_time: other }),
    };

    let duration_ms = out_time
        .signed_duration_since(ticket.in_time)
        .num_milliseconds();

    // Grace period: the first 30 minutes of any session are free. The
    // discount only ever applies to the standard computation, so a zero
    // grace price stays exactly zero.
    if duration_ms < FREE_PARKING_DURATION_MS {
        return Ok(0.0);
    }

    let rate = ticket
        .spot
        .vehicle_type
        .hourly_rate()
        .ok_or(CoreError::UnknownParkingType)?;

    let standard_price = duration_ms as f64 / MILLIS_PER_HOUR * rate;

    if apply_discount {
        Ok(standard_price * LOYALTY_DISCOUNT_FACTOR)
    } else {
        Ok(standard_price)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
