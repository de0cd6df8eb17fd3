//! # Repository Module
//!
//! Database repository implementations for Gatehouse.
//!
//! ## Repository Pattern
//! Each repository wraps the shared pool and isolates SQL in one place.
//! Both also implement the matching `gatehouse-core` store trait, so the
//! workflow layer can be tested against fakes and run against SQLite.
//!
//! ## Available Repositories
//!
//! - [`spot::SpotRepository`] - Spot pool queries and atomic allocation
//! - [`ticket::TicketRepository`] - Ticket lifecycle operations

pub mod spot;
pub mod ticket;
