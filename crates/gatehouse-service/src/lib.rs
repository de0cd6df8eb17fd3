//! # gatehouse-service: Parking Workflows
//!
//! Entry and exit workflows for the parking lot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Gatehouse Data Flow                            │
//! │                                                                     │
//! │  Operator console (menu loop)                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                gatehouse-service (THIS CRATE)                 │ │
//! │  │                                                               │ │
//! │  │   ParkingService                                              │ │
//! │  │   ├── process_incoming_vehicle()  category → spot → ticket    │ │
//! │  │   ├── process_exiting_vehicle()   plate → fare → release      │ │
//! │  │   └── lot_status()                free spots per category     │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │ SpotStore / TicketStore traits    │
//! │                                 ▼                                   │
//! │  gatehouse-db repositories (SQLite)                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service is generic over the collaborator traits defined in
//! [`gatehouse_core::ports`], so unit tests drive it with scripted prompts
//! and in-memory fakes while production wires SQLite repositories.

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{EntryOutcome, ExitOutcome, LotStatus, ParkingService};
