//! # arena-gateway
//!
//! REST API gateway for single-elimination fighting-game tournaments.
//!
//! The service seeds participants by join order, builds a complete
//! single-elimination match tree when the roster fills, resolves each
//! match's participants lazily from upstream results, records outcomes
//! into an append-only decision history, and aggregates that history into
//! the win-rate bundle a narrative-generation collaborator turns into
//! match commentary.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── TournamentService (service/)   bracket lifecycle state machine
//!     ├── StatsService (service/)        win-rate aggregation
//!     ├── CommentaryClient (commentary/) narrative collaborator boundary
//!     │
//!     └── TournamentRegistry (domain/)   per-tournament locked aggregates
//! ```

pub mod api;
pub mod app_state;
pub mod commentary;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
