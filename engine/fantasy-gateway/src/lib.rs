//! Fantasy Gateway - Boundary to the remote fantasy service
//!
//! The remote service owns players, scoring, persistence and standings. This
//! crate is the only place that talks to it: [`HttpFantasyClient`] speaks the
//! JSON API, and [`SubmissionGateway`] makes sure nothing leaves the client
//! unless it passed the roster checks and no earlier submission of the same
//! selection is still outstanding.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod submission;

pub use client::HttpFantasyClient;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use models::{
    Account, Ack, ComputeReport, EntryId, GameweekSpec, LeagueCreated, LeagueId, LeagueJoined,
    LineupSubmission, PlayerStatLine, SquadSubmission, Standings, StandingsEntry, UserId,
};
pub use service::FantasyService;
pub use submission::{SelectionKind, SubmissionGateway};
