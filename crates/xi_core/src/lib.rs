//! # xi_core - Fantasy Cricket Form Scoring and Team Selection
//!
//! Scores each player's recent form from match history, weights it for the
//! venue and picks the eleven that maximize expected fantasy points under
//! contest rules.
//!
//! ## Features
//! - Recency-weighted form over a rolling window
//! - Venue and role weighting, optional home boost
//! - Exact selection through an integer program, with exhaustive and
//!   heuristic solvers alongside
//! - Fully deterministic: same inputs, same roster

// Loop style - index loops mirror the model's variable layout
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod scoring;
pub mod selector;

pub use config::{FormConfig, MissingHistory, Normalization, SelectorConfig, SolverKind};
pub use error::{Result, SelectionError};
pub use form::{recency_weighted_average, FormLine, FormScorer};
pub use models::{
    Designation, MatchRecord, Pick, Player, PlayerId, PlayingStatus, Role, Roster, SquadEntry,
};
pub use scoring::VenueWeights;
pub use selector::{
    feasibility_check, Bounds, ConstraintSet, ExhaustiveSolver, GreedySolver, MilpSolver,
    RoleGroupBound, SelectionProblem, SelectionSolver, TeamSelector,
};
