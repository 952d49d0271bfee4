//! The game-state core: configuration, the lexicon/GADDAG index, the
//! wire-facing error and event types, and the per-game commit pipeline.
//! Deliberately has no transport of its own — see [`games::GamesHandle`]
//! and [`game::GameHandle`] for the interfaces a transport collaborator
//! drives.

pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod game;
pub mod games;
