//! A transport-agnostic scrabble engine: lexicon and GADDAG index, the
//! anchor-based Gordon's-algorithm move generator, and the game/board/rack
//! model the commit pipeline mutates.

// Produce a compiler warning for missing documentation.
#![warn(missing_docs)]

pub mod error;
pub mod game;
pub mod lexicon;
pub mod movegen;
pub mod util;
