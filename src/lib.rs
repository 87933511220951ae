//! # Wordbloom
//!
//! Wordbloom is a word puzzle played on a flower of 19 lettered tiles: one
//! center tile, an inner ring of 6, and an outer ring of 12. The player spells
//! words by tracing chains of adjacent tiles. Every word must pass through the
//! center tile, and the same tile is never used twice within a single word.
//!
//! The library provides:
//!
//! * [`tile`]: tile identities and the adjacency graph of the flower.
//! * [`arrangement`]: the assignment of letters to tiles.
//! * [`dictionary`]: an immutable index over a word list.
//! * [`path`]: the search that proves a word can be traced.
//! * [`selection`]: the live, tile-by-tile selection of a player.
//! * [`round`]: the verdicts on submitted words during one play session.
//! * [`generator`]: the generation of playable arrangements.

pub mod arrangement;
pub mod dictionary;
pub mod generator;
pub mod path;
pub mod round;
pub mod selection;
pub mod tile;
