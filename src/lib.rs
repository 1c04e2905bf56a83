//! geocoin - location-based coin collecting
//!
//! The world is a grid of small lat/lng tiles. Some tiles hold a cache of
//! coins whose contents are derived from the tile's coordinates, so every
//! player sees the same world. Players collect coins from caches near them
//! and deposit them elsewhere; caches remember those changes after they
//! scroll out of view.

pub mod board;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod luck;
pub mod neighborhood;
pub mod session;
pub mod storage;
pub mod transfer;
pub mod ui;
pub mod view;

pub use error::{GeocoinError, GeocoinResult};
