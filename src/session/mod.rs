//! Game session module

pub mod manager;
pub mod state;

pub use manager::{Direction, GameSession, GameSettings};
pub use state::{Inventory, PlayerState, TrailPoint};
