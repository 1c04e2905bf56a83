//! CLI command implementations

pub mod caches;
pub mod completions;
pub mod config;
pub mod game;
pub mod goto;
pub mod history;
pub mod inventory;
pub mod map;
pub mod reset;
pub mod status;
pub mod transfer;
pub mod walk;

pub use caches::execute as caches;
pub use completions::execute as completions;
pub use config::execute as config;
pub use goto::execute as goto;
pub use history::execute as history;
pub use inventory::execute as inventory;
pub use map::execute as map;
pub use reset::execute as reset;
pub use status::execute as status;
pub use transfer::execute as transfer;
pub use walk::execute as walk;
