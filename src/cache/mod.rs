//! Coin caches
//!
//! A cache is procedurally placed in a grid cell and holds a stack of coin
//! tokens. Caches only exist while their cell is in view; their contents
//! outlive them in the [`CacheStateStore`].
//!
//! # Lifecycle
//!
//! | Event | Contents come from |
//! |-------|--------------------|
//! | First time in view | [`SpawnRules::fresh_tokens`] |
//! | Back in view | [`CacheStateStore::restore`] |
//! | Leaving view | saved with [`CacheStateStore::save`] |

pub mod geocache;
pub mod memento;
pub mod token;

pub use geocache::{CacheId, Geocache, SpawnRules};
pub use memento::CacheStateStore;
pub use token::{mint_all, Token};
