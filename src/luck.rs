//! Deterministic pseudo-random sampling keyed by strings
//!
//! Every procedural decision in the game derives from `luck(key)`, a pure
//! function of its key. The same key gives the same value in every run and
//! every process, so cache placement and contents are reproducible from cell
//! coordinates alone.

use sha2::{Digest, Sha256};

/// Salt for the "does this cell hold a cache" decision
pub const SPAWN_SALT: &str = "spawn";

/// Salt for the initial coin count of a cache
pub const COIN_SALT: &str = "initialValue";

/// 2^-53, the spacing of f64 values in [0, 1) built from 53 random bits
const UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Sample a value in `[0, 1)` determined entirely by `key`
pub fn luck(key: &str) -> f64 {
    let digest = Sha256::digest(key.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let bits = u64::from_be_bytes(head) >> 11;
    bits as f64 * UNIT
}

/// Key for the spawn decision of cell `(i, j)`
pub fn spawn_key(i: i32, j: i32) -> String {
    format!("{},{},{}", i, j, SPAWN_SALT)
}

/// Key for the initial coin count of cell `(i, j)`
pub fn coin_key(i: i32, j: i32) -> String {
    format!("{},{},{}", i, j, COIN_SALT)
}
