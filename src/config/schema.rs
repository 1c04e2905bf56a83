//! Configuration schema for geocoin
//!
//! Configuration is stored at `~/.config/geocoin/config.toml`

use crate::board::{Board, LatLng};
use crate::cache::SpawnRules;
use crate::session::GameSettings;
use serde::{Deserialize, Serialize};

/// Largest accepted `board.visibility_radius`
pub const MAX_VISIBILITY_RADIUS: u32 = 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Grid settings
    pub board: BoardConfig,

    /// Cache placement settings
    pub caches: CachesConfig,

    /// Player settings
    pub player: PlayerConfig,
}

impl Config {
    /// Check value ranges, returning the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if !self.board.tile_width.is_finite() || self.board.tile_width <= 0.0 {
            return Err(format!(
                "board.tile_width must be a positive number, got {}",
                self.board.tile_width
            ));
        }
        if self.board.visibility_radius > MAX_VISIBILITY_RADIUS {
            return Err(format!(
                "board.visibility_radius must be at most {}, got {}",
                MAX_VISIBILITY_RADIUS, self.board.visibility_radius
            ));
        }
        if !(0.0..=1.0).contains(&self.caches.spawn_probability) {
            return Err(format!(
                "caches.spawn_probability must be between 0 and 1, got {}",
                self.caches.spawn_probability
            ));
        }
        if !self.player.start_lat.is_finite() || !self.player.start_lng.is_finite() {
            return Err("player start coordinates must be finite".to_string());
        }
        let board = Board::new(self.board.tile_width, self.board.visibility_radius);
        if !board.window_fits(self.start()) {
            return Err(format!(
                "player start {} is too far out for board.tile_width {}",
                self.start(),
                self.board.tile_width
            ));
        }
        if self.player.trail_limit == 0 {
            return Err("player.trail_limit must be at least 1".to_string());
        }
        if !matches!(self.general.log_format.as_str(), "text" | "json") {
            return Err(format!(
                "general.log_format must be \"text\" or \"json\", got \"{}\"",
                self.general.log_format
            ));
        }
        Ok(())
    }

    /// Game world parameters derived from this configuration
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            tile_width: self.board.tile_width,
            visibility_radius: self.board.visibility_radius,
            registry_retention: self.board.registry_retention,
            rules: SpawnRules {
                spawn_probability: self.caches.spawn_probability,
                coin_scale: self.caches.coin_scale,
            },
            start: self.start(),
            trail_limit: self.player.trail_limit,
        }
    }

    fn start(&self) -> LatLng {
        LatLng::new(self.player.start_lat, self.player.start_lng)
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Cell edge in degrees
    pub tile_width: f64,

    /// Half-width of the visibility window in cells
    pub visibility_radius: u32,

    /// Forget cells not seen in this many windows (0 = never)
    pub registry_retention: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tile_width: 1e-4,
            visibility_radius: 8,
            registry_retention: 0,
        }
    }
}

/// Cache placement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CachesConfig {
    /// Probability that a cell holds a cache
    pub spawn_probability: f64,

    /// Upper bound (exclusive) of a cache's initial coin count
    pub coin_scale: u32,
}

impl Default for CachesConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.1,
            coin_scale: 100,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting latitude
    pub start_lat: f64,

    /// Starting longitude
    pub start_lng: f64,

    /// Most recent positions kept in the trail
    pub trail_limit: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_lat: 36.98949379578401,
            start_lng: -122.06277128548504,
            trail_limit: 1000,
        }
    }
}
