//! Game session lifecycle
//!
//! A session wires the neighborhood manager to the player and to durable
//! storage. It resumes whatever state storage holds, falls back to a first
//! visit when that state is unreadable, and writes the cache store and the
//! player record back after every move and every transfer.

use crate::board::{Board, Cell, LatLng};
use crate::cache::{CacheStateStore, SpawnRules};
use crate::error::{GeocoinError, GeocoinResult};
use crate::neighborhood::{NeighborhoodManager, RegenerationReport, Renderer};
use crate::session::state::PlayerState;
use crate::storage::{DurableStorage, CACHES_KEY, PLAYER_KEY};
use crate::transfer::{TokenCensus, TransferDirection, TransferOutcome};
use std::fmt;
use tracing::{debug, info, warn};

/// Compass direction for one-tile steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Cell offset `(di, dj)` of one step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (1, 0),
            Self::South => (-1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::South => write!(f, "south"),
            Self::East => write!(f, "east"),
            Self::West => write!(f, "west"),
        }
    }
}

/// Parameters of a game world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    /// Cell edge in degrees
    pub tile_width: f64,
    /// Half-width of the visibility window in cells
    pub visibility_radius: u32,
    /// Canonical registry retention in windows (0 = unbounded)
    pub registry_retention: u64,
    /// Cache placement rules
    pub rules: SpawnRules,
    /// Where new players start
    pub start: LatLng,
    /// Most recent positions kept in the trail
    pub trail_limit: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tile_width: 1e-4,
            visibility_radius: 8,
            registry_retention: 0,
            rules: SpawnRules::default(),
            start: LatLng::new(36.98949379578401, -122.06277128548504),
            trail_limit: 1000,
        }
    }
}

/// A running game backed by durable storage
pub struct GameSession<S: DurableStorage> {
    settings: GameSettings,
    manager: NeighborhoodManager,
    player: PlayerState,
    storage: S,
}

impl<S: DurableStorage> GameSession<S> {
    /// Resume the game held in `storage` and materialize the player's neighborhood
    ///
    /// Unreadable state is treated as a first visit. The player record is
    /// only trusted next to a readable cache store, since carried coins are
    /// otherwise minted again by the caches they came from.
    pub fn open(
        settings: GameSettings,
        storage: S,
        renderer: &mut dyn Renderer,
    ) -> GeocoinResult<Self> {
        let store = read_saved(&storage, CACHES_KEY, CacheStateStore::deserialize)?;
        let player = read_saved(&storage, PLAYER_KEY, PlayerState::from_json)?;

        let (store, mut player) = match (store, player) {
            (Some(store), Some(player)) => (store, player),
            (Some(store), None) => (store, PlayerState::new(settings.start)),
            (None, Some(_)) => {
                warn!("Player record has no cache state to go with it, starting over");
                (CacheStateStore::new(), PlayerState::new(settings.start))
            }
            (None, None) => (CacheStateStore::new(), PlayerState::new(settings.start)),
        };

        let board = Board::with_retention(
            settings.tile_width,
            settings.visibility_radius,
            settings.registry_retention,
        );
        if !board.window_fits(player.position) {
            warn!(
                "Saved position {} is off the grid, returning to {}",
                player.position, settings.start
            );
            player.relocate(settings.start, settings.trail_limit);
        }

        let mut manager = NeighborhoodManager::new(board, settings.rules, store);
        manager.on_player_moved(player.position, renderer);

        debug!(
            "Opened session at {} with {} coin(s) in inventory",
            player.position,
            player.inventory.len()
        );

        Ok(Self {
            settings,
            manager,
            player,
            storage,
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn manager(&self) -> &NeighborhoodManager {
        &self.manager
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Cell the player stands in
    pub fn player_cell(&self) -> Cell {
        self.manager.board().locate(self.player.position)
    }

    /// Step one tile in `direction`
    pub fn step(
        &mut self,
        direction: Direction,
        renderer: &mut dyn Renderer,
    ) -> GeocoinResult<RegenerationReport> {
        let (di, dj) = direction.offset();
        let w = self.settings.tile_width;
        let target = LatLng::new(
            self.player.position.lat + f64::from(di) * w,
            self.player.position.lng + f64::from(dj) * w,
        );
        self.move_to(target, renderer)
    }

    /// Move the player to `position` and regenerate the neighborhood
    pub fn move_to(
        &mut self,
        position: LatLng,
        renderer: &mut dyn Renderer,
    ) -> GeocoinResult<RegenerationReport> {
        if !position.is_finite() {
            return Err(GeocoinError::InvalidPosition(format!(
                "{}, {}",
                position.lat, position.lng
            )));
        }
        if !self.manager.board().window_fits(position) {
            return Err(GeocoinError::InvalidPosition(format!(
                "{} is too far out for this board",
                position
            )));
        }

        self.player.relocate(position, self.settings.trail_limit);
        let report = self.manager.on_player_moved(position, renderer);
        self.persist();
        Ok(report)
    }

    /// Take one coin from the cache at `cell`
    pub fn collect(&mut self, cell: &Cell) -> GeocoinResult<TransferOutcome> {
        self.transfer(cell, TransferDirection::Collect)
    }

    /// Give one coin to the cache at `cell`
    pub fn deposit(&mut self, cell: &Cell) -> GeocoinResult<TransferOutcome> {
        self.transfer(cell, TransferDirection::Deposit)
    }

    /// Move one coin between the player and the cache at `cell`
    pub fn transfer(
        &mut self,
        cell: &Cell,
        direction: TransferDirection,
    ) -> GeocoinResult<TransferOutcome> {
        let outcome = self
            .manager
            .transfer(cell, direction, &mut self.player.inventory)?;

        if let TransferOutcome::Moved(_) = outcome {
            self.player.touch();
            self.persist();
        }
        Ok(outcome)
    }

    /// Start over: forget every cache, empty the inventory, return to start
    pub fn reset(&mut self, renderer: &mut dyn Renderer) -> RegenerationReport {
        self.manager.reset(renderer);
        self.player = PlayerState::new(self.settings.start);
        let report = self.manager.on_player_moved(self.player.position, renderer);
        self.persist();
        info!("Game reset to {}", self.settings.start);
        report
    }

    /// Coin census over caches, store, and inventory
    pub fn census(&self) -> TokenCensus {
        self.manager.census(&self.player.inventory)
    }

    /// Write the cache store and the player record
    ///
    /// Failures are logged and otherwise ignored.
    pub fn persist(&mut self) {
        match self.manager.store().serialize() {
            Ok(content) => {
                if let Err(e) = self.storage.write(CACHES_KEY, &content) {
                    warn!("Failed to persist cache state: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize cache state: {}", e),
        }

        match self.player.to_json() {
            Ok(content) => {
                if let Err(e) = self.storage.write(PLAYER_KEY, &content) {
                    warn!("Failed to persist player state: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize player state: {}", e),
        }
    }

    /// Give back the storage
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Parse the record under `key`, or `None` if it is absent or unreadable
fn read_saved<T>(
    storage: &dyn DurableStorage,
    key: &str,
    parse: impl FnOnce(&str) -> GeocoinResult<T>,
) -> GeocoinResult<Option<T>> {
    let loaded = storage
        .read(key)
        .and_then(|content| content.as_deref().map(parse).transpose());

    match loaded {
        Ok(Some(value)) => {
            debug!("Loaded {}", key);
            Ok(Some(value))
        }
        Ok(None) => Ok(None),
        Err(e) if e.is_recoverable() => {
            warn!("Discarding unreadable {}: {}", key, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
