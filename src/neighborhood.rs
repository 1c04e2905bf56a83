//! Neighborhood regeneration
//!
//! Keeps the set of materialized caches in step with the player's
//! visibility window. On every move, caches that fall out of the window
//! are committed to the state store and removed from view; cells that
//! enter the window are tested against the spawn rules and materialized
//! from their stored state, or freshly generated on a first visit. Caches
//! in both the old and new window are left untouched.

use crate::board::{Board, Bounds, Cell, LatLng};
use crate::cache::{CacheId, CacheStateStore, Geocache, SpawnRules};
use crate::error::{GeocoinError, GeocoinResult};
use crate::session::state::Inventory;
use crate::transfer::{transfer, TokenCensus, TransferDirection, TransferOutcome};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Receiver of view changes (the map widget)
pub trait Renderer {
    /// A cache entered the view
    fn add_to_view(&mut self, cache: &Geocache, bounds: &Bounds);

    /// A cache left the view
    fn remove_from_view(&mut self, cache: &Geocache);
}

/// Headless renderer that ignores all notifications
impl Renderer for () {
    fn add_to_view(&mut self, _cache: &Geocache, _bounds: &Bounds) {}

    fn remove_from_view(&mut self, _cache: &Geocache) {}
}

/// What a regeneration cycle changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegenerationReport {
    /// Caches committed to the store and removed from view
    pub evicted: Vec<Cell>,
    /// Caches resumed from the store
    pub restored: Vec<Cell>,
    /// Caches generated for the first time
    pub generated: Vec<Cell>,
    /// Caches kept from the previous window
    pub retained: Vec<Cell>,
}

impl RegenerationReport {
    /// Every cache that entered the view
    pub fn spawned(&self) -> impl Iterator<Item = &Cell> {
        self.restored.iter().chain(self.generated.iter())
    }

    /// Whether the cycle changed nothing
    pub fn is_unchanged(&self) -> bool {
        self.evicted.is_empty() && self.restored.is_empty() && self.generated.is_empty()
    }

    /// Fold a later cycle into this one
    ///
    /// `retained` keeps the latest cycle's view only.
    pub fn absorb(&mut self, later: RegenerationReport) {
        self.evicted.extend(later.evicted);
        self.restored.extend(later.restored);
        self.generated.extend(later.generated);
        self.retained = later.retained;
    }
}

/// Owner of the board, the state store, and the active caches
#[derive(Debug)]
pub struct NeighborhoodManager {
    board: Board,
    store: CacheStateStore,
    rules: SpawnRules,
    active: Vec<Geocache>,
    next_id: u64,
}

impl NeighborhoodManager {
    /// Create a manager with nothing in view
    pub fn new(board: Board, rules: SpawnRules, store: CacheStateStore) -> Self {
        Self {
            board,
            store,
            rules,
            active: Vec::new(),
            next_id: 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &SpawnRules {
        &self.rules
    }

    /// The state store
    ///
    /// Active caches are saved on eviction and after every transfer, so the
    /// store may lag behind a cache only between those points.
    pub fn store(&self) -> &CacheStateStore {
        &self.store
    }

    /// Caches currently in view
    pub fn active_caches(&self) -> &[Geocache] {
        &self.active
    }

    /// The cache in view at `cell`, if any
    pub fn active_cache(&self, cell: &Cell) -> Option<&Geocache> {
        self.active.iter().find(|cache| cache.cell() == *cell)
    }

    /// Bounds of `cell` on this board
    pub fn bounds(&self, cell: &Cell) -> Bounds {
        self.board.cell_bounds(cell)
    }

    /// Regenerate the neighborhood around `position`
    pub fn on_player_moved(
        &mut self,
        position: LatLng,
        renderer: &mut dyn Renderer,
    ) -> RegenerationReport {
        let window = self.board.cells_near_point(position);
        let in_window: HashSet<_> = window.iter().map(|cell| **cell).collect();
        let mut report = RegenerationReport::default();

        let (kept, leaving): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|cache| in_window.contains(&cache.cell()));

        for cache in leaving {
            self.store.save(&cache.cell().key(), cache.tokens());
            renderer.remove_from_view(&cache);
            report.evicted.push(cache.cell());
        }

        // one cache per cell, even if the window repeats a cell
        let mut present: HashSet<Cell> = kept.iter().map(Geocache::cell).collect();
        report.retained = kept.iter().map(Geocache::cell).collect();
        self.active = kept;

        for cell in window {
            if !present.insert(*cell) || !self.rules.spawns(&cell) {
                continue;
            }

            let key = cell.key();
            let tokens = match self.store.restore(&key) {
                Some(tokens) => {
                    debug!("Resuming cache {} with {} coin(s)", key, tokens.len());
                    report.restored.push(*cell);
                    tokens
                }
                None => {
                    let tokens = self.rules.fresh_tokens(&cell);
                    debug!("Generated cache {} with {} coin(s)", key, tokens.len());
                    report.generated.push(*cell);
                    tokens
                }
            };

            let bounds = self.board.cell_bounds(&cell);
            let cache = Geocache::new(self.allocate_id(), cell, tokens);
            renderer.add_to_view(&cache, &bounds);
            self.active.push(cache);
        }

        info!(
            "Neighborhood at {}: {} evicted, {} restored, {} generated, {} retained",
            position,
            report.evicted.len(),
            report.restored.len(),
            report.generated.len(),
            report.retained.len()
        );
        report
    }

    /// Move one coin between the cache at `cell` and `inventory`
    ///
    /// The cache's new contents are committed to the store immediately.
    pub fn transfer(
        &mut self,
        cell: &Cell,
        direction: TransferDirection,
        inventory: &mut Inventory,
    ) -> GeocoinResult<TransferOutcome> {
        let cache = self
            .active
            .iter_mut()
            .find(|cache| cache.cell() == *cell)
            .ok_or(GeocoinError::CacheNotActive(*cell))?;

        let outcome = transfer(cache, inventory, direction);
        match &outcome {
            TransferOutcome::Moved(token) => {
                debug!("{} {} at cell {}", direction, token, cell);
                self.store.save(&cell.key(), cache.tokens());
            }
            TransferOutcome::SourceEmpty => {
                debug!("Nothing to {} at cell {}", direction, cell);
            }
        }
        Ok(outcome)
    }

    /// Count every coin across active caches, the store, and `inventory`
    ///
    /// Store entries of active cells are skipped since the cache itself is
    /// the live copy.
    pub fn census(&self, inventory: &Inventory) -> TokenCensus {
        let active: HashSet<String> = self.active.iter().map(|c| c.cell().key()).collect();
        let stored = self
            .store
            .iter()
            .filter(|(key, _)| !active.contains(*key))
            .map(|(_, tokens)| tokens);

        TokenCensus::take(
            self.active
                .iter()
                .map(Geocache::tokens)
                .chain(stored)
                .chain(std::iter::once(inventory.tokens())),
        )
    }

    /// Forget all stored state and drop every cache from view
    pub fn reset(&mut self, renderer: &mut dyn Renderer) {
        for cache in std::mem::take(&mut self.active) {
            renderer.remove_from_view(&cache);
        }
        self.store.clear();
        info!("Cache state cleared");
    }

    fn allocate_id(&mut self) -> CacheId {
        let id = CacheId(self.next_id);
        self.next_id += 1;
        id
    }
}
