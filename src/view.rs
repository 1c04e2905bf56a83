//! Text map of the caches in view
//!
//! `MapView` is the renderer used by the terminal front end. It mirrors the
//! visible set from add/remove notifications and draws it as a character
//! grid, north up.

use crate::board::{Bounds, Cell};
use crate::cache::{CacheId, Geocache};
use crate::neighborhood::Renderer;
use serde::Serialize;
use std::collections::BTreeMap;

/// What the map shows for one cache (popup contents)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub cell: Cell,
    pub id: CacheId,
    pub bounds: Bounds,
    pub coins: usize,
    pub top: Option<String>,
}

/// Renderer that keeps the visible markers
#[derive(Debug, Default)]
pub struct MapView {
    markers: BTreeMap<Cell, Marker>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible markers, ordered by cell
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn marker(&self, cell: &Cell) -> Option<&Marker> {
        self.markers.get(cell)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Refresh a marker after its cache changed in place
    pub fn refresh(&mut self, cache: &Geocache) {
        if let Some(marker) = self.markers.get_mut(&cache.cell()) {
            marker.coins = cache.len();
            marker.top = cache.top().map(ToString::to_string);
        }
    }

    /// Draw the window of `radius` around `player` as text, north up
    ///
    /// `@` is the player, `$` a cache with coins, `o` an empty cache, `.`
    /// an empty cell. Cells past the grid edge are blank.
    pub fn draw(&self, player: Cell, radius: i32) -> String {
        let mut out = String::new();
        for di in (-radius..radius).rev() {
            for dj in -radius..radius {
                let glyph = match player.offset(di, dj) {
                    None => ' ',
                    Some(cell) if cell == player => '@',
                    Some(cell) => match self.markers.get(&cell) {
                        Some(marker) if marker.coins > 0 => '$',
                        Some(_) => 'o',
                        None => '.',
                    },
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

impl Renderer for MapView {
    fn add_to_view(&mut self, cache: &Geocache, bounds: &Bounds) {
        self.markers.insert(
            cache.cell(),
            Marker {
                cell: cache.cell(),
                id: cache.id(),
                bounds: *bounds,
                coins: cache.len(),
                top: cache.top().map(ToString::to_string),
            },
        );
    }

    fn remove_from_view(&mut self, cache: &Geocache) {
        self.markers.remove(&cache.cell());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, LatLng};
    use crate::cache::{CacheStateStore, SpawnRules};
    use crate::neighborhood::NeighborhoodManager;

    fn manager() -> NeighborhoodManager {
        NeighborhoodManager::new(
            Board::new(1.0, 2),
            SpawnRules::default(),
            CacheStateStore::new(),
        )
    }

    #[test]
    fn view_tracks_active_caches() {
        let mut manager = manager();
        let mut view = MapView::new();

        manager.on_player_moved(LatLng::new(0.5, 0.5), &mut view);
        assert_eq!(view.len(), manager.active_caches().len());
        for cache in manager.active_caches() {
            let marker = view.marker(&cache.cell()).unwrap();
            assert_eq!(marker.coins, cache.len());
            assert_eq!(marker.bounds, manager.bounds(&cache.cell()));
        }

        manager.on_player_moved(LatLng::new(500.5, 500.5), &mut view);
        assert!(view.markers().all(|m| m.cell.i >= 498));
    }

    #[test]
    fn draw_marks_player_and_caches() {
        let mut view = MapView::new();
        let mut manager = NeighborhoodManager::new(
            Board::new(1.0, 1),
            SpawnRules {
                spawn_probability: 1.0,
                coin_scale: 100,
            },
            CacheStateStore::new(),
        );
        manager.on_player_moved(LatLng::new(0.5, 0.5), &mut view);

        let map = view.draw(Cell::new(0, 0), 1);
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 2);
        // Top row is i = 0 (north), player sits at j = 0
        assert_eq!(rows[0].chars().nth(1), Some('@'));
        assert!(rows[1].chars().all(|c| c == '$' || c == 'o'));
    }
}
