//! Opening the saved game for a command

use crate::config::Config;
use crate::error::GeocoinResult;
use crate::session::GameSession;
use crate::storage::FileStorage;
use crate::view::MapView;
use std::path::Path;
use tracing::debug;

/// A session on disk plus the map it draws into
pub struct Game {
    pub session: GameSession<FileStorage>,
    pub view: MapView,
}

impl Game {
    /// Resume the game saved under `state_dir`
    pub fn open(config: &Config, state_dir: &Path) -> GeocoinResult<Self> {
        let storage = FileStorage::open(state_dir)?;
        let mut view = MapView::new();
        let session = GameSession::open(config.game_settings(), storage, &mut view)?;
        debug!(
            "Game opened from {} with {} cache(s) in view",
            state_dir.display(),
            view.len()
        );

        Ok(Self { session, view })
    }

    /// Total coins across the caches in view
    pub fn coins_in_view(&self) -> usize {
        self.session
            .manager()
            .active_caches()
            .iter()
            .map(|cache| cache.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_fresh_state_dir() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.caches.spawn_probability = 1.0;
        config.board.visibility_radius = 2;

        let game = Game::open(&config, temp.path()).unwrap();
        assert_eq!(game.view.len(), 16);
        assert_eq!(game.session.manager().active_caches().len(), 16);
        assert!(game.coins_in_view() > 0);
    }
}
