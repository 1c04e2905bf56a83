//! Map command - draw the neighborhood

use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::{self, UiContext};
use std::path::Path;

const LEGEND: &str = "@ you   $ cache with coins   o empty cache   . nothing";

/// Execute the map command
pub async fn execute(config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let game = Game::open(config, state_dir)?;
    let radius = game.session.manager().board().visibility_radius();

    let drawing = game.view.draw(game.session.player_cell(), radius);
    ui::note(&ctx, "North is up", drawing.trim_end());
    ui::remark(&ctx, LEGEND);
    Ok(())
}
