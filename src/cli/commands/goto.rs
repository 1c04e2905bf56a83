//! Goto command - jump straight to a coordinate

use crate::board::LatLng;
use crate::cli::commands::game::Game;
use crate::cli::commands::walk::report_arrival;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::UiContext;
use std::path::Path;

/// Execute the goto command
pub async fn execute(lat: f64, lng: f64, config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let mut game = Game::open(config, state_dir)?;
    let report = game.session.move_to(LatLng::new(lat, lng), &mut game.view)?;
    report_arrival(&ctx, &game, &report);
    Ok(())
}
