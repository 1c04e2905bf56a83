//! Status command - where the player is and what is nearby

use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::{self, UiContext};
use std::path::Path;

/// Execute the status command
pub async fn execute(config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let game = Game::open(config, state_dir)?;
    let session = &game.session;
    let player = session.player();

    ui::intro(&ctx, "geocoin");

    ui::section(&ctx, "Player");
    ui::key_value(&ctx, "Position", &player.position.to_string());
    ui::key_value(&ctx, "Cell", &session.player_cell().key());
    ui::key_value(&ctx, "Coins carried", &player.inventory.len().to_string());
    if let Some(top) = player.inventory.top() {
        ui::key_value(&ctx, "Next to deposit", top.as_str());
    }
    ui::key_value(&ctx, "Trail points", &player.history.len().to_string());

    ui::section(&ctx, "Neighborhood");
    ui::key_value(&ctx, "Caches in view", &game.view.len().to_string());
    ui::key_value(&ctx, "Coins in view", &game.coins_in_view().to_string());
    ui::key_value(
        &ctx,
        "Caches remembered",
        &session.manager().store().len().to_string(),
    );

    let census = session.census();
    if !census.is_clean() {
        ui::step_warn_hint(
            &ctx,
            &format!("{} duplicated coin(s) found", census.duplicates.len()),
            "Run: geocoin reset",
        );
    }

    ui::remark(&ctx, &format!("State: {}", state_dir.display()));
    Ok(())
}
