//! Reset command - forget all progress

use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::{self, UiContext};
use std::path::Path;
use tracing::info;

/// Execute the reset command
pub async fn execute(yes: bool, config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let ctx = UiContext::detect().with_auto_yes(yes);

    let confirmed = ui::confirm(
        &ctx,
        "Forget every cache change and all carried coins?",
        false,
    )
    .await?;
    if !confirmed {
        ui::outro_warn(&ctx, "Reset cancelled (use --yes to skip the prompt)");
        return Ok(());
    }

    let mut game = Game::open(config, state_dir)?;
    let carried = game.session.player().inventory.len();
    let remembered = game.session.manager().store().len();

    game.session.reset(&mut game.view);
    info!(
        "Dropped {} carried coin(s) and {} cache record(s)",
        carried, remembered
    );

    ui::outro_success(
        &ctx,
        &format!("Back at {}", game.session.player().position),
    );
    Ok(())
}
