//! Collect and deposit commands - move coins between player and cache

use crate::board::Cell;
use crate::cli::args::TransferArgs;
use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::transfer::{TransferDirection, TransferOutcome};
use crate::ui::{self, UiContext};
use std::path::Path;

/// Execute a collect or deposit
pub async fn execute(
    args: TransferArgs,
    direction: TransferDirection,
    config: &Config,
    state_dir: &Path,
) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let mut game = Game::open(config, state_dir)?;
    let cell = Cell::new(args.i, args.j);

    let mut moved = 0;
    for _ in 0..args.count {
        match game.session.transfer(&cell, direction)? {
            TransferOutcome::Moved(token) => {
                moved += 1;
                ui::step_ok(&ctx, &describe(direction, &token.to_string(), &cell));
            }
            TransferOutcome::SourceEmpty => {
                let hint = match direction {
                    TransferDirection::Collect => format!("Cache {} is empty", cell),
                    TransferDirection::Deposit => "You have no coins to deposit".to_string(),
                };
                ui::step_warn(&ctx, &hint);
                break;
            }
        }
    }

    if let Some(cache) = game.session.manager().active_cache(&cell) {
        game.view.refresh(cache);
    }
    if let Some(marker) = game.view.marker(&cell) {
        ui::key_value(&ctx, "Coins in cache", &marker.coins.to_string());
    }
    ui::key_value(
        &ctx,
        "Coins carried",
        &game.session.player().inventory.len().to_string(),
    );

    if moved == 0 {
        ui::remark(&ctx, "Nothing moved");
    }
    Ok(())
}

fn describe(direction: TransferDirection, token: &str, cell: &Cell) -> String {
    match direction {
        TransferDirection::Collect => format!("Collected {} from {}", token, cell),
        TransferDirection::Deposit => format!("Deposited {} into {}", token, cell),
    }
}
