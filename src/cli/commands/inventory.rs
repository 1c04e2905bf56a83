//! Inventory command - coins the player carries

use crate::cli::args::OutputFormat;
use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::{self, UiContext};
use console::style;
use std::path::Path;

/// Execute the inventory command
pub async fn execute(format: OutputFormat, config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let game = Game::open(config, state_dir)?;
    let inventory = &game.session.player().inventory;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(inventory)?);
        }
        OutputFormat::Plain => {
            for token in inventory.tokens() {
                println!("{}", token);
            }
        }
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            if inventory.is_empty() {
                ui::step_info(&ctx, "Inventory is empty");
                return Ok(());
            }

            ui::intro(&ctx, "Inventory");
            // Newest first: that is the order deposits take them
            for (n, token) in inventory.tokens().iter().rev().enumerate() {
                let origin = token
                    .origin()
                    .map(|(cell, _)| format!("from {}", cell))
                    .unwrap_or_default();
                println!("  {:>3}. {:<18} {}", n + 1, token.as_str(), style(origin).dim());
            }
            println!();
            println!("{} coin(s)", inventory.len());
        }
    }

    Ok(())
}
