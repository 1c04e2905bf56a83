//! History command - the player's trail

use crate::cli::args::OutputFormat;
use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::session::TrailPoint;
use crate::ui::{self, UiContext};
use console::style;
use std::path::Path;

/// Execute the history command
pub async fn execute(
    format: OutputFormat,
    limit: usize,
    config: &Config,
    state_dir: &Path,
) -> GeocoinResult<()> {
    let game = Game::open(config, state_dir)?;
    let history = &game.session.player().history;
    let skip = match limit {
        0 => 0,
        n => history.len().saturating_sub(n),
    };
    let trail = &history[skip..];

    match format {
        OutputFormat::Table => print_table(&game, trail, skip),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(trail)?),
        OutputFormat::Plain => {
            for point in trail {
                println!("{},{}", point.position.lat, point.position.lng);
            }
        }
    }

    Ok(())
}

fn print_table(game: &Game, trail: &[TrailPoint], skip: usize) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Trail");

    println!(
        "{:<5} {:<17} {:<26} {:<14}",
        style("#").bold(),
        style("WHEN").bold(),
        style("POSITION").bold(),
        style("CELL").bold()
    );
    println!("{}", "-".repeat(64));

    let board = game.session.manager().board();
    for (n, point) in trail.iter().enumerate() {
        println!(
            "{:<5} {:<17} {:<26} {:<14}",
            skip + n,
            point.at.format("%Y-%m-%d %H:%M").to_string(),
            point.position.to_string(),
            board.locate(point.position).to_string()
        );
    }

    if skip > 0 {
        println!();
        ui::remark(&ctx, &format!("{} earlier position(s) not shown", skip));
    }
}
