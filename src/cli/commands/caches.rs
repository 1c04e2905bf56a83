//! Caches command - list the caches in view

use crate::cli::args::OutputFormat;
use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::ui::{self, UiContext};
use crate::view::Marker;
use console::style;
use std::path::Path;

/// Execute the caches command
pub async fn execute(format: OutputFormat, config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let game = Game::open(config, state_dir)?;
    let markers: Vec<&Marker> = game.view.markers().collect();

    if markers.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No caches in view");
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(&markers),
        OutputFormat::Json => print_json(&markers)?,
        OutputFormat::Plain => print_plain(&markers),
    }

    Ok(())
}

fn print_table(markers: &[&Marker]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Caches in view");

    println!(
        "{:<14} {:<8} {:<7} {:<18}",
        style("CELL").bold(),
        style("ID").bold(),
        style("COINS").bold(),
        style("TOP").bold()
    );
    println!("{}", "-".repeat(50));

    for marker in markers {
        let coins = if marker.coins > 0 {
            style(marker.coins.to_string()).yellow()
        } else {
            style(marker.coins.to_string()).dim()
        };
        println!(
            "{:<14} {:<8} {:<7} {:<18}",
            marker.cell.to_string(),
            marker.id.to_string(),
            coins,
            marker.top.as_deref().unwrap_or("-")
        );
    }

    println!();
    println!(
        "{} cache(s), {} coin(s)",
        markers.len(),
        markers.iter().map(|m| m.coins).sum::<usize>()
    );
}

fn print_json(markers: &[&Marker]) -> GeocoinResult<()> {
    let json = serde_json::to_string_pretty(markers)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(markers: &[&Marker]) {
    for marker in markers {
        println!("{} {}", marker.cell, marker.coins);
    }
}
