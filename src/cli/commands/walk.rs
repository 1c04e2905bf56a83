//! Move command - walk tile by tile

use crate::cli::args::MoveArgs;
use crate::cli::commands::game::Game;
use crate::config::Config;
use crate::error::GeocoinResult;
use crate::neighborhood::RegenerationReport;
use crate::session::Direction;
use crate::ui::{self, UiContext, WalkProgress};
use std::path::Path;

/// Execute the move command
pub async fn execute(args: MoveArgs, config: &Config, state_dir: &Path) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let mut game = Game::open(config, state_dir)?;
    let direction = Direction::from(args.direction);

    let progress = WalkProgress::new(&ctx, &direction.to_string(), args.steps);
    let mut total = RegenerationReport::default();
    for _ in 0..args.steps {
        let report = game.session.step(direction, &mut game.view)?;
        progress.on_step(&report);
        total.absorb(report);
    }
    progress.finish();

    report_arrival(&ctx, &game, &total);
    Ok(())
}

/// Print where the player ended up and how the view changed
pub(crate) fn report_arrival(ctx: &UiContext, game: &Game, report: &RegenerationReport) {
    ui::step_ok(
        ctx,
        &format!(
            "Now at {} (cell {})",
            game.session.player().position,
            game.session.player_cell()
        ),
    );

    if !report.is_unchanged() {
        ui::step_info(
            ctx,
            &format!(
                "{} cache(s) came into view, {} left",
                report.spawned().count(),
                report.evicted.len()
            ),
        );
    }
    ui::key_value(ctx, "Caches in view", &game.view.len().to_string());
}
