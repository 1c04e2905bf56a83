//! Output functions for consistent CLI formatting
//!
//! Each function has a fancy form (cliclack log lines) and a plain form with
//! a bracketed tag, so scripted output stays greppable.

use super::context::UiContext;
use console::{style, StyledObject};

/// Severity of a single output line
#[derive(Debug, Clone, Copy)]
enum Level {
    Ok,
    Warn,
    Info,
}

impl Level {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Info => style("[INFO]").cyan(),
        }
    }
}

fn step(ctx: &UiContext, level: Level, message: &str) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", level.tag(), message);
        return;
    }
    let shown = match level {
        Level::Ok => cliclack::log::success(message),
        Level::Warn => cliclack::log::warning(message),
        Level::Info => cliclack::log::info(message),
    };
    shown.ok();
}

fn outro(ctx: &UiContext, level: Level, message: &str) {
    if ctx.use_fancy_output() {
        let styled = match level {
            Level::Ok => style(message).green().bold(),
            Level::Warn | Level::Info => style(message).yellow().bold(),
        };
        cliclack::outro(styled).ok();
    } else {
        println!();
        println!("{} {}", level.tag(), message);
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    let banner = style(title).yellow().bold();
    if ctx.use_fancy_output() {
        cliclack::intro(banner).ok();
    } else {
        println!("{}\n", banner);
    }
}

pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Level::Ok, message);
}

pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Level::Warn, message);
}

/// Display a titled block of text, such as the map
pub fn note(ctx: &UiContext, title: &str, body: &str) {
    if ctx.use_fancy_output() {
        cliclack::note(title, body).ok();
    } else {
        println!("{}:\n{}", style(title).bold(), body);
    }
}

/// Display a section header
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    if ctx.use_fancy_output() {
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!("{}", style(title).bold());
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    step(ctx, Level::Ok, message);
}

pub fn step_warn(ctx: &UiContext, message: &str) {
    step(ctx, Level::Warn, message);
}

/// Warning followed by a dimmed suggestion
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    step(
        ctx,
        Level::Warn,
        &format!("{} - {}", message, style(hint).dim()),
    );
}

pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Level::Info, message);
}

/// Display a dimmed remark
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print a labelled value
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.use_fancy_output() {
        style(key).dim()
    } else {
        style(key)
    };
    println!("  {}: {}", key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        intro(&ctx, "geocoin");
        step_ok(&ctx, "Collected 3:4#2");
        step_warn_hint(&ctx, "No cache", "Run: geocoin caches");
        key_value(&ctx, "Position", "0.000050, 0.000050");
        note(&ctx, "North is up", "..@.\n....");
        outro_warn(&ctx, "Reset cancelled");
    }

    #[test]
    fn plain_tags() {
        assert_eq!(Level::Ok.tag().force_styling(false).to_string(), "[OK]");
        assert_eq!(Level::Warn.tag().force_styling(false).to_string(), "[WARN]");
    }
}
