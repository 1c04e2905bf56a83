//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{GeocoinError, GeocoinResult};
use crate::ui::{self, UiContext};
use std::str::FromStr;

/// Keys accepted by `config set`
const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "board.tile_width",
    "board.visibility_radius",
    "board.registry_retention",
    "caches.spawn_probability",
    "caches.coin_scale",
    "player.start_lat",
    "player.start_lng",
    "player.trail_limit",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> GeocoinResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> GeocoinResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok(
        &ctx,
        &format!("Configuration initialized at {}", path.display()),
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> GeocoinResult<()> {
    let ctx = UiContext::detect();
    let mut config = config.clone();
    apply(&mut config, key, value)?;

    config
        .validate()
        .map_err(|reason| GeocoinError::ConfigInvalid {
            path: manager.path().to_path_buf(),
            reason,
        })?;

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

/// Write one dot-separated key into `config`
fn apply(config: &mut Config, key: &str, value: &str) -> GeocoinResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["board", "tile_width"] => config.board.tile_width = parse(value)?,
        ["board", "visibility_radius"] => config.board.visibility_radius = parse(value)?,
        ["board", "registry_retention"] => config.board.registry_retention = parse(value)?,

        ["caches", "spawn_probability"] => config.caches.spawn_probability = parse(value)?,
        ["caches", "coin_scale"] => config.caches.coin_scale = parse(value)?,

        ["player", "start_lat"] => config.player.start_lat = parse(value)?,
        ["player", "start_lng"] => config.player.start_lng = parse(value)?,
        ["player", "trail_limit"] => config.player.trail_limit = parse(value)?,

        _ => {
            return Err(GeocoinError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn parse<T: FromStr>(value: &str) -> GeocoinResult<T> {
    value
        .parse()
        .map_err(|_| GeocoinError::User(format!("Invalid number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn apply_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "caches.spawn_probability", "0.5").unwrap();
        apply(&mut config, "board.visibility_radius", "3").unwrap();
        apply(&mut config, "player.trail_limit", "50").unwrap();

        assert_eq!(config.caches.spawn_probability, 0.5);
        assert_eq!(config.board.visibility_radius, 3);
        assert_eq!(config.player.trail_limit, 50);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "vm.name", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn apply_rejects_bad_number() {
        let mut config = Config::default();
        assert!(apply(&mut config, "caches.coin_scale", "lots").is_err());
        assert!(apply(&mut config, "board.visibility_radius", "-1").is_err());
    }

    #[tokio::test]
    async fn set_value_refuses_invalid_config() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        let err = set_value(&manager, &Config::default(), "caches.spawn_probability", "2")
            .await
            .unwrap_err();
        assert!(matches!(err, GeocoinError::ConfigInvalid { .. }));
        assert!(!manager.path().exists());
    }

    #[tokio::test]
    async fn set_value_persists() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        set_value(&manager, &Config::default(), "caches.coin_scale", "7")
            .await
            .unwrap();
        assert_eq!(manager.load().await.unwrap().caches.coin_scale, 7);
    }
}
