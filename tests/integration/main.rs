//! Integration tests for geocoin

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Isolated config and state for one test
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new(config: &str) -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::write(dir.path().join("config.toml"), config).unwrap();
            Self { dir }
        }

        /// Every tile holds a cache, small window
        fn stocked() -> Self {
            Self::new("[board]\nvisibility_radius = 2\n\n[caches]\nspawn_probability = 1.0\n")
        }

        /// No tile holds a cache
        fn barren() -> Self {
            Self::new("[board]\nvisibility_radius = 2\n\n[caches]\nspawn_probability = 0.0\n")
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn state_dir(&self) -> PathBuf {
            self.dir.path().join("state")
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("geocoin");
            cmd.env("GEOCOIN_CONFIG", self.config_path())
                .env("GEOCOIN_STATE_DIR", self.state_dir())
                .env_remove("RUST_LOG");
            cmd
        }

        fn json(&self, args: &[&str]) -> serde_json::Value {
            let output = self.cmd().args(args).output().unwrap();
            assert!(output.status.success(), "{:?} failed", args);
            serde_json::from_slice(&output.stdout).unwrap()
        }

        /// First cache in view with coins, as (i, j, coins)
        fn stocked_cache(&self) -> (i64, i64, u64) {
            let caches = self.json(&["caches", "--format", "json"]);
            caches
                .as_array()
                .unwrap()
                .iter()
                .find(|m| m["coins"].as_u64().unwrap() > 0)
                .map(|m| {
                    (
                        m["cell"]["i"].as_i64().unwrap(),
                        m["cell"]["j"].as_i64().unwrap(),
                        m["coins"].as_u64().unwrap(),
                    )
                })
                .unwrap()
        }

        fn coins_at(&self, i: i64, j: i64) -> Option<u64> {
            let caches = self.json(&["caches", "--format", "json"]);
            caches
                .as_array()
                .unwrap()
                .iter()
                .find(|m| m["cell"]["i"] == i && m["cell"]["j"] == j)
                .map(|m| m["coins"].as_u64().unwrap())
        }

        fn inventory_len(&self) -> usize {
            self.json(&["inventory", "--format", "json"])
                .as_array()
                .unwrap()
                .len()
        }

        fn path(&self, name: &str) -> PathBuf {
            self.state_dir().join(name)
        }
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("geocoin")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("collect and stash coins"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("geocoin")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("geocoin"));
    }

    #[test]
    fn status_on_fresh_game() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Position"))
            .stdout(predicate::str::contains("Caches in view: 16"));
    }

    #[test]
    fn move_extends_history() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["move", "north", "--steps", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Now at"));

        let history = sandbox.json(&["history", "--format", "json"]);
        assert_eq!(history.as_array().unwrap().len(), 3);
        assert!(sandbox.path("geocoin.player.json").exists());
    }

    #[test]
    fn goto_accepts_negative_coordinates() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["goto", "-33.85", "151.21"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-33.850000, 151.210000"));
    }

    #[test]
    fn collect_without_cache_fails() {
        let sandbox = Sandbox::barren();
        sandbox
            .cmd()
            .args(["collect", "0", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cache"))
            .stderr(predicate::str::contains("geocoin caches"));
    }

    #[test]
    fn collect_moves_coin_to_inventory() {
        let sandbox = Sandbox::stocked();
        let (i, j, coins) = sandbox.stocked_cache();
        let (si, sj) = (i.to_string(), j.to_string());

        sandbox
            .cmd()
            .args(["collect", &si, &sj])
            .assert()
            .success()
            .stdout(predicate::str::contains("Collected"));

        assert_eq!(sandbox.inventory_len(), 1);
        assert_eq!(sandbox.coins_at(i, j), Some(coins - 1));
    }

    #[test]
    fn collected_coin_survives_walking_away() {
        let sandbox = Sandbox::stocked();
        let (i, j, coins) = sandbox.stocked_cache();
        let (si, sj) = (i.to_string(), j.to_string());

        sandbox
            .cmd()
            .args(["collect", &si, &sj])
            .assert()
            .success();
        sandbox
            .cmd()
            .args(["move", "east", "--steps", "10"])
            .assert()
            .success();
        assert_eq!(sandbox.coins_at(i, j), None);

        sandbox
            .cmd()
            .args(["move", "west", "--steps", "10"])
            .assert()
            .success();
        assert_eq!(sandbox.coins_at(i, j), Some(coins - 1));
        assert_eq!(sandbox.inventory_len(), 1);
    }

    #[test]
    fn deposit_with_empty_inventory_warns() {
        let sandbox = Sandbox::stocked();
        let (i, j, coins) = sandbox.stocked_cache();

        sandbox
            .cmd()
            .args(["deposit", &i.to_string(), &j.to_string()])
            .assert()
            .success()
            .stdout(predicate::str::contains("no coins"));
        assert_eq!(sandbox.coins_at(i, j), Some(coins));
    }

    #[test]
    fn reset_requires_confirmation() {
        let sandbox = Sandbox::stocked();
        let (i, j, _) = sandbox.stocked_cache();
        sandbox
            .cmd()
            .args(["collect", &i.to_string(), &j.to_string()])
            .assert()
            .success();

        sandbox
            .cmd()
            .arg("reset")
            .assert()
            .success()
            .stdout(predicate::str::contains("Reset cancelled"));
        assert_eq!(sandbox.inventory_len(), 1);

        sandbox.cmd().args(["reset", "--yes"]).assert().success();
        assert_eq!(sandbox.inventory_len(), 0);
    }

    #[test]
    fn goto_off_the_grid_is_rejected() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["goto", "300000", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid position"));

        let history = sandbox.json(&["history", "--format", "json"]);
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_cache_state_drops_carried_coins() {
        let sandbox = Sandbox::stocked();
        let (i, j, _) = sandbox.stocked_cache();
        sandbox
            .cmd()
            .args(["collect", &i.to_string(), &j.to_string()])
            .assert()
            .success();
        std::fs::write(sandbox.path("geocoin.caches.json"), "{ truncated").unwrap();

        assert_eq!(sandbox.inventory_len(), 0);
    }

    #[test]
    fn oversized_radius_is_rejected() {
        let sandbox = Sandbox::new("[board]\nvisibility_radius = 100000\n");
        sandbox
            .cmd()
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("visibility_radius"));
    }

    #[test]
    fn corrupt_state_starts_over() {
        let sandbox = Sandbox::stocked();
        std::fs::create_dir_all(sandbox.state_dir()).unwrap();
        std::fs::write(sandbox.path("geocoin.caches.json"), "{{{ not json").unwrap();

        sandbox.cmd().arg("status").assert().success();
        assert_eq!(sandbox.inventory_len(), 0);
    }

    #[test]
    fn map_draws_player() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .arg("map")
            .assert()
            .success()
            .stdout(predicate::str::contains("@"));
    }

    #[test]
    fn config_path_honors_env() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[caches]"))
            .stdout(predicate::str::contains("spawn_probability = 1.0"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let sandbox = Sandbox::stocked();
        sandbox
            .cmd()
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn invalid_config_reports_hint() {
        let sandbox = Sandbox::new("[board]\ntile_width = 0.0\n");
        sandbox
            .cmd()
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("tile_width"))
            .stderr(predicate::str::contains("config init --force"));
    }

    #[test]
    fn config_init_force_repairs_invalid_file() {
        let sandbox = Sandbox::new("[board]\ntile_width = 0.0\n");
        sandbox
            .cmd()
            .args(["config", "init", "--force"])
            .assert()
            .success();
        sandbox.cmd().arg("status").assert().success();
    }

    #[test]
    fn completions_generate() {
        cargo_bin_cmd!("geocoin")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("geocoin"));
    }

    #[test]
    fn invalid_direction_rejected() {
        let sandbox = Sandbox::stocked();
        sandbox.cmd().args(["move", "up"]).assert().failure();
    }
}
