//! CLI argument definitions using clap derive

use crate::session::Direction;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// geocoin - collect and stash coins hidden around the map
///
/// The world is a grid of small tiles. Some tiles hold a cache of coins;
/// walk near one to take coins from it or leave coins in it.
#[derive(Parser, Debug)]
#[command(name = "geocoin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GEOCOIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the saved game
    #[arg(long, global = true, env = "GEOCOIN_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show position, inventory, and nearby caches
    Status,

    /// Walk one or more tiles in a direction
    Move(MoveArgs),

    /// Jump to a coordinate
    Goto {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },

    /// List caches in view
    Caches {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List coins you are carrying
    Inventory {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Take coins from a cache
    Collect(TransferArgs),

    /// Leave coins in a cache
    Deposit(TransferArgs),

    /// Draw the neighborhood as text
    Map,

    /// Show where you have been
    History {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Number of entries to show, newest last (0 = all)
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Start the game over
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Compass heading accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Heading {
    #[value(alias = "n")]
    North,
    #[value(alias = "s")]
    South,
    #[value(alias = "e")]
    East,
    #[value(alias = "w")]
    West,
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::North => Direction::North,
            Heading::South => Direction::South,
            Heading::East => Direction::East,
            Heading::West => Direction::West,
        }
    }
}

/// Arguments for the move command
#[derive(Parser, Debug)]
pub struct MoveArgs {
    /// Direction to walk
    pub direction: Heading,

    /// Number of tiles
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub steps: u32,
}

/// Arguments for collect and deposit
#[derive(Parser, Debug)]
pub struct TransferArgs {
    /// Cache row (latitude index)
    #[arg(allow_negative_numbers = true)]
    pub i: i32,

    /// Cache column (longitude index)
    #[arg(allow_negative_numbers = true)]
    pub j: i32,

    /// Number of coins to move
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., caches.spawn_probability)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn cli_parses_status() {
        let cli = Cli::parse_from(["geocoin", "status"]);
        assert!(matches!(cli.command, Commands::Status));
    }

    #[test]
    fn cli_parses_move() {
        let cli = Cli::parse_from(["geocoin", "move", "north"]);
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.direction, Heading::North);
                assert_eq!(args.steps, 1);
            }
            _ => panic!("expected Move command"),
        }
    }

    #[test]
    fn cli_parses_move_alias_and_steps() {
        let cli = Cli::parse_from(["geocoin", "move", "w", "--steps", "3"]);
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(Direction::from(args.direction), Direction::West);
                assert_eq!(args.steps, 3);
            }
            _ => panic!("expected Move command"),
        }
    }

    #[test]
    fn cli_rejects_zero_steps() {
        assert!(Cli::try_parse_from(["geocoin", "move", "east", "--steps", "0"]).is_err());
    }

    #[test]
    fn cli_parses_goto_negative() {
        let cli = Cli::parse_from(["geocoin", "goto", "36.98", "-122.06"]);
        match cli.command {
            Commands::Goto { lat, lng } => {
                assert_eq!(lat, 36.98);
                assert_eq!(lng, -122.06);
            }
            _ => panic!("expected Goto command"),
        }
    }

    #[test]
    fn cli_parses_collect_negative_cell() {
        let cli = Cli::parse_from(["geocoin", "collect", "-3", "4", "--count", "2"]);
        match cli.command {
            Commands::Collect(args) => {
                assert_eq!((args.i, args.j), (-3, 4));
                assert_eq!(args.count, 2);
            }
            _ => panic!("expected Collect command"),
        }
    }

    #[test]
    fn cli_parses_caches_format() {
        let cli = Cli::parse_from(["geocoin", "caches", "--format", "json"]);
        match cli.command {
            Commands::Caches { format } => assert_eq!(format, OutputFormat::Json),
            _ => panic!("expected Caches command"),
        }
    }

    #[test]
    fn cli_parses_reset_yes() {
        let cli = Cli::parse_from(["geocoin", "reset", "-y"]);
        assert!(matches!(cli.command, Commands::Reset { yes: true }));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["geocoin", "status"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["geocoin", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    #[serial]
    fn state_dir_from_env() {
        std::env::set_var("GEOCOIN_STATE_DIR", "/tmp/geocoin-env-test");
        let cli = Cli::parse_from(["geocoin", "status"]);
        std::env::remove_var("GEOCOIN_STATE_DIR");

        assert_eq!(
            cli.state_dir,
            Some(PathBuf::from("/tmp/geocoin-env-test"))
        );
    }

    #[test]
    #[serial]
    fn state_dir_flag_overrides_env() {
        std::env::set_var("GEOCOIN_STATE_DIR", "/tmp/from-env");
        let cli = Cli::parse_from(["geocoin", "--state-dir", "/tmp/from-flag", "map"]);
        std::env::remove_var("GEOCOIN_STATE_DIR");

        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/from-flag")));
    }
}
