//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::Level;

use crate::types::{GameConfig, INITIAL_LIVES, TICK_INTERVAL_MS};

#[derive(Debug, Clone, Parser)]
#[command(name = "falltris", version, about = "Falling-block puzzle game for the terminal")]
pub struct Cli {
    /// Milliseconds between gravity ticks.
    #[arg(
        long = "tick-ms",
        env = "FALLTRIS_TICK_MS",
        default_value_t = TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Lives shown in the side panel.
    #[arg(long, env = "FALLTRIS_LIVES", default_value_t = INITIAL_LIVES)]
    pub lives: u32,

    /// Seed for piece selection; derived from the system clock when absent.
    #[arg(long, env = "FALLTRIS_SEED")]
    pub seed: Option<u32>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long = "log-file", env = "FALLTRIS_LOG")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (default INFO, -v = DEBUG, -vv = TRACE)"
    )]
    pub verbose: u8,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            tick_interval_ms: self.tick_ms,
            initial_lives: self.lives,
            seed: self.seed.unwrap_or_else(clock_seed),
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_config() {
        let cli = Cli::try_parse_from(["falltris", "--seed", "7"]).unwrap();
        let config = cli.game_config();
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.initial_lives, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(cli.log_level(), Level::INFO);
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(Cli::try_parse_from(["falltris", "--tick-ms", "0"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["falltris", "-vv", "--tick-ms", "250"]).unwrap();
        assert_eq!(cli.log_level(), Level::TRACE);
        assert_eq!(cli.game_config().tick_interval_ms, 250);
    }
}
