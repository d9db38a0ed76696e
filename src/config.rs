//! Run configuration: ~/.roadrush/config.json overlaid with CLI flags.

use crate::core::constants::{DEFAULT_FPS, GAME_OVER_DISPLAY_MS, MAX_FPS, MIN_FPS};
use crate::core::types::Variant;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.json";

pub const USAGE: &str = "\
Road Rush - Terminal Lane-Dodge Racer

Usage: roadrush [options]

Options:
  --lanes         Play the lane-hopping game (default)
  --classic       Play the classic free-steering game
  --seed N        Seed the obstacle generator
  --assets DIR    Directory holding player.txt, enemy.txt, road.txt
  --fps N         Target frame rate, 10-240 (default: 60)
  --version       Show version information
  --help          Show this help message

Controls:
  Left/Right (A/D in lanes mode)  Steer
  P or Space                      Pause
  Esc or Q                        Quit";

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub variant: Variant,
    pub target_fps: u32,
    pub assets_dir: PathBuf,
    /// Random seed for reproducible runs (None = random)
    pub seed: Option<u64>,
    /// How long the game-over screen stays up before exiting
    pub game_over_display_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            target_fps: DEFAULT_FPS,
            assets_dir: PathBuf::from("assets"),
            seed: None,
            game_over_display_ms: GAME_OVER_DISPLAY_MS,
        }
    }
}

impl GameConfig {
    /// Load ~/.roadrush/config.json, falling back to defaults.
    pub fn load() -> Self {
        load_json_or_default::<Self>(CONFIG_FILE).sanitized()
    }

    /// Frame budget in seconds.
    pub fn frame_seconds(&self) -> f64 {
        1.0 / self.target_fps as f64
    }

    /// Keep the frame rate where every frame's delta stays under `MAX_DT`,
    /// so game time tracks wall time.
    fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.clamp(MIN_FPS, MAX_FPS);
        self
    }
}

/// Errors from command-line parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown option: {0}")]
    UnknownArgument(String),
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
}

/// What the binary should do after parsing arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Play(GameConfig),
    Version,
    Help,
}

/// Apply CLI arguments (without the program name) on top of `base`.
pub fn parse_args<I, S>(args: I, base: GameConfig) -> Result<CliCommand, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = base;
    let mut args = args.into_iter().map(|s| s.as_ref().to_string());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--lanes" => config.variant = Variant::Lanes,
            "--classic" => config.variant = Variant::Classic,
            "--seed" => config.seed = Some(parse_value(&arg, args.next())?),
            "--fps" => {
                let fps: u32 = parse_value(&arg, args.next())?;
                if fps == 0 {
                    return Err(ConfigError::InvalidValue {
                        flag: arg.clone(),
                        value: "0".to_string(),
                    });
                }
                config.target_fps = fps;
            }
            "--assets" => {
                let dir = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                config.assets_dir = PathBuf::from(dir);
            }
            _ => return Err(ConfigError::UnknownArgument(arg.clone())),
        }
    }

    Ok(CliCommand::Play(config.sanitized()))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::MAX_DT;

    fn play(args: &[&str]) -> GameConfig {
        match parse_args(args.iter(), GameConfig::default()) {
            Ok(CliCommand::Play(c)) => c,
            other => panic!("expected Play, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let c = GameConfig::default();
        assert_eq!(c.variant, Variant::Lanes);
        assert_eq!(c.target_fps, 60);
        assert_eq!(c.seed, None);
        assert_eq!(c.game_over_display_ms, 2000);
        assert!((c.frame_seconds() - 1.0 / 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_args_keeps_base() {
        assert_eq!(play(&[]), GameConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let c = play(&["--classic", "--seed", "42", "--fps", "30", "--assets", "/tmp/a"]);
        assert_eq!(c.variant, Variant::Classic);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.target_fps, 30);
        assert_eq!(c.assets_dir, PathBuf::from("/tmp/a"));
    }

    #[test]
    fn test_last_variant_flag_wins() {
        assert_eq!(play(&["--classic", "--lanes"]).variant, Variant::Lanes);
    }

    #[test]
    fn test_version_and_help() {
        assert_eq!(
            parse_args(["-v"], GameConfig::default()),
            Ok(CliCommand::Version)
        );
        assert_eq!(
            parse_args(["--help"], GameConfig::default()),
            Ok(CliCommand::Help)
        );
    }

    #[test]
    fn test_bad_args() {
        assert_eq!(
            parse_args(["--turbo"], GameConfig::default()),
            Err(ConfigError::UnknownArgument("--turbo".to_string()))
        );
        assert_eq!(
            parse_args(["--seed"], GameConfig::default()),
            Err(ConfigError::MissingValue("--seed".to_string()))
        );
        assert_eq!(
            parse_args(["--fps", "fast"], GameConfig::default()),
            Err(ConfigError::InvalidValue {
                flag: "--fps".to_string(),
                value: "fast".to_string()
            })
        );
        assert!(parse_args(["--fps", "0"], GameConfig::default()).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: GameConfig = serde_json::from_str(r#"{"variant":"classic"}"#).unwrap();
        assert_eq!(c.variant, Variant::Classic);
        assert_eq!(c.target_fps, 60);
        assert_eq!(c.assets_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_fps_clamped() {
        assert_eq!(play(&["--fps", "10000"]).target_fps, MAX_FPS);
    }

    #[test]
    fn test_low_fps_raised_to_unclamped_frame_time() {
        for fps in [1, 4, 9] {
            let fps = fps.to_string();
            let c = play(&["--fps", fps.as_str()]);
            assert_eq!(c.target_fps, MIN_FPS);
            assert!(c.frame_seconds() <= MAX_DT);
        }
        assert_eq!(play(&["--fps", "10"]).target_fps, 10);
    }

    #[test]
    fn test_low_fps_in_config_file_raised() {
        let c: GameConfig = serde_json::from_str(r#"{"target_fps":2}"#).unwrap();
        assert_eq!(c.sanitized().target_fps, MIN_FPS);
    }
}
