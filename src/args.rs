//! Command-line surface and settings resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::Timing;
use crate::sound::ExitSound;

/// Simple auto clicker.
#[derive(Parser, Debug, Default)]
#[command(name = "autoclick", about = "Simple auto clicker.", version)]
pub struct Args {
    /// Every 10 seconds, stop and ask whether to keep or stop clicking.
    #[arg(long)]
    pub pause_every_10: bool,

    /// Path to a short sound file to play when the clicker stops because the
    /// fail-safe feature was triggered. Defaults to a short ping sound.
    #[arg(long, value_name = "PATH")]
    pub sound_on_exit: Option<String>,

    /// Load settings from a JSON config file. Explicit flags still win.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the resolved settings to a JSON config file, then run.
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Write log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// On-disk settings, shareable between invocations via `--save-config` and
/// `--config`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub pause_every_10: bool,
    pub sound_on_exit: Option<String>,
}

impl Config {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write config to {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(&path)
            .with_context(|| format!("cannot read config from {}", path.as_ref().display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("invalid config file {}", path.as_ref().display()))?;
        Ok(config)
    }
}

/// What the clicker actually runs with, after config merging and exit-sound
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pause_every_10: bool,
    pub sound: ExitSound,
    pub timing: Timing,
}

impl Args {
    /// Merges `--config` values under the explicit flags, resolves the
    /// exit-sound path, and handles `--save-config`.
    pub fn resolve(&self) -> Result<Settings> {
        let config = match &self.config {
            Some(path) => {
                let config = Config::load_from_file(path)?;
                debug!(path = %path.display(), "loaded config");
                config
            }
            None => Config::default(),
        };

        let pause_every_10 = self.pause_every_10 || config.pause_every_10;
        let custom_sound = self.sound_on_exit.clone().or(config.sound_on_exit);

        if let Some(path) = &self.save_config {
            let snapshot = Config {
                pause_every_10,
                sound_on_exit: custom_sound.clone(),
            };
            match snapshot.save_to_file(path) {
                Ok(()) => println!("✅ Configuration saved to {}", path.display()),
                Err(err) => eprintln!("❌ Failed to save config: {err}"),
            }
        }

        Ok(Settings {
            pause_every_10,
            sound: resolve_exit_sound(custom_sound.as_deref()),
            timing: Timing::default(),
        })
    }
}

/// Expands and validates a custom exit-sound path. An unusable path falls
/// back to the built-in sound, with a single warning.
fn resolve_exit_sound(custom: Option<&str>) -> ExitSound {
    let Some(raw) = custom else {
        return ExitSound::Bundled;
    };

    let expanded = expand_home(raw);
    if expanded.is_file() {
        ExitSound::File(expanded)
    } else {
        warn!(
            path = %expanded.display(),
            "custom exit sound not found, falling back to the default"
        );
        ExitSound::Bundled
    }
}

/// `~` and `~/...` expansion; every other path passes through untouched.
fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Collects formatted log lines so a test can count emitted events.
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "autoclick",
            "--pause-every-10",
            "--sound-on-exit",
            "ping.wav",
            "-vv",
        ])
        .unwrap();
        assert!(args.pause_every_10);
        assert_eq!(args.sound_on_exit.as_deref(), Some("ping.wav"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_defaults_resolve_to_bundled_sound() {
        let settings = Args::default().resolve().unwrap();
        assert!(!settings.pause_every_10);
        assert_eq!(settings.sound, ExitSound::Bundled);
        assert_eq!(settings.timing, Timing::default());
    }

    #[test]
    fn test_missing_custom_sound_falls_back_to_default() {
        let resolved = resolve_exit_sound(Some("/definitely/not/here.wav"));
        assert_eq!(resolved, ExitSound::Bundled);
    }

    #[test]
    fn test_fallback_warns_exactly_once() {
        let buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || LogCapture(Arc::clone(&sink)))
            .with_ansi(false)
            .finish();

        let resolved = tracing::subscriber::with_default(subscriber, || {
            resolve_exit_sound(Some("/definitely/not/here.wav"))
        });

        assert_eq!(resolved, ExitSound::Bundled);
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("custom exit sound not found").count(), 1);
        assert!(output.contains("WARN"));
    }

    #[test]
    fn test_existing_custom_sound_is_kept() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"RIFF").unwrap();

        let raw = file.path().to_str().unwrap();
        assert_eq!(
            resolve_exit_sound(Some(raw)),
            ExitSound::File(file.path().to_owned())
        );
    }

    #[test]
    fn test_tilde_expansion_only_for_custom_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/sounds/ping.wav"), home.join("sounds/ping.wav"));
            assert_eq!(expand_home("~"), home);
        }
        assert_eq!(expand_home("/tmp/ping.wav"), PathBuf::from("/tmp/ping.wav"));
        assert_eq!(expand_home("ping.wav"), PathBuf::from("ping.wav"));
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autoclick.json");

        let config = Config {
            pause_every_10: true,
            sound_on_exit: Some("/tmp/ping.wav".to_owned()),
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_flags_win_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autoclick.json");
        Config {
            pause_every_10: true,
            sound_on_exit: Some("/from/config.wav".to_owned()),
        }
        .save_to_file(&path)
        .unwrap();

        let mut sound = tempfile::NamedTempFile::new().unwrap();
        sound.write_all(b"RIFF").unwrap();

        let args = Args {
            sound_on_exit: Some(sound.path().to_str().unwrap().to_owned()),
            config: Some(path),
            ..Args::default()
        };
        let settings = args.resolve().unwrap();

        // Config may switch pausing on, the explicit sound flag still wins.
        assert!(settings.pause_every_10);
        assert_eq!(settings.sound, ExitSound::File(sound.path().to_owned()));
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/definitely/not/here.json")),
            ..Args::default()
        };
        assert!(args.resolve().is_err());
    }
}
