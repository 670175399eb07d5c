//! Exit-sound playback.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, Sink};
use thiserror::Error;
use tracing::debug;

use crate::constants;

/// Which sound to play when the fail-safe stops the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitSound {
    /// The built-in ping, embedded in the binary.
    Bundled,
    /// An operator-supplied file.
    File(PathBuf),
}

impl fmt::Display for ExitSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitSound::Bundled => f.write_str("the built-in exit sound"),
            ExitSound::File(path) => write!(f, "sound file {}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("cannot open sound file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot decode {sound}: {source}")]
    Decode {
        sound: ExitSound,
        source: rodio::decoder::DecoderError,
    },
    #[error("no usable audio output: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("playback failed: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Audio playback capability for the exit notification sound.
pub trait SoundPlayer {
    fn play(&mut self, sound: &ExitSound) -> Result<(), PlaybackError>;
}

/// Plays through the default audio output, blocking until the sound ends.
pub struct SystemPlayer;

impl SoundPlayer for SystemPlayer {
    fn play(&mut self, sound: &ExitSound) -> Result<(), PlaybackError> {
        // Read and decode first: a bad file must be reportable even on
        // machines with no audio output device.
        let bytes = match sound {
            ExitSound::Bundled => constants::DEFAULT_SOUND.to_vec(),
            ExitSound::File(path) => fs::read(path).map_err(|source| PlaybackError::Open {
                path: path.clone(),
                source,
            })?,
        };
        let source = Decoder::new(Cursor::new(bytes)).map_err(|source| PlaybackError::Decode {
            sound: sound.clone(),
            source,
        })?;

        let (_stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        debug!(%sound, "playing exit sound");
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rodio::Source;

    use super::*;

    #[test]
    fn test_missing_file_reports_open_error() {
        let mut player = SystemPlayer;
        let err = player
            .play(&ExitSound::File("/definitely/not/here.wav".into()))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Open { .. }));
    }

    #[test]
    fn test_garbage_file_reports_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not audio data").unwrap();

        let mut player = SystemPlayer;
        let err = player
            .play(&ExitSound::File(file.path().to_owned()))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Decode { .. }));
    }

    #[test]
    fn test_bundled_sound_decodes_from_the_binary() {
        // The default sound ships inside the executable, so it must decode
        // without touching the filesystem or an audio device.
        let source = Decoder::new(Cursor::new(constants::DEFAULT_SOUND)).unwrap();
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), 8000);
    }
}
