mod args;
pub mod constants;
mod device;
mod dialog;
mod sound;

pub use args::{Args, Config, Settings};
pub use constants::Timing;
pub use device::{in_failsafe_corner, Pointer, PointerError, SystemPointer, FAILSAFE_MARGIN};
pub use dialog::{ConfirmGate, DesktopGate};
pub use sound::{ExitSound, PlaybackError, SoundPlayer, SystemPlayer};

use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

/// How a session ended. Every variant is a normal outcome of the state
/// machine and maps to a distinct operator-facing message; the process
/// exits 0 for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The start prompt was declined; no click was ever issued.
    NotStarted,
    /// The operator chose to stop at a pause prompt.
    Stopped,
    /// The cursor reached a fail-safe corner of the screen.
    FailSafe,
    /// The interrupt flag was raised while running.
    Interrupted,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::NotStarted => constants::NOT_STARTED_MSG,
            Outcome::Stopped => constants::STOPPED_MSG,
            Outcome::FailSafe => constants::FAILSAFE_MSG,
            Outcome::Interrupted => constants::INTERRUPTED_MSG,
        }
    }
}

/// Clicks the left mouse button at the current cursor position until the
/// operator stops it, the cursor hits a fail-safe corner, or the process
/// is interrupted.
///
/// The pointer, confirmation gate and sound player are injected so the
/// loop can run against fakes; the interrupt flag is the only value shared
/// with the outside.
pub struct AutoClicker<P, G, S> {
    pointer: P,
    gate: G,
    player: S,
    pause_every_10: bool,
    sound: ExitSound,
    timing: Timing,
    interrupt: Arc<AtomicBool>,
}

impl AutoClicker<SystemPointer, DesktopGate, SystemPlayer> {
    /// Builds the production stack from resolved settings.
    pub fn open(settings: Settings, interrupt: Arc<AtomicBool>) -> Result<Self, PointerError> {
        let pointer = SystemPointer::open()?;
        Ok(Self::new(
            settings,
            pointer,
            DesktopGate::new(constants::DIALOG_TITLE),
            SystemPlayer,
            interrupt,
        ))
    }
}

impl<P, G, S> AutoClicker<P, G, S>
where
    P: Pointer,
    G: ConfirmGate,
    S: SoundPlayer,
{
    pub fn new(
        settings: Settings,
        pointer: P,
        gate: G,
        player: S,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            pointer,
            gate,
            player,
            pause_every_10: settings.pause_every_10,
            sound: settings.sound,
            timing: settings.timing,
            interrupt,
        }
    }

    /// Runs one full session: start prompt, countdown, click loop.
    ///
    /// `Ok` carries the state-machine outcome; `Err` is reserved for pointer
    /// backend failures other than the fail-safe.
    pub fn run(&mut self) -> Result<Outcome, PointerError> {
        let accepted = self.gate.confirm(
            constants::START_MSG,
            constants::BTN_OK,
            constants::BTN_CANCEL,
        );
        if !accepted {
            debug!("start prompt declined");
            return Ok(Outcome::NotStarted);
        }

        self.countdown();
        if self.interrupted() {
            info!("interrupted during the countdown");
            return Ok(Outcome::Interrupted);
        }
        self.click_loop()
    }

    /// Gives the operator time to move the cursor into position before the
    /// first click.
    fn countdown(&mut self) {
        let secs = self.timing.countdown.as_secs();
        println!("\nStarting clicking in {secs} seconds...");
        for left in (1..=secs).rev() {
            if self.interrupted() {
                return;
            }
            print!("{left} ");
            let _ = stdout().flush();
            self.pointer.sleep(Duration::from_secs(1));
        }
        println!();
    }

    fn click_loop(&mut self) -> Result<Outcome, PointerError> {
        println!("\n{}", constants::CLICKING_MSG);
        info!(pause_every_10 = self.pause_every_10, "clicking started");
        let mut anchor = self.pointer.now();

        loop {
            if self.interrupted() {
                info!("interrupt flag raised, stopping");
                return Ok(Outcome::Interrupted);
            }

            match self.pointer.click() {
                Ok(()) => {}
                Err(PointerError::FailSafe { x, y }) => {
                    info!(x, y, "fail-safe corner reached");
                    self.play_exit_sound();
                    return Ok(Outcome::FailSafe);
                }
                Err(err) => return Err(err),
            }

            self.pointer.sleep(self.timing.click_interval);

            if self.pause_every_10
                && self.pointer.now().duration_since(anchor) >= self.timing.pause_after
            {
                if self.stop_requested() {
                    info!("stopped at pause prompt");
                    return Ok(Outcome::Stopped);
                }
                // The anchor resets after the resume delay, so time spent
                // inside the prompt never counts toward the next interval.
                self.pointer.sleep(self.timing.resume_delay);
                anchor = self.pointer.now();
            }
        }
    }

    /// Periodic stop prompt. The affirmative choice is the Cancel button,
    /// so a dismissed prompt keeps the clicker running.
    fn stop_requested(&mut self) -> bool {
        self.gate.confirm(
            constants::STOP_MSG,
            constants::BTN_CANCEL,
            constants::BTN_OK,
        )
    }

    /// Playback failures are reported and otherwise ignored; the fail-safe
    /// exit proceeds regardless.
    fn play_exit_sound(&mut self) {
        if let Err(err) = self.player.play(&self.sound) {
            println!("Sound failed to play ({err}).");
            warn!(%err, "exit sound playback failed");
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }
}
