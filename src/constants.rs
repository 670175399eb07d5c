//! Operator-facing strings and the default click schedule.

use std::time::Duration;

/// Title shown on every confirmation dialog.
pub const DIALOG_TITLE: &str = "Auto Clicker";

/// Body of the start prompt.
pub const START_MSG: &str = "\
Press OK to START the Clicker.

Then, move your mouse to the desired location.
There will be a 5 seconds countdown to give you time to move.

Every 10 seconds a window will pop-up to stop the program if desired.
You can also move the mouse to any corner of the screen to stop the program.";

/// Body of the periodic stop prompt.
pub const STOP_MSG: &str = "\
Press CANCEL to quit program or OK to keep clicking.

If you press OK, you will have 2 seconds to move the cursor back
to the desired position.";

pub const BTN_OK: &str = "OK";
pub const BTN_CANCEL: &str = "Cancel";

pub const CLICKING_MSG: &str = "Clicking...";
pub const NOT_STARTED_MSG: &str = "Clicker not started. Restart the program to run again.";
pub const STOPPED_MSG: &str = "Program stopped by user. Exiting...";
pub const FAILSAFE_MSG: &str = "Mouse moved to a corner. Exiting program.";
pub const INTERRUPTED_MSG: &str = "Program interrupted by user. Exiting...";

/// Built-in sound played when the fail-safe stops the run, embedded in the
/// binary.
pub const DEFAULT_SOUND: &[u8] = include_bytes!("../assets/exit-ping.wav");

/// Delay between confirmation and the first click, so the operator can
/// position the cursor.
pub const COUNTDOWN: Duration = Duration::from_secs(5);
/// Sleep between two consecutive clicks.
pub const CLICK_INTERVAL: Duration = Duration::from_millis(200);
/// Continuous running time after which the stop prompt appears.
pub const PAUSE_AFTER: Duration = Duration::from_secs(10);
/// Delay between choosing to continue and the next click.
pub const RESUME_DELAY: Duration = Duration::from_secs(2);

/// The four intervals that pace a run. Defaults match the documented
/// behavior; tests shrink them through a fake pointer clock instead of
/// overriding the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub countdown: Duration,
    pub click_interval: Duration,
    pub pause_after: Duration,
    pub resume_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            countdown: COUNTDOWN,
            click_interval: CLICK_INTERVAL,
            pause_after: PAUSE_AFTER,
            resume_delay: RESUME_DELAY,
        }
    }
}
