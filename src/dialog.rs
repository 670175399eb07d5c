//! Modal confirmation prompts.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::debug;

/// One-shot yes/no style prompt. Blocks the calling thread until the operator
/// answers; closing the prompt any other way counts as the negative choice.
pub trait ConfirmGate {
    fn confirm(&mut self, message: &str, affirmative: &str, negative: &str) -> bool;
}

/// Native message-box gate.
pub struct DesktopGate {
    title: String,
}

impl DesktopGate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl ConfirmGate for DesktopGate {
    fn confirm(&mut self, message: &str, affirmative: &str, negative: &str) -> bool {
        let choice = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(self.title.as_str())
            .set_description(message)
            .set_buttons(MessageButtons::OkCancelCustom(
                affirmative.to_owned(),
                negative.to_owned(),
            ))
            .show();
        debug!(?choice, affirmative, "prompt answered");
        matches!(choice, MessageDialogResult::Custom(label) if label == affirmative)
    }
}
