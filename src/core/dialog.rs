//! # Confirmation Dialog
//!
//! A yes/no question whose answer is delivered exactly once.
//!
//! ```text
//! AwaitingResponse ──respond(b)──▶ Resolved(b)
//!        │
//!        └──dismiss / drop──────▶ Resolved(false)
//! ```
//!
//! The UI keeps the `ConfirmDialog`; whoever asked the question awaits the
//! matching `DialogResponse`.

use log::debug;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    AwaitingResponse,
    Resolved(bool),
}

#[derive(Debug)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    state: DialogState,
    responder: Option<oneshot::Sender<bool>>,
}

/// The asking side of a dialog.
#[derive(Debug)]
pub struct DialogResponse(oneshot::Receiver<bool>);

impl DialogResponse {
    /// Resolves with the answer, or `false` if the dialog went away unanswered.
    pub async fn wait(self) -> bool {
        self.0.await.unwrap_or(false)
    }
}

impl ConfirmDialog {
    pub fn open(title: impl Into<String>, message: impl Into<String>) -> (Self, DialogResponse) {
        let (tx, rx) = oneshot::channel();
        let dialog = Self {
            title: title.into(),
            message: message.into(),
            state: DialogState::AwaitingResponse,
            responder: Some(tx),
        };
        (dialog, DialogResponse(rx))
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Deliver the answer. Only the first call has any effect.
    pub fn respond(&mut self, answer: bool) {
        let Some(tx) = self.responder.take() else {
            return;
        };
        self.state = DialogState::Resolved(answer);
        // The asker may have stopped waiting; nothing to do then.
        if tx.send(answer).is_err() {
            debug!("Dialog '{}' answered after the asker went away", self.title);
        }
    }

    pub fn dismiss(&mut self) {
        self.respond(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[test]
    fn test_pending_until_answered() {
        let (mut dialog, response) = ConfirmDialog::open("Crash", "Really?");
        let mut waiting = task::spawn(response.wait());

        assert_pending!(waiting.poll());
        assert_eq!(dialog.state(), DialogState::AwaitingResponse);

        dialog.respond(true);
        assert!(waiting.is_woken());
        assert_ready_eq!(waiting.poll(), true);
        assert_eq!(dialog.state(), DialogState::Resolved(true));
    }

    #[test]
    fn test_only_first_answer_counts() {
        let (mut dialog, response) = ConfirmDialog::open("Crash", "Really?");
        dialog.respond(false);
        dialog.respond(true);

        assert_eq!(dialog.state(), DialogState::Resolved(false));
        assert!(!tokio_test::block_on(response.wait()));
    }

    #[test]
    fn test_dismiss_resolves_false() {
        let (mut dialog, response) = ConfirmDialog::open("Crash", "Really?");
        dialog.dismiss();
        assert_eq!(dialog.state(), DialogState::Resolved(false));
        assert!(!tokio_test::block_on(response.wait()));
    }

    #[tokio::test]
    async fn test_dropped_dialog_resolves_false() {
        let (dialog, response) = ConfirmDialog::open("Crash", "Really?");
        drop(dialog);
        assert!(!response.wait().await);
    }

    #[test]
    fn test_answer_after_asker_left_is_harmless() {
        let (mut dialog, response) = ConfirmDialog::open("Crash", "Really?");
        drop(response);
        dialog.respond(true);
        assert_eq!(dialog.state(), DialogState::Resolved(true));
    }
}
