use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::bot::keyboards::labels;
use crate::utils::validation::normalize_group_name;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Per-user conversation state, keyed by chat id in the dialogue storage.
///
/// Exactly one state per user at a time; every flow ends back in `Idle` on
/// completion or cancellation.
#[derive(Clone, Default)]
pub enum State {
    #[default]
    Idle,
    /// Registration or group change: waiting for a group name.
    AwaitingGroup,
    /// Broadcast authoring: waiting for the message text.
    AwaitingPostText,
    /// Broadcast authoring: waiting for YES/NO on the echoed text.
    AwaitingPostConfirm { text: String },
}

/// Routing decision for text received in [`State::AwaitingGroup`].
#[derive(Debug, PartialEq, Eq)]
pub enum GroupInput {
    Cancel,
    /// Canonical (uppercased) group name.
    Group(String),
    Invalid,
}

/// Ordered, deterministic routing for the group flow: the cancel keyword
/// wins over a format match, which wins over the mismatch catch-all.
pub fn classify_group_input(text: &str) -> GroupInput {
    let text = text.trim();
    if text == labels::CANCEL {
        return GroupInput::Cancel;
    }
    match normalize_group_name(text) {
        Ok(group) => GroupInput::Group(group),
        Err(_) => GroupInput::Invalid,
    }
}

/// Routing decision for text received in [`State::AwaitingPostConfirm`].
#[derive(Debug, PartialEq, Eq)]
pub enum ConfirmInput {
    Yes,
    No,
    /// Only YES/NO are recognized; anything else is a no-op.
    Other,
}

pub fn classify_confirm_input(text: &str) -> ConfirmInput {
    match text.trim().to_uppercase().as_str() {
        "YES" => ConfirmInput::Yes,
        "NO" => ConfirmInput::No,
        _ => ConfirmInput::Other,
    }
}
