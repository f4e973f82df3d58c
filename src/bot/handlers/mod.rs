pub mod dialogue;
pub mod message;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::state::State;

/// The full update-routing tree.
///
/// Dialogue-state branches come before the command filter on purpose: while
/// a flow is active, any text (including something that looks like a
/// command) belongs to the flow handler, which applies its own ordered
/// predicates. Commands and menu labels are only dispatched from `Idle`.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dptree::case;

    let message_handler = Update::filter_message()
        .branch(case![State::AwaitingGroup].endpoint(dialogue::receive_group_name))
        .branch(case![State::AwaitingPostText].endpoint(dialogue::receive_post_text))
        .branch(case![State::AwaitingPostConfirm { text }].endpoint(dialogue::receive_post_confirm))
        .branch(teloxide::filter_command::<Command, _>().endpoint(message::command_handler))
        .branch(dptree::endpoint(message::menu_handler));

    teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
}
