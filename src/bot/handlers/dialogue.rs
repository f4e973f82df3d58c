//! Handlers for the active dialogue flows: group registration/change and
//! broadcast authoring.

use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{Message, ParseMode};
use teloxide::Bot;
use tracing::error;

use crate::bot::keyboards;
use crate::bot::state::{
    classify_confirm_input, classify_group_input, ConfirmInput, GroupInput, HandlerResult,
    MyDialogue, State,
};
use crate::bot::AppContext;
use crate::database::models::User;
use crate::error::BotError;
use crate::services::broadcast;
use crate::utils::html::escape_html;

/// `AwaitingGroup`: cancel keyword, then format match, then the mismatch
/// catch-all which keeps the user in the flow.
pub async fn receive_group_name(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    ctx: AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let _guard = ctx.locks.acquire(chat_id).await;

    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please send the group name as plain text.")
            .await?;
        return Ok(());
    };

    match classify_group_input(text) {
        GroupInput::Cancel => {
            dialogue.exit().await?;
            bot.send_message(msg.chat.id, "Action cancelled.")
                .reply_markup(keyboards::settings_menu())
                .await?;
        }
        GroupInput::Group(group) => match User::upsert(&ctx.db.pool, chat_id, &group).await {
            Ok(()) => {
                dialogue.exit().await?;
                bot.send_message(msg.chat.id, "All saved, thank you. Enjoy the bot!")
                    .reply_markup(keyboards::main_menu())
                    .await?;
            }
            Err(e) => {
                // surfaced to the log as well, a lost write is silent data loss
                let err = BotError::StoreWriteFailed(e);
                error!("user store write for {chat_id} failed: {err}");
                bot.send_message(
                    msg.chat.id,
                    "I could not save your group, please send it once more.",
                )
                .await?;
            }
        },
        GroupInput::Invalid => {
            bot.send_message(
                msg.chat.id,
                "That group name does not follow the strict format, please try again.\n\n\
                 Example: <b>БПИ19-02</b> or <b>бпи19-02</b>",
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
    }
    Ok(())
}

/// `AwaitingPostText`: store whatever text arrives and echo it back for
/// confirmation.
pub async fn receive_post_text(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    ctx: AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let _guard = ctx.locks.acquire(chat_id).await;

    let Some(text) = msg.text() else {
        bot.send_message(
            msg.chat.id,
            "Only text broadcasts are supported for now, please send text.",
        )
        .await?;
        return Ok(());
    };

    dialogue
        .update(State::AwaitingPostConfirm {
            text: text.to_string(),
        })
        .await?;

    let preview = format!(
        "Your text has been received:\n\n{}\n\n\
         Send <b>YES</b> to start the broadcast or <b>NO</b> to cancel.",
        escape_html(text)
    );
    bot.send_message(msg.chat.id, preview)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

/// `AwaitingPostConfirm`: YES runs the fan-out and reports the delivered
/// count, NO discards the text, anything else is ignored.
pub async fn receive_post_confirm(
    bot: Bot,
    dialogue: MyDialogue,
    text: String,
    msg: Message,
    ctx: AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let _guard = ctx.locks.acquire(chat_id).await;

    match classify_confirm_input(msg.text().unwrap_or("")) {
        ConfirmInput::Yes => {
            dialogue.exit().await?;

            let users = match User::all(&ctx.db.pool).await {
                Ok(users) => users,
                Err(e) => {
                    error!("could not read the user list for broadcast: {e}");
                    bot.send_message(
                        msg.chat.id,
                        "Could not read the user list, the broadcast was aborted.",
                    )
                    .await?;
                    return Ok(());
                }
            };

            let delivered = broadcast::publish(&bot, &users, &text).await;
            bot.send_message(
                msg.chat.id,
                format!(
                    "Broadcast finished.\n\nYour message was sent to <b>{delivered}</b> users."
                ),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::main_menu())
            .await?;
        }
        ConfirmInput::No => {
            dialogue.exit().await?;
            bot.send_message(msg.chat.id, "Action cancelled.")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        ConfirmInput::Other => {
            // only YES/NO are recognized here
        }
    }
    Ok(())
}
