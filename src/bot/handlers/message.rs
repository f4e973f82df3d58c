//! Command and menu-label handlers dispatched from the idle state.

use chrono::{Datelike, Local};
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{Message, ParseMode};
use teloxide::utils::command::BotCommands;
use teloxide::Bot;
use tracing::error;

use crate::bot::commands::{ensure_operator, schedule, Command};
use crate::bot::keyboards::{self, labels};
use crate::bot::state::{HandlerResult, MyDialogue, State};
use crate::bot::AppContext;
use crate::database::models::User;

pub async fn command_handler(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    cmd: Command,
    ctx: AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let _guard = ctx.locks.acquire(chat_id).await;

    match cmd {
        Command::Start => handle_start(&bot, &dialogue, &msg, &ctx).await?,
        Command::Update => {
            let text = format!(
                "Bot updated to version <b>{}</b>!",
                env!("CARGO_PKG_VERSION")
            );
            bot.send_message(msg.chat.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Command::SendPost => handle_send_post(&bot, &dialogue, &msg, &ctx).await?,
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
    }
    Ok(())
}

/// `/start`: greet a known user, or begin registration for a new one.
async fn handle_start(
    bot: &Bot,
    dialogue: &MyDialogue,
    msg: &Message,
    ctx: &AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let name = msg.chat.first_name().unwrap_or("friend");

    match User::find_by_chat_id(&ctx.db.pool, chat_id).await {
        Ok(Some(_)) => {
            bot.send_message(msg.chat.id, format!("Good to see you again, {name}!"))
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Ok(None) => {
            dialogue.update(State::AwaitingGroup).await?;
            let text = format!(
                "Hello {name}, I am your timetable assistant!\n\n\
                 Let's find out which group you are in. Please send me your group name.\n\n\
                 Example: <b>БПИ19-02</b> or <b>бпи19-02</b>"
            );
            bot.send_message(msg.chat.id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Err(e) => {
            error!("user lookup for {chat_id} failed: {e}");
            bot.send_message(msg.chat.id, "Something went wrong, please try /start again.")
                .await?;
        }
    }
    Ok(())
}

/// `/send_post`: operators enter the broadcast-authoring flow, everyone
/// else gets a rejection and stays idle.
async fn handle_send_post(
    bot: &Bot,
    dialogue: &MyDialogue,
    msg: &Message,
    ctx: &AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    match ensure_operator(&ctx.config.operator_ids, chat_id) {
        Ok(()) => {
            dialogue.update(State::AwaitingPostText).await?;
            bot.send_message(msg.chat.id, "To make a broadcast, send me the text.")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Err(_) => {
            bot.send_message(msg.chat.id, "You are not allowed to do that. ;)")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
    }
    Ok(())
}

/// Free-text messages in the idle state: menu labels and a hint for
/// malformed commands. Anything else is left unanswered to avoid spam.
pub async fn menu_handler(
    bot: Bot,
    dialogue: MyDialogue,
    msg: Message,
    ctx: AppContext,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id.0;
    let _guard = ctx.locks.acquire(chat_id).await;

    match text {
        labels::MAIN_MENU => {
            bot.send_message(msg.chat.id, "You are back at the main menu.")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        labels::SETTINGS => {
            bot.send_message(msg.chat.id, "Pick an action.")
                .reply_markup(keyboards::settings_menu())
                .await?;
        }
        labels::ABOUT => handle_about(&bot, &msg, &ctx).await?,
        labels::CHANGE_GROUP => handle_change_group(&bot, &dialogue, &msg, &ctx).await?,
        labels::TODAY => handle_today(&bot, &msg, &ctx).await?,
        _ if text.starts_with('/') => {
            let unknown = text.split_whitespace().next().unwrap_or(text);
            bot.send_message(
                msg.chat.id,
                format!("Unknown command: {unknown}\n\nUse /help to see all available commands."),
            )
            .await?;
        }
        _ => {}
    }
    Ok(())
}

async fn handle_about(bot: &Bot, msg: &Message, ctx: &AppContext) -> HandlerResult {
    let users = User::count(&ctx.db.pool).await.unwrap_or_else(|e| {
        error!("user count failed: {e}");
        0
    });

    let text = format!(
        "<b>About</b>\n\n\
         Version: {}\n\
         Users: {}\n\
         Support: {}\n\n\
         If the bot is not convenient for you, there are mobile apps for \
         <a href=\"https://sibsau.ru\">Android</a> and <a href=\"https://sibsau.ru\">iOS</a>.",
        env!("CARGO_PKG_VERSION"),
        users,
        ctx.config.support_contact,
    );
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::settings_menu())
        .await?;
    Ok(())
}

/// Enters the group-change flow, showing the current assignment first.
async fn handle_change_group(
    bot: &Bot,
    dialogue: &MyDialogue,
    msg: &Message,
    ctx: &AppContext,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    match User::find_by_chat_id(&ctx.db.pool, chat_id).await {
        Ok(Some(user)) => {
            dialogue.update(State::AwaitingGroup).await?;
            let text = format!(
                "Your current group is <b>{}</b>.\n\n\
                 To change it, please send the name of the new group.\n\n\
                 Example: <b>БПИ19-02</b> or <b>бпи19-02</b>",
                user.group_name
            );
            bot.send_message(msg.chat.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::change_group_menu())
                .await?;
        }
        Ok(None) => {
            bot.send_message(msg.chat.id, "I do not know you yet, send /start to register.")
                .await?;
        }
        Err(e) => {
            error!("user lookup for {chat_id} failed: {e}");
            bot.send_message(msg.chat.id, "Something went wrong, please try again.")
                .await?;
        }
    }
    Ok(())
}

/// Schedule lookup for the stored group; never touches the dialogue.
async fn handle_today(bot: &Bot, msg: &Message, ctx: &AppContext) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    match User::find_by_chat_id(&ctx.db.pool, chat_id).await {
        Ok(Some(user)) => {
            let reply = schedule::schedule_reply(
                &ctx.catalog,
                &ctx.cache,
                &ctx.config.support_contact,
                &user.group_name,
                Local::now().weekday(),
            )
            .await;
            bot.send_message(msg.chat.id, reply)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Ok(None) => {
            bot.send_message(msg.chat.id, "I do not know you yet, send /start to register.")
                .await?;
        }
        Err(e) => {
            error!("user lookup for {chat_id} failed: {e}");
            bot.send_message(msg.chat.id, "Something went wrong, please try again.")
                .await?;
        }
    }
    Ok(())
}
