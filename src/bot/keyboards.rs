//! Static reply-keyboard menus attached to most replies.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Menu-label texts, matched literally against incoming messages.
pub mod labels {
    pub const MAIN_MENU: &str = "🏠 Main menu";
    pub const ABOUT: &str = "ℹ️ About";
    pub const SETTINGS: &str = "⚙️ Settings";
    pub const CHANGE_GROUP: &str = "👥 Change group";
    pub const TODAY: &str = "🚀 Today's schedule";
    pub const CANCEL: &str = "Cancel";
}

pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(labels::TODAY)],
        vec![
            KeyboardButton::new(labels::SETTINGS),
            KeyboardButton::new(labels::ABOUT),
        ],
    ])
    .resize_keyboard(true)
}

pub fn settings_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(labels::CHANGE_GROUP)],
        vec![KeyboardButton::new(labels::MAIN_MENU)],
    ])
    .resize_keyboard(true)
}

pub fn change_group_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(labels::CANCEL)],
        vec![KeyboardButton::new(labels::MAIN_MENU)],
    ])
    .resize_keyboard(true)
}
