use regex::Regex;
use std::sync::OnceLock;

use crate::error::BotError;

/// Group names are 0-5 Cyrillic letters followed by exactly `DD-DD`,
/// e.g. `БПИ19-02` or `бпи19-02`. Matching is anchored: trailing or leading
/// junk fails.
const GROUP_NAME_PATTERN: &str = r"^[А-Яа-яЁё]{0,5}[0-9]{2}-[0-9]{2}$";

fn group_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(GROUP_NAME_PATTERN).expect("group name pattern compiles"))
}

pub fn is_valid_group_name(name: &str) -> bool {
    group_name_regex().is_match(name.trim())
}

/// Validates the format and returns the canonical (uppercased) group name.
pub fn normalize_group_name(name: &str) -> Result<String, BotError> {
    let name = name.trim();
    if !is_valid_group_name(name) {
        return Err(BotError::ValidationFailed);
    }
    Ok(name.to_uppercase())
}
