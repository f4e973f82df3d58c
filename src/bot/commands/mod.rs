pub mod schedule;

use std::collections::HashSet;
use teloxide::utils::command::BotCommands;

use crate::error::BotError;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Timetable bot commands:")]
pub enum Command {
    #[command(description = "start the bot and register your group")]
    Start,
    #[command(description = "refresh the bot menu")]
    Update,
    #[command(description = "broadcast a message to every user (operators only)")]
    SendPost,
    #[command(description = "display this help message")]
    Help,
}

/// Gate for operator-only commands. Checked once at flow entry; the
/// allow-list cannot change mid-flow, so there is no re-check at confirm
/// time.
pub fn ensure_operator(operators: &HashSet<i64>, chat_id: i64) -> Result<(), BotError> {
    if operators.contains(&chat_id) {
        Ok(())
    } else {
        Err(BotError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_gate() {
        let operators: HashSet<i64> = [10, 20].into_iter().collect();
        assert!(ensure_operator(&operators, 10).is_ok());
        assert!(matches!(
            ensure_operator(&operators, 30),
            Err(BotError::Unauthorized)
        ));
    }

    #[test]
    fn test_empty_allow_list_rejects_everyone() {
        let operators = HashSet::new();
        assert!(ensure_operator(&operators, 1).is_err());
    }
}
