use thiserror::Error;

/// Domain failures that conversation handlers turn into user-facing replies.
///
/// None of these may escape a handler: each one maps to a specific message so
/// a single user's bad luck never takes down the dispatch loop.
#[derive(Debug, Error)]
pub enum BotError {
    /// The group name is well-formed but the catalog has no entry for it.
    #[error("group {0} is not in the catalog")]
    UnknownGroup(String),

    /// The group is valid but no timetable artifact has ever been cached.
    #[error("no cached timetable for group {0}")]
    NoCacheYet(String),

    /// The remote provider errored, timed out, or returned unparseable data.
    #[error("timetable provider request failed: {0}")]
    FetchFailed(String),

    /// The text does not match the group-name format.
    #[error("group name does not match the expected format")]
    ValidationFailed,

    /// A non-operator invoked an operator-only command.
    #[error("sender is not an operator")]
    Unauthorized,

    /// The user store could not persist a write. Also goes to the error log,
    /// since it risks silent data loss.
    #[error("user store write failed: {0}")]
    StoreWriteFailed(#[from] sqlx::Error),
}
