//! The "what is my schedule today" lookup flow.

use chrono::Weekday;
use tracing::{debug, warn};

use crate::timetable::{render, GroupCatalog, TimetableCache};

pub const GROUP_NOT_FOUND_TEXT: &str = "It seems your group does not exist in our catalog.\n\n\
    Please double-check it. You can change the group in:\n\
    Settings -> Change group";

pub const DEGRADED_TEXT: &str =
    "The timetable service is not responding right now, please try again a bit later.";

pub fn not_available_text(support: &str) -> String {
    format!(
        "The timetable for your group has not been added yet.\n\n\
         Try again later or report the problem: {support}"
    )
}

/// Resolves the whole lookup to a single reply text, recovering every
/// failure into a user-facing message.
///
/// A refresh is attempted on every lookup; when the provider is down the
/// existing cache artifact (if any) is served instead, so staleness is
/// bounded by provider availability rather than by file presence alone.
pub async fn schedule_reply(
    catalog: &GroupCatalog,
    cache: &TimetableCache,
    support: &str,
    group: &str,
    today: Weekday,
) -> String {
    if !catalog.exists(group) {
        return GROUP_NOT_FOUND_TEXT.to_string();
    }

    if let Err(e) = cache.ensure_fresh(catalog, group).await {
        debug!("timetable refresh for {group} failed, falling back to cache: {e}");
    }

    if !cache.has_cache(group) {
        return not_available_text(support);
    }

    let parity = match cache.current_week_parity().await {
        Ok(parity) => parity,
        Err(e) => {
            warn!("week counter unavailable: {e}");
            return DEGRADED_TEXT.to_string();
        }
    };

    match cache.load(group) {
        Ok(document) => render::render(&document, today, parity),
        Err(e) => {
            warn!("cached timetable for {group} is unreadable: {e}");
            DEGRADED_TEXT.to_string()
        }
    }
}
