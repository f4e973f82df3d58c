use chrono::Weekday;

use crate::timetable::model::{TimetableDocument, WeekParity};
use crate::utils::html::escape_html;

/// Fixed reply for Sundays; no lesson lookup happens on a rest day.
pub const REST_DAY_TEXT: &str = "Today is a rest day, feel free to relax!";

/// Renders one day of a timetable as HTML-formatted message text.
///
/// Pure and side-effect-free: the same document, weekday, and parity always
/// produce the same text. Lesson and subgroup ordering is exactly the input
/// ordering.
pub fn render(document: &TimetableDocument, weekday: Weekday, parity: WeekParity) -> String {
    if weekday == Weekday::Sun {
        return REST_DAY_TEXT.to_string();
    }

    let (week_label, week) = match parity {
        WeekParity::Odd => ("1 / odd", &document.odd_week),
        WeekParity::Even => ("2 / even", &document.even_week),
    };

    let mut out = String::new();
    out.push_str(&format!("📅 <b>Today:</b> {}\n", day_name(weekday)));
    out.push_str(&format!("🗓 <b>Week:</b> {week_label}\n"));

    let day_index = weekday.num_days_from_monday() as usize;
    let Some(day) = week.get(day_index) else {
        return out;
    };

    for lesson in &day.lessons {
        out.push_str("\n🕙 ");
        out.push_str(&escape_html(&lesson.time));
        for subgroup in &lesson.subgroups {
            out.push_str("\n📚 <b>");
            out.push_str(&escape_html(&subgroup.name));
            out.push_str("</b> ");
            out.push_str(lesson_type_label(subgroup.kind));
            out.push_str("\n👤 ");
            out.push_str(&escape_html(&subgroup.teacher));
            out.push_str("\n🏫 <b>Where:</b> ");
            out.push_str(&escape_html(&subgroup.place));
            out.push_str("\n👥 <b>Subgroup:</b> ");
            out.push_str(subgroup_marker(subgroup.num));
            out.push('\n');
        }
    }

    out
}

/// Unrecognized type values deliberately fall back to the practice label
/// rather than erroring, matching the provider's loose encoding.
fn lesson_type_label(kind: i64) -> &'static str {
    match kind {
        1 => "Lecture",
        2 => "Lab",
        _ => "Practice",
    }
}

/// 0 means the whole class; 1 is subgroup one; anything else is shown as
/// subgroup two, the provider's own fallback for out-of-range values.
fn subgroup_marker(num: i64) -> &'static str {
    match num {
        0 => "any",
        1 => "1",
        _ => "2",
    }
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
