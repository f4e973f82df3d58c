use serde::{Deserialize, Serialize};

/// One group's full two-week timetable.
///
/// Each week holds seven [`DaySchedule`] entries, index 0 = Monday through
/// index 5 = Saturday; index 6 (Sunday) is never populated or read. The
/// provider wraps this object in a single-element JSON array on the wire;
/// the cache stores it unwrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableDocument {
    pub odd_week: Vec<DaySchedule>,
    pub even_week: Vec<DaySchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub time: String,
    #[serde(default)]
    pub subgroups: Vec<Subgroup>,
}

/// A lesson entry for one subgroup of the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subgroup {
    pub name: String,
    /// Provider encoding: 1 = lecture, 2 = lab, anything else = practice.
    #[serde(rename = "type")]
    pub kind: i64,
    pub teacher: String,
    pub place: String,
    /// 0 = whole class, 1 or 2 = that subgroup only.
    pub num: i64,
}

/// Which of the two alternating weekly schedules applies right now.
///
/// Derived per request from the provider's week counter, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekParity {
    Odd,
    Even,
}
