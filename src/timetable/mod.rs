pub mod cache;
pub mod catalog;
pub mod model;
pub mod render;

pub use cache::TimetableCache;
pub use catalog::GroupCatalog;
pub use model::{DaySchedule, Lesson, Subgroup, TimetableDocument, WeekParity};
