pub mod employee;
pub mod schedule;
pub mod timetable;
