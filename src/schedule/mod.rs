pub mod availability;
pub mod service;
pub mod timetable;
pub mod validator;
