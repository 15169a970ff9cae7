//! Ratatui front-end. Every change to the registry goes through
//! [`CourseService`](crate::service::CourseService); this module only keeps
//! snapshots for display and translates keys into service calls.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
