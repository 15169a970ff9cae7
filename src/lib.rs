//! Core library surface for the course registry TUI.
//!
//! The registry and the service wrapping it are usable without the terminal
//! front-end; `main.rs` only wires configuration, logging and the UI around
//! them.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod registry;
pub mod service;
pub mod ui;

/// Domain types passed between layers.
pub use models::{
    Course, CourseId, CourseKind, Student, StudentId, Teacher, TeacherId, ValidationError,
};

/// The registry and its validating front door.
pub use registry::CourseRegistry;
pub use service::{CourseService, OperationResult};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
