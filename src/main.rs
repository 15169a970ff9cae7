//! Binary entry point: parse flags, start logging, build an empty registry and
//! drive the Ratatui event loop until the user exits.
use clap::Parser;
use course_registry::config::Args;
use course_registry::logging::init_logging;
use course_registry::{run_app, App, CourseRegistry, CourseService};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_config()?)?;
    tracing::info!("course registry starting");

    let service = CourseService::new(CourseRegistry::in_memory()?);
    let mut app = App::new(service)?;
    let result = run_app(&mut app);

    tracing::info!("course registry exiting");
    result
}
