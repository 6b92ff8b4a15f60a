//! Reconciles uploaded per-student score files against a store of students and course
//! enrollments.
//!
//! The entry point for a dispatcher is [`process`], which opens its own connection for the
//! duration of one upload.

pub mod cli;
pub mod columns;
pub mod display;
pub mod enrollments;
pub mod error;
pub mod logging;
pub mod manager;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod schema;
pub mod settings;
pub mod students;

use std::path::Path;

pub use crate::error::{ErrorCategory, PipelineError, Result};
pub use crate::manager::GradebookManager;
pub use crate::pipeline::{PipelineOptions, ProcessReport, ProcessStatus};
pub use crate::settings::Settings;

/// Processes one uploaded score file for the given professor and course.
///
/// The connection opened here is released when this returns, whether or not the run succeeded.
pub fn process(
    settings: &Settings,
    file: impl AsRef<Path>,
    professor_id: &str,
    course_id: &str,
) -> Result<ProcessReport> {
    let options = settings.pipeline_options()?;
    let mut manager = GradebookManager::connect(settings)?;
    manager.process_upload(file.as_ref(), professor_id, course_id, &options)
}
