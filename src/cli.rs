//! This module contains the command-line interface [`Cli`] parser for running score uploads and
//! managing the professors and courses they are made against.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The command line configuration struct, where the command-line interface parser is automatically
/// derived by [`clap::Parser`].
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Log every row decision.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database tables.
    Setup,

    /// Add a professor.
    AddProfessor { name: String },

    /// Add a course, optionally assigning it to a professor.
    AddCourse {
        /// Unique course code, e.g. SER515.
        code: String,
        name: String,
        #[arg(long)]
        professor: Option<i32>,
    },

    /// Reconcile a score file into the gradebook.
    Process {
        file: PathBuf,
        professor_id: String,
        course_id: String,
    },

    /// Show every enrollment in a course.
    ShowCourse { course_id: i32 },

    /// Show every student.
    ShowRoster,
}
