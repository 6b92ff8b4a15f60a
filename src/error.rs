use thiserror::Error;

/// Everything that can stop a score upload from being reconciled.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{field} ID must be a valid integer, got {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("professor with ID {0} not found")]
    ProfessorNotFound(i32),

    #[error("course with ID {0} not found")]
    CourseNotFound(i32),

    #[error("course {course_id} is not taught by professor {professor_id}")]
    CourseNotTaught { professor_id: i32, course_id: i32 },

    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("column {0:?} appears more than once")]
    DuplicateColumn(String),

    #[error("record {record}: {column} is empty")]
    EmptyField { record: usize, column: &'static str },

    #[error("malformed score file: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("could not connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Coarse grouping of [`PipelineError`]s for whoever dispatched the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The professor or course could not be resolved. Nothing was written.
    Identifier,
    /// The file's header or one of its records is unusable. The run was rolled back.
    RowShape,
    /// The store or the environment failed. The run was rolled back.
    Storage,
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::InvalidIdentifier { .. }
            | PipelineError::ProfessorNotFound(_)
            | PipelineError::CourseNotFound(_)
            | PipelineError::CourseNotTaught { .. } => ErrorCategory::Identifier,
            PipelineError::MissingColumn(_)
            | PipelineError::DuplicateColumn(_)
            | PipelineError::EmptyField { .. }
            | PipelineError::Csv(_) => ErrorCategory::RowShape,
            PipelineError::Database(_)
            | PipelineError::Connection(_)
            | PipelineError::Io(_)
            | PipelineError::Config(_) => ErrorCategory::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
