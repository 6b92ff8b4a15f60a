//! The score upload pipeline: resolve the target, read the file, then reconcile every row inside
//! one transaction.

use crate::columns::ScoreReader;
use crate::enrollments::{self, Reconciled};
use crate::error::{PipelineError, Result};
use crate::resolver;
use crate::students;
use diesel::prelude::*;
use std::fmt;
use std::path::Path;
use tracing::{debug, error, info};

/// Knobs for a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Field delimiter of the score file.
    pub delimiter: u8,
    /// Refuse uploads for a course the professor is not assigned to.
    pub check_course_membership: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            check_course_membership: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Success,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Success => write!(f, "success"),
        }
    }
}

/// What a committed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub status: ProcessStatus,
    /// Every data row in the file, including rows whose enrollment already existed.
    pub rows_processed: usize,
    pub course_name: String,
    pub students_created: usize,
    pub enrollments_created: usize,
    pub enrollments_skipped: usize,
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: processed {} rows for course '{}' ({} new students, {} new enrollments, {} already enrolled)",
            self.status,
            self.rows_processed,
            self.course_name,
            self.students_created,
            self.enrollments_created,
            self.enrollments_skipped
        )
    }
}

#[derive(Debug, Default)]
struct Tally {
    rows: usize,
    students_created: usize,
    enrollments_created: usize,
    enrollments_skipped: usize,
}

/// Reconciles the score file at `file` into the store for the given professor and course.
///
/// Identifiers are resolved and the header is validated before anything is written. All rows are
/// then processed in a single immediate transaction: either every new student and enrollment is
/// committed, or none are.
pub fn run(
    conn: &mut SqliteConnection,
    file: &Path,
    professor_id: &str,
    course_id: &str,
    options: &PipelineOptions,
) -> Result<ProcessReport> {
    info!(
        file = %file.display(),
        professor_id,
        course_id,
        "processing score upload"
    );

    let (_professor, course) =
        resolver::resolve(conn, professor_id, course_id, options.check_course_membership)
            .inspect_err(|e| error!(error = %e, "aborting before any write"))?;

    let mut scores = ScoreReader::open(file, options.delimiter)
        .inspect_err(|e| error!(error = %e, "unusable score file"))?;
    debug!(columns = ?scores.columns(), "normalized header");

    let outcome = conn.immediate_transaction(|conn| {
        let mut tally = Tally::default();

        for row in scores.rows() {
            let row = row?;
            tally.rows += 1;

            let upserted = students::upsert_student(conn, &row.student_id, &row.student_name)?;
            if upserted.created {
                tally.students_created += 1;
            }

            match enrollments::reconcile_enrollment(conn, &upserted.student, &course, &row)? {
                Reconciled::Created(_) => tally.enrollments_created += 1,
                Reconciled::AlreadyEnrolled => tally.enrollments_skipped += 1,
            }
        }

        Ok::<_, PipelineError>(tally)
    });

    let tally = outcome.inspect_err(|e| error!(error = %e, "rolled back score upload"))?;

    let report = ProcessReport {
        status: ProcessStatus::Success,
        rows_processed: tally.rows,
        course_name: course.name,
        students_created: tally.students_created,
        enrollments_created: tally.enrollments_created,
        enrollments_skipped: tally.enrollments_skipped,
    };
    info!(
        rows = report.rows_processed,
        course = %report.course_name,
        students_created = report.students_created,
        enrollments_created = report.enrollments_created,
        "committed score upload"
    );

    Ok(report)
}
