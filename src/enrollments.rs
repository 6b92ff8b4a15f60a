//! Creates enrollments for (student, course) pairs that do not have one yet.

use crate::columns::ScoreRow;
use crate::models::{Course, Enrollment, NewEnrollment, Student};
use crate::schema;
use diesel::prelude::*;
use tracing::debug;

/// What [`reconcile_enrollment`] did for a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Created(Enrollment),
    /// The pair was already enrolled. The stored scores were left as they were.
    AlreadyEnrolled,
}

impl NewEnrollment {
    /// Maps a score row onto an enrollment for `student_id` in `course_id`.
    pub fn from_row(student_id: i32, course_id: i32, row: &ScoreRow) -> Self {
        Self {
            student_id,
            course_id,
            quiz_score_1: row.quiz_score_1,
            quiz_score_2: row.quiz_score_2,
            quiz_score_3: row.quiz_score_3,
            assignment_1: row.assignment_1,
            assignment_2: row.assignment_2,
            assignment_3: row.assignment_3,
            attendance: row.attendance_out_of_10,
            mid_term_1_score: row.mid_term_1_score,
            average_overall_score: row.class_average,
        }
    }
}

pub fn find_enrollment(
    conn: &mut SqliteConnection,
    student: i32,
    course: i32,
) -> QueryResult<Option<Enrollment>> {
    use schema::enrollments::dsl::*;

    enrollments
        .filter(student_id.eq(student))
        .filter(course_id.eq(course))
        .select(Enrollment::as_select())
        .first(conn)
        .optional()
}

/// Enrolls `student` in `course` with the scores from `row`, unless they are already enrolled.
///
/// Existing enrollments are never modified. The insert relies on the unique
/// `(student_id, course_id)` index, so a concurrent run enrolling the same pair cannot produce a
/// second row.
pub fn reconcile_enrollment(
    conn: &mut SqliteConnection,
    student: &Student,
    course: &Course,
    row: &ScoreRow,
) -> QueryResult<Reconciled> {
    let inserted = diesel::insert_or_ignore_into(schema::enrollments::table)
        .values(NewEnrollment::from_row(student.id, course.id, row))
        .execute(conn)?;

    if inserted == 0 {
        debug!(
            student = %student.external_id,
            course = %course.course_code,
            "already enrolled, skipping"
        );
        return Ok(Reconciled::AlreadyEnrolled);
    }

    let enrollment = find_enrollment(conn, student.id, course.id)?.ok_or(diesel::NotFound)?;
    debug!(
        student = %student.external_id,
        course = %course.course_code,
        id = enrollment.id,
        "created enrollment"
    );
    Ok(Reconciled::Created(enrollment))
}
