//! Resolves the professor and course an upload was made for. Nothing here writes to the store.

use crate::error::{PipelineError, Result};
use crate::models::{Course, Professor};
use crate::schema;
use diesel::prelude::*;
use tracing::debug;

/// Parses an identifier handed over by the dispatcher.
pub fn parse_identifier(field: &'static str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::InvalidIdentifier {
            field,
            value: raw.to_string(),
        })
}

pub fn find_professor(
    conn: &mut SqliteConnection,
    professor_id: i32,
) -> QueryResult<Option<Professor>> {
    use schema::professors::dsl::professors;

    professors
        .find(professor_id)
        .select(Professor::as_select())
        .first(conn)
        .optional()
}

pub fn find_course(conn: &mut SqliteConnection, course_id: i32) -> QueryResult<Option<Course>> {
    use schema::courses::dsl::courses;

    courses
        .find(course_id)
        .select(Course::as_select())
        .first(conn)
        .optional()
}

/// Whether `professor_id` is recorded as teaching `course_id`.
pub fn teaches(
    conn: &mut SqliteConnection,
    professor_id: i32,
    course_id: i32,
) -> QueryResult<bool> {
    use schema::professor_courses::dsl as pc;

    diesel::select(diesel::dsl::exists(
        pc::professor_courses
            .filter(pc::professor_id.eq(professor_id))
            .filter(pc::course_id.eq(course_id)),
    ))
    .get_result(conn)
}

/// Parses both identifiers, then looks up the professor followed by the course.
///
/// Both identifiers are parsed before either lookup, so a malformed course ID is reported even
/// when the professor does not exist. When `check_membership` is set the course must also be
/// assigned to the professor.
pub fn resolve(
    conn: &mut SqliteConnection,
    professor_id: &str,
    course_id: &str,
    check_membership: bool,
) -> Result<(Professor, Course)> {
    let professor_id = parse_identifier("professor", professor_id)?;
    let course_id = parse_identifier("course", course_id)?;

    let professor =
        find_professor(conn, professor_id)?.ok_or(PipelineError::ProfessorNotFound(professor_id))?;
    let course = find_course(conn, course_id)?.ok_or(PipelineError::CourseNotFound(course_id))?;

    if check_membership && !teaches(conn, professor.id, course.id)? {
        return Err(PipelineError::CourseNotTaught {
            professor_id,
            course_id,
        });
    }

    debug!(professor = %professor.name, course = %course.course_code, "resolved upload target");
    Ok((professor, course))
}
