//! Find-or-create for students, keyed by the identifier used in score files.

use crate::models::{NewStudent, Student};
use crate::schema;
use diesel::prelude::*;
use tracing::{debug, warn};

/// The result of [`upsert_student`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub student: Student,
    /// `true` if this call inserted the student.
    pub created: bool,
}

pub fn find_student(
    conn: &mut SqliteConnection,
    external: &str,
) -> QueryResult<Option<Student>> {
    use schema::students::dsl::{external_id, students};

    students
        .filter(external_id.eq(external))
        .select(Student::as_select())
        .first(conn)
        .optional()
}

/// Returns the student with the given external identifier, inserting them first if needed.
///
/// The insert is an `INSERT OR IGNORE` against the unique `external_id` column, so two callers
/// racing on the same identifier both end up with the same row. An existing student keeps their
/// stored name even if `name` differs.
pub fn upsert_student(
    conn: &mut SqliteConnection,
    external: &str,
    name: &str,
) -> QueryResult<Upserted> {
    use schema::students::dsl::{external_id, students};

    let inserted = diesel::insert_or_ignore_into(students)
        .values(NewStudent {
            external_id: external,
            name,
        })
        .execute(conn)?;

    let student = students
        .filter(external_id.eq(external))
        .select(Student::as_select())
        .get_result(conn)?;

    let created = inserted == 1;
    if created {
        debug!(external_id = external, id = student.id, "created student");
    } else if student.name != name {
        warn!(
            external_id = external,
            stored = %student.name,
            uploaded = name,
            "student name differs from stored name, keeping stored name"
        );
    }

    Ok(Upserted { student, created })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::GradebookManager;

    #[test]
    fn creates_then_reuses() {
        let mut manager = GradebookManager::in_memory().unwrap();
        let conn = manager.connection();

        let first = upsert_student(conn, "S1000", "Alice").unwrap();
        assert!(first.created);
        assert_eq!(first.student.external_id, "S1000");

        let second = upsert_student(conn, "S1000", "Alice").unwrap();
        assert!(!second.created);
        assert_eq!(second.student, first.student);

        assert_eq!(manager.num_students().unwrap(), 1);
    }

    #[test]
    fn keeps_stored_name_on_repeat_sighting() {
        let mut manager = GradebookManager::in_memory().unwrap();
        let conn = manager.connection();

        upsert_student(conn, "S1", "Alice").unwrap();
        let again = upsert_student(conn, "S1", "Alicia").unwrap();

        assert!(!again.created);
        assert_eq!(again.student.name, "Alice");
        assert_eq!(find_student(conn, "S1").unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn unknown_student_is_none() {
        let mut manager = GradebookManager::in_memory().unwrap();
        assert_eq!(find_student(manager.connection(), "S404").unwrap(), None);
    }
}
