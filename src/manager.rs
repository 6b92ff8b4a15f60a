use crate::error::Result;
use crate::models::{
    Course, Enrollment, NewCourse, NewProfessor, Professor, ProfessorCourse, Student,
};
use crate::pipeline::{self, PipelineOptions, ProcessReport};
use crate::schema;
use crate::settings::Settings;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::QueryResult;
use std::path::Path;
use tracing::debug;

/// Table definitions, kept in the Diesel CLI migration layout.
const CREATE_TABLES: &str =
    include_str!("../migrations/2025-09-02-000000_create_gradebook/up.sql");

/// Owns one connection to the gradebook store. The connection is closed when the manager is
/// dropped.
pub struct GradebookManager {
    db: SqliteConnection,
}

impl GradebookManager {
    /// Connects to the database named in `settings`.
    pub fn connect(settings: &Settings) -> Result<Self> {
        Self::open(&settings.database_url, settings.busy_timeout_ms)
    }

    /// Connects to the `sqlite3` database at `database_url`.
    ///
    /// Foreign keys are enforced, and a writer that finds the database locked by another run
    /// waits up to `busy_timeout_ms` before giving up.
    pub fn open(database_url: &str, busy_timeout_ms: u32) -> Result<Self> {
        let mut db = SqliteConnection::establish(database_url)?;
        db.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {busy_timeout_ms};"
        ))?;

        debug!(database_url, "connected");
        Ok(Self { db })
    }

    /// A fresh in-memory store with all tables created.
    pub fn in_memory() -> Result<Self> {
        let mut manager = Self::open(":memory:", 0)?;
        manager.setup()?;
        Ok(manager)
    }

    /// Creates any missing tables.
    pub fn setup(&mut self) -> QueryResult<()> {
        self.db.batch_execute(CREATE_TABLES)
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.db
    }

    /// Runs the score upload pipeline on this connection.
    pub fn process_upload(
        &mut self,
        file: &Path,
        professor_id: &str,
        course_id: &str,
        options: &PipelineOptions,
    ) -> Result<ProcessReport> {
        pipeline::run(&mut self.db, file, professor_id, course_id, options)
    }

    pub fn add_professor(&mut self, name: &str) -> QueryResult<Professor> {
        diesel::insert_into(schema::professors::table)
            .values(NewProfessor { name })
            .returning(Professor::as_returning())
            .get_result(&mut self.db)
    }

    pub fn add_course(&mut self, course_code: &str, name: &str) -> QueryResult<Course> {
        diesel::insert_into(schema::courses::table)
            .values(NewCourse { course_code, name })
            .returning(Course::as_returning())
            .get_result(&mut self.db)
    }

    /// Records that a professor teaches a course. Assigning the same pair twice is a no-op.
    pub fn assign_course(&mut self, professor_id: i32, course_id: i32) -> QueryResult<()> {
        diesel::insert_or_ignore_into(schema::professor_courses::table)
            .values(ProfessorCourse {
                professor_id,
                course_id,
            })
            .execute(&mut self.db)?;

        Ok(())
    }

    pub fn get_course(&mut self, course_id: i32) -> QueryResult<Course> {
        schema::courses::table
            .find(course_id)
            .select(Course::as_select())
            .get_result(&mut self.db)
    }

    /// Retrieves all students, ordered by their external identifier.
    pub fn get_roster(&mut self) -> QueryResult<Vec<Student>> {
        use schema::students::dsl::*;

        students
            .order(external_id.asc())
            .select(Student::as_select())
            .load(&mut self.db)
    }

    /// Returns the total number of students.
    pub fn num_students(&mut self) -> QueryResult<usize> {
        use schema::students::dsl::*;

        students
            .count()
            .get_result(&mut self.db)
            .map(|count: i64| count as usize)
    }

    /// Returns the total number of enrollments across every course.
    pub fn num_enrollments(&mut self) -> QueryResult<usize> {
        use schema::enrollments::dsl::*;

        enrollments
            .count()
            .get_result(&mut self.db)
            .map(|count: i64| count as usize)
    }

    /// Retrieves every enrollment in a course together with its student.
    pub fn get_course_enrollments(
        &mut self,
        course: &Course,
    ) -> QueryResult<Vec<(Student, Enrollment)>> {
        schema::enrollments::table
            .inner_join(schema::students::table)
            .filter(schema::enrollments::course_id.eq(course.id))
            .order(schema::students::external_id.asc())
            .select((Student::as_select(), Enrollment::as_select()))
            .load(&mut self.db)
    }
}
