use crate::schema::{courses, enrollments, professor_courses, professors, students};
use diesel::prelude::*;

/// The value of [`Enrollment::risk_score`] until a separate scoring process fills it in.
pub const RISK_NOT_CALCULATED: &str = "Not Calculated";

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = professors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Professor {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = professors)]
pub struct NewProfessor<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Course {
    pub id: i32,
    /// For example, `SER515`.
    pub course_code: String,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = courses)]
pub struct NewCourse<'a> {
    pub course_code: &'a str,
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = professor_courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfessorCourse {
    pub professor_id: i32,
    pub course_id: i32,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Student {
    pub id: i32,
    /// The student's identifier as it appears in uploaded score files, e.g. `S1000`.
    pub external_id: String,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = students)]
pub struct NewStudent<'a> {
    pub external_id: &'a str,
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub quiz_score_1: Option<f64>,
    pub quiz_score_2: Option<f64>,
    pub quiz_score_3: Option<f64>,
    pub assignment_1: Option<f64>,
    pub assignment_2: Option<f64>,
    pub assignment_3: Option<f64>,
    pub attendance: Option<f64>,
    pub mid_term_1_score: Option<f64>,
    pub average_overall_score: Option<f64>,
    pub risk_score: String,
}

/// An enrollment as staged by the reconciler. `risk_score` is left to the column default.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
    pub quiz_score_1: Option<f64>,
    pub quiz_score_2: Option<f64>,
    pub quiz_score_3: Option<f64>,
    pub assignment_1: Option<f64>,
    pub assignment_2: Option<f64>,
    pub assignment_3: Option<f64>,
    pub attendance: Option<f64>,
    pub mid_term_1_score: Option<f64>,
    pub average_overall_score: Option<f64>,
}
