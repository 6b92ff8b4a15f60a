use crate::manager::GradebookManager;
use crate::models::{Enrollment, Student};
use diesel::QueryResult;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct EnrollmentRow {
    student_id: String,
    name: String,
    quiz_1: String,
    quiz_2: String,
    quiz_3: String,
    assignment_1: String,
    assignment_2: String,
    assignment_3: String,
    attendance: String,
    mid_term_1: String,
    average: String,
    risk: String,
}

fn score(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl From<(Student, Enrollment)> for EnrollmentRow {
    fn from((student, enrollment): (Student, Enrollment)) -> Self {
        Self {
            student_id: student.external_id,
            name: student.name,
            quiz_1: score(enrollment.quiz_score_1),
            quiz_2: score(enrollment.quiz_score_2),
            quiz_3: score(enrollment.quiz_score_3),
            assignment_1: score(enrollment.assignment_1),
            assignment_2: score(enrollment.assignment_2),
            assignment_3: score(enrollment.assignment_3),
            attendance: score(enrollment.attendance),
            mid_term_1: score(enrollment.mid_term_1_score),
            average: score(enrollment.average_overall_score),
            risk: enrollment.risk_score,
        }
    }
}

/// Renders a course's enrollments as a table.
pub fn course_table(enrollments: Vec<(Student, Enrollment)>) -> Table {
    let rows: Vec<EnrollmentRow> = enrollments.into_iter().map(EnrollmentRow::from).collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table
}

/// Pretty prints every enrollment in a course.
pub fn show_course(manager: &mut GradebookManager, course_id: i32) -> QueryResult<()> {
    let course = match manager.get_course(course_id) {
        Ok(c) => c,
        Err(diesel::NotFound) => {
            eprintln!("Course with ID {course_id} not found.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let enrollments = manager.get_course_enrollments(&course)?;
    let count = enrollments.len();
    let table = course_table(enrollments);

    println!(
        "{} {} ({count} enrolled):\n{table}",
        course.course_code, course.name
    );

    Ok(())
}

/// Pretty prints every student.
pub fn show_roster(manager: &mut GradebookManager) -> QueryResult<()> {
    #[derive(Tabled)]
    struct RosterRow {
        student_id: String,
        name: String,
    }

    let roster: Vec<RosterRow> = manager
        .get_roster()?
        .into_iter()
        .map(|student| RosterRow {
            student_id: student.external_id,
            name: student.name,
        })
        .collect();

    let mut table = Table::new(roster);
    table.with(Style::modern());
    println!("Roster:\n{table}");

    Ok(())
}
