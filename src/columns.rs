//! Header normalization and typed reading of uploaded score files.
//!
//! Raw headers such as `Attendance (out of 10)` are mapped onto canonical field names such as
//! `attendance_out_of_10` by [`normalize_header`]. The normalized header is applied once to the
//! underlying CSV reader, after which every record deserializes straight into a [`ScoreRow`].

use crate::error::{PipelineError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

pub const STUDENT_ID: &str = "student_id";
pub const STUDENT_NAME: &str = "student_name";

/// Columns that every score file must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = [STUDENT_ID, STUDENT_NAME];

/// Every column the reader understands, after normalization.
pub const CANONICAL_COLUMNS: [&str; 11] = [
    STUDENT_ID,
    STUDENT_NAME,
    "quiz_score_1",
    "quiz_score_2",
    "quiz_score_3",
    "assignment_1",
    "assignment_2",
    "assignment_3",
    "attendance_out_of_10",
    "mid_term_1_score",
    "class_average",
];

/// Canonicalizes a single header cell.
///
/// Surrounding whitespace is trimmed, the name is lowercased, spaces become underscores and
/// parentheses are removed. The result is trimmed again since removing a parenthesis can expose
/// whitespace at the edge, which keeps `normalize_header(normalize_header(x)) ==
/// normalize_header(x)`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
        .trim()
        .to_string()
}

/// Canonicalizes a whole header row, preserving column order.
pub fn normalize_headers<'a>(raw: impl IntoIterator<Item = &'a str>) -> StringRecord {
    raw.into_iter().map(normalize_header).collect()
}

/// Checks a normalized header: required columns must be present and no known column may repeat.
pub fn validate_headers(headers: &StringRecord) -> Result<()> {
    let mut seen = HashSet::new();
    for name in headers.iter() {
        if !CANONICAL_COLUMNS.iter().any(|known| *known == name) {
            debug!(column = name, "ignoring unrecognized column");
            continue;
        }
        if !seen.insert(name) {
            return Err(PipelineError::DuplicateColumn(name.to_string()));
        }
    }

    match REQUIRED_COLUMNS.into_iter().find(|col| !seen.contains(col)) {
        Some(missing) => Err(PipelineError::MissingColumn(missing)),
        None => Ok(()),
    }
}

/// One student's line in a score file. Optional columns that are absent from the file, empty in
/// this record, or cut off by a short record are `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreRow {
    pub student_id: String,
    pub student_name: String,
    pub quiz_score_1: Option<f64>,
    pub quiz_score_2: Option<f64>,
    pub quiz_score_3: Option<f64>,
    pub assignment_1: Option<f64>,
    pub assignment_2: Option<f64>,
    pub assignment_3: Option<f64>,
    pub attendance_out_of_10: Option<f64>,
    pub mid_term_1_score: Option<f64>,
    pub class_average: Option<f64>,
}

impl ScoreRow {
    fn check_required(&self, record: usize) -> Result<()> {
        if self.student_id.is_empty() {
            return Err(PipelineError::EmptyField {
                record,
                column: STUDENT_ID,
            });
        }
        if self.student_name.is_empty() {
            return Err(PipelineError::EmptyField {
                record,
                column: STUDENT_NAME,
            });
        }
        Ok(())
    }
}

/// A score file whose header has already been normalized and validated.
pub struct ScoreReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
}

impl ScoreReader<File> {
    /// Opens the score file at `path`. Fails before reading any record if the header is unusable.
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, delimiter)
    }
}

impl<R: io::Read> ScoreReader<R> {
    pub fn from_reader(rdr: R, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(rdr);

        let headers = normalize_headers(reader.headers()?.iter());
        validate_headers(&headers)?;
        reader.set_headers(headers.clone());

        Ok(Self { reader, headers })
    }

    /// The normalized header.
    pub fn columns(&self) -> &StringRecord {
        &self.headers
    }

    /// Iterates over the remaining records. Record numbers in errors start at 1 for the first
    /// line after the header.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<ScoreRow>> + '_ {
        self.reader
            .deserialize::<ScoreRow>()
            .enumerate()
            .map(|(index, row)| -> Result<ScoreRow> {
                let row = row?;
                row.check_required(index + 1)?;
                Ok(row)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> Result<ScoreReader<&[u8]>> {
        ScoreReader::from_reader(data.as_bytes(), b',')
    }

    #[test]
    fn normalizes_source_headers() {
        assert_eq!(normalize_header("Student ID"), "student_id");
        assert_eq!(normalize_header("  Student Name "), "student_name");
        assert_eq!(normalize_header("Quiz Score 1"), "quiz_score_1");
        assert_eq!(
            normalize_header("Attendance (out of 10)"),
            "attendance_out_of_10"
        );
        assert_eq!(normalize_header("Mid Term 1 Score"), "mid_term_1_score");
        assert_eq!(normalize_header("Class Average"), "class_average");
    }

    #[test]
    fn normalization_is_stable_when_parens_expose_whitespace() {
        let once = normalize_header("( \tScore)");
        assert_eq!(normalize_header(&once), once);
    }

    #[test]
    fn missing_required_column_fails_at_open() {
        let err = reader("Student ID,Quiz Score 1\nS1,9\n").err().unwrap();
        assert!(matches!(err, PipelineError::MissingColumn("student_name")));
    }

    #[test]
    fn duplicate_canonical_column_fails_at_open() {
        let err = reader("Student ID,student_id,Student Name\nS1,S1,Ann\n")
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::DuplicateColumn(ref c) if c == "student_id"));
    }

    #[test]
    fn absent_and_empty_scores_are_none() {
        let mut scores = reader(
            "Student ID,Student Name,Quiz Score 1,Assignment 2,Favourite Colour\n\
             S1, Ann ,8.5,,blue\n",
        )
        .unwrap();

        let rows: Vec<ScoreRow> = scores.rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.student_id, "S1");
        assert_eq!(row.student_name, "Ann");
        assert_eq!(row.quiz_score_1, Some(8.5));
        assert_eq!(row.assignment_2, None);
        assert_eq!(row.class_average, None);
    }

    #[test]
    fn short_record_leaves_trailing_scores_empty() {
        let mut scores = reader(
            "Student ID,Student Name,Quiz Score 1,Quiz Score 2,Class Average\n\
             S1,Ann,8,9,70\n\
             S2,Bob,6\n",
        )
        .unwrap();

        let rows: Vec<ScoreRow> = scores.rows().collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].student_id, "S2");
        assert_eq!(rows[1].quiz_score_1, Some(6.0));
        assert_eq!(rows[1].quiz_score_2, None);
        assert_eq!(rows[1].class_average, None);
    }

    #[test]
    fn record_without_student_name_is_a_row_error() {
        let mut scores = reader("Student ID,Student Name,Quiz Score 1\nS1\n").unwrap();
        assert!(matches!(scores.rows().next().unwrap(), Err(PipelineError::Csv(_))));
    }

    #[test]
    fn non_numeric_score_is_a_row_error() {
        let mut scores = reader("Student ID,Student Name,Quiz Score 1\nS1,Ann,8\nS2,Bob,ten\n")
            .unwrap();

        let mut rows = scores.rows();
        assert!(rows.next().unwrap().is_ok());
        assert!(matches!(rows.next().unwrap(), Err(PipelineError::Csv(_))));
    }

    #[test]
    fn empty_student_id_reports_record_number() {
        let mut scores = reader("Student ID,Student Name\nS1,Ann\n,Bob\n").unwrap();

        let err = scores.rows().nth(1).unwrap().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::EmptyField {
                record: 2,
                column: STUDENT_ID
            }
        ));
    }

    #[test]
    fn honours_alternate_delimiter() {
        let mut scores =
            ScoreReader::from_reader("Student ID;Student Name\nS1;Ann\n".as_bytes(), b';').unwrap();
        assert_eq!(scores.columns().iter().collect::<Vec<_>>(), [STUDENT_ID, STUDENT_NAME]);
        assert_eq!(scores.rows().count(), 1);
    }
}
