//! Single-record CSV roster import
//!
//! Pulls one exam sitting (university, subject, student count) out of an
//! uploaded CSV file. Header matching is deliberately fuzzy — substring
//! search over lowercased header cells with a few synonyms per column — so
//! varied real-world exports work without an exact schema. The first data
//! row is the record; anything after it is ignored.
//!
//! Failure is two-tier: a layout that cannot be resolved at all (too few
//! rows, no header cell matching a required column) is a hard
//! [`CsvFormatError`] and the import is abandoned; a student-count cell
//! that is not an integer is soft invalidity, reported as
//! `students == None` so the caller can still use the text fields.

use crate::error::CsvFormatError;

/// Header synonyms, matched by substring against lowercased header cells.
/// The first cell (left to right) containing any synonym wins.
const UNIVERSITY_TOKENS: &[&str] = &["university", "institution"];
const SUBJECT_TOKENS: &[&str] = &["subject", "course"];
const STUDENTS_TOKENS: &[&str] = &["student", "enrollment", "count"];

/// One imported exam sitting
///
/// `students` is `None` when the count cell did not parse as an integer;
/// check [`CsvImport::is_valid`] before trusting the numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvImport {
    pub university: String,
    pub subject: String,
    pub students: Option<u32>,
}

impl CsvImport {
    /// True iff the student-count cell parsed as an integer
    pub fn is_valid(&self) -> bool {
        self.students.is_some()
    }
}

/// Parse raw CSV text into a single exam-sitting record
///
/// Expects comma-separated text with a header row and at least one data
/// row. Splits on plain newlines and commas (no quoting layer); cells are
/// trimmed, which also strips the `\r` of CRLF files. A data row shorter
/// than the header yields empty text fields / a `None` count for the
/// missing cells rather than an error.
pub fn parse_csv(raw: &str) -> Result<CsvImport, CsvFormatError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() < 2 {
        return Err(CsvFormatError::TooFewRows { found: lines.len() });
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let university_idx = find_column(&headers, UNIVERSITY_TOKENS)
        .ok_or(CsvFormatError::MissingColumn { column: "university" })?;
    let subject_idx = find_column(&headers, SUBJECT_TOKENS)
        .ok_or(CsvFormatError::MissingColumn { column: "subject" })?;
    let students_idx = find_column(&headers, STUDENTS_TOKENS)
        .ok_or(CsvFormatError::MissingColumn { column: "students" })?;

    // Single-record importer: only the first data row is read.
    let cells: Vec<&str> = lines[1].split(',').map(str::trim).collect();

    let university = cell_at(&cells, university_idx);
    let subject = cell_at(&cells, subject_idx);
    let students = cells
        .get(students_idx)
        .and_then(|cell| cell.parse::<u32>().ok());

    Ok(CsvImport {
        university,
        subject,
        students,
    })
}

fn find_column(headers: &[String], tokens: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| tokens.iter().any(|token| header.contains(token)))
}

fn cell_at(cells: &[&str], index: usize) -> String {
    cells.get(index).copied().unwrap_or_default().to_string()
}
