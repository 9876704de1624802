//! Input validation utilities
//!
//! Checks user-supplied exam details before they reach the estimator or the
//! history store. The estimator re-checks the student count itself; these
//! functions exist so the CLI can reject bad input with a field-level message
//! before doing any work.

use crate::error::{ExamcostError, Result};

/// Maximum accepted student count
///
/// Well above anything the catalog can serve; mainly guards against typos
/// like a pasted phone number.
pub const MAX_STUDENTS: u32 = 1_000_000;

/// Validate a student count
///
/// Counts must be between 1 and [`MAX_STUDENTS`].
pub fn validate_student_count(students: u32) -> Result<()> {
    if students == 0 {
        return Err(ExamcostError::Validation {
            field: "students".to_string(),
            reason: "student count must be at least 1".to_string(),
        });
    }

    if students > MAX_STUDENTS {
        return Err(ExamcostError::Validation {
            field: "students".to_string(),
            reason: format!(
                "student count must be at most {}, got: {}",
                MAX_STUDENTS, students
            ),
        });
    }

    Ok(())
}

/// Validate a university name
///
/// Names cannot be empty or whitespace-only.
pub fn validate_university(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ExamcostError::Validation {
            field: "university".to_string(),
            reason: "university name cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate a subject name
///
/// Subjects cannot be empty or whitespace-only.
pub fn validate_subject(subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(ExamcostError::Validation {
            field: "subject".to_string(),
            reason: "subject cannot be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_student_count() {
        assert!(validate_student_count(1).is_ok());
        assert!(validate_student_count(100).is_ok());
        assert!(validate_student_count(MAX_STUDENTS).is_ok());
        assert!(validate_student_count(0).is_err()); // Zero
        assert!(validate_student_count(MAX_STUDENTS + 1).is_err()); // Too large
    }

    #[test]
    fn test_validate_student_count_error_names_field() {
        let err = validate_student_count(0).unwrap_err();
        assert!(matches!(
            err,
            ExamcostError::Validation { ref field, .. } if field == "students"
        ));
    }

    #[test]
    fn test_validate_university() {
        assert!(validate_university("MIT").is_ok());
        assert!(validate_university("ETH Zurich").is_ok());
        assert!(validate_university("").is_err()); // Empty
        assert!(validate_university("   ").is_err()); // Whitespace only
    }

    #[test]
    fn test_validate_subject() {
        assert!(validate_subject("Physics").is_ok());
        assert!(validate_subject("Computer Science").is_ok());
        assert!(validate_subject("").is_err()); // Empty
        assert!(validate_subject("\t").is_err()); // Whitespace only
    }
}
