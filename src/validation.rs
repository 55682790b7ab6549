//! Input validation for timetabling problems.
//!
//! Checks structural integrity of courses, lecturer bindings, requests, and
//! rules before scheduling. Detects:
//! - Duplicate ids (blocks, course codes, section bindings, requests)
//! - Inconsistent section size bounds
//! - Block references outside the rule source
//! - Lecturer bindings to unknown courses or section indices
//! - Requests for unknown courses or without a student
//! - A priority order that is not a permutation of the tiers
//!
//! Validation is advisory. The scheduler accepts invalid input and routes
//! the affected requests to the unresolved partition.

use std::collections::{HashMap, HashSet};

use crate::models::{Course, Request, Rules, SectionLecturer, Tier};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same id.
    DuplicateId,
    /// `max_size == 0` or not `min <= target <= max`.
    InvalidSizeBounds,
    /// A course names a block the rule source does not contain.
    InvalidBlockReference,
    /// A lecturer binding names an unknown course or section index.
    InvalidSectionReference,
    /// A request names an unknown course.
    UnknownCourse,
    /// A request carries no student id.
    MissingStudent,
    /// The priority order is not a permutation of all tiers.
    InvalidPriorityOrder,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of a timetabling run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_input(
    courses: &[Course],
    section_lecturers: &[SectionLecturer],
    requests: &[Request],
    rules: &Rules,
) -> ValidationResult {
    let mut errors = Vec::new();

    check_rules(rules, &mut errors);
    let by_code = check_courses(courses, rules, &mut errors);
    check_section_lecturers(section_lecturers, &by_code, &mut errors);
    check_requests(requests, &by_code, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_rules(rules: &Rules, errors: &mut Vec<ValidationError>) {
    let mut block_ids = HashSet::new();
    for block in &rules.blocks {
        if !block_ids.insert(block) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate block ID: {block}"),
            ));
        }
    }

    let distinct: HashSet<Tier> = rules.priority_order.iter().copied().collect();
    if rules.priority_order.len() != Tier::ALL.len() || distinct.len() != Tier::ALL.len() {
        let names: Vec<&str> = rules.priority_order.iter().map(|t| t.as_str()).collect();
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPriorityOrder,
            format!("Priority order [{}] must list each tier once", names.join(", ")),
        ));
    }
}

fn check_courses<'a>(
    courses: &'a [Course],
    rules: &Rules,
    errors: &mut Vec<ValidationError>,
) -> HashMap<&'a str, &'a Course> {
    let mut by_code = HashMap::new();

    for course in courses {
        if by_code.insert(course.code.as_str(), course).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {}", course.code),
            ));
        }

        if course.max_size == 0
            || course.min_size > course.target_size
            || course.target_size > course.max_size
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSizeBounds,
                format!(
                    "Course '{}' has invalid section sizes min={} target={} max={}",
                    course.code, course.min_size, course.target_size, course.max_size
                ),
            ));
        }

        let referenced = course
            .eligible_blocks
            .iter()
            .flatten()
            .chain(course.excluded_blocks.iter());
        for block in referenced {
            if !rules.contains_block(block) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBlockReference,
                    format!("Course '{}' references unknown block '{}'", course.code, block),
                ));
            }
        }
    }

    by_code
}

fn check_section_lecturers(
    section_lecturers: &[SectionLecturer],
    by_code: &HashMap<&str, &Course>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();

    for binding in section_lecturers {
        let key = binding.key();
        match by_code.get(binding.course_code.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSectionReference,
                format!(
                    "Lecturer '{}' is bound to unknown course '{}'",
                    binding.lecturer_id, binding.course_code
                ),
            )),
            Some(course) if binding.section == 0 || binding.section > course.section_count => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSectionReference,
                    format!(
                        "Lecturer '{}' is bound to {key}, but '{}' declares {} section(s)",
                        binding.lecturer_id, course.code, course.section_count
                    ),
                ));
            }
            Some(_) => {}
        }

        if !seen.insert(key.clone()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lecturer binding for {key}"),
            ));
        }
    }
}

fn check_requests(
    requests: &[Request],
    by_code: &HashMap<&str, &Course>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();

    for (idx, request) in requests.iter().enumerate() {
        if !by_code.contains_key(request.course_code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!(
                    "Request #{idx} references unknown course '{}'",
                    request.course_code
                ),
            ));
        }

        match request.student() {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingStudent,
                format!("Request #{idx} for '{}' has no student ID", request.course_code),
            )),
            Some(student) => {
                if !seen.insert((student, request.course_code.as_str())) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!(
                            "Duplicate request #{idx}: student '{student}' already requested '{}'",
                            request.course_code
                        ),
                    ));
                }
            }
        }
    }
}
