//! Catalog preprocessing.
//!
//! Builds the lookup indices the scheduler works from: course details by
//! code, lecturer by section, and requests grouped by course. All lookups
//! are hash-map backed and keyed by structured identities.
//!
//! # Ordering
//! Courses are ordered by the first request that names them. This order
//! drives both scheduling phases and is stable for identical input.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::models::{placeholder_lecturer, Course, Request, SectionKey, SectionLecturer};

/// Indexed view of one run's input.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: HashMap<String, Course>,
    lecturers: HashMap<SectionKey, String>,
    requests: Vec<Request>,
    requests_by_course: HashMap<String, Vec<usize>>,
    course_order: Vec<String>,
}

impl Catalog {
    /// Indexes courses, lecturer bindings, and requests.
    ///
    /// Later duplicates of a course code or section binding replace earlier
    /// ones; [`crate::validation::validate_input`] reports them.
    pub fn build(
        courses: &[Course],
        section_lecturers: &[SectionLecturer],
        requests: &[Request],
    ) -> Self {
        let courses: HashMap<String, Course> = courses
            .iter()
            .map(|c| (c.code.clone(), c.clone()))
            .collect();

        let lecturers: HashMap<SectionKey, String> = section_lecturers
            .iter()
            .map(|b| (b.key(), b.lecturer_id.clone()))
            .collect();

        let mut requests_by_course: HashMap<String, Vec<usize>> = HashMap::new();
        let mut course_order = Vec::new();
        for (idx, req) in requests.iter().enumerate() {
            let group = requests_by_course
                .entry(req.course_code.clone())
                .or_insert_with(|| {
                    course_order.push(req.course_code.clone());
                    Vec::new()
                });
            group.push(idx);
        }

        Self {
            courses,
            lecturers,
            requests: requests.to_vec(),
            requests_by_course,
            course_order,
        }
    }

    /// Course details by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Lecturer for a section, or the course placeholder if none is recorded.
    pub fn lecturer_for(&self, key: &SectionKey) -> Cow<'_, str> {
        match self.lecturers.get(key) {
            Some(id) => Cow::Borrowed(id.as_str()),
            None => Cow::Owned(placeholder_lecturer(&key.course_code)),
        }
    }

    /// All requests in input order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Input positions of the requests for a course, in input order.
    pub fn requests_for(&self, code: &str) -> &[usize] {
        self.requests_by_course
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Requested course codes in first-seen order.
    pub fn course_order(&self) -> &[String] {
        &self.course_order
    }

    /// Number of requests naming a course.
    pub fn demand(&self, code: &str) -> usize {
        self.requests_for(code).len()
    }

    /// Number of distinct courses in the catalog.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn sample() -> Catalog {
        let courses = vec![
            Course::new("BIB9").with_sections(2),
            Course::new("BIB10"),
        ];
        let lecturers = vec![SectionLecturer::new("BIB9", 1, "T1")];
        let requests = vec![
            Request::new("S1", "BIB10", Tier::Requested),
            Request::new("S1", "BIB9", Tier::Required),
            Request::new("S2", "BIB10", Tier::Required),
            Request::new("S3", "XYZ", Tier::Recommended),
        ];
        Catalog::build(&courses, &lecturers, &requests)
    }

    #[test]
    fn test_course_order_is_first_seen() {
        let cat = sample();
        assert_eq!(cat.course_order(), &["BIB10", "BIB9", "XYZ"]);
    }

    #[test]
    fn test_requests_grouped_in_input_order() {
        let cat = sample();
        assert_eq!(cat.requests_for("BIB10"), &[0, 2]);
        assert_eq!(cat.requests_for("BIB9"), &[1]);
        assert!(cat.requests_for("NOPE").is_empty());
        assert_eq!(cat.demand("BIB10"), 2);
        assert_eq!(cat.requests().len(), 4);
    }

    #[test]
    fn test_lecturer_lookup_and_placeholder() {
        let cat = sample();
        assert_eq!(cat.lecturer_for(&SectionKey::new("BIB9", 1)), "T1");
        assert_eq!(cat.lecturer_for(&SectionKey::new("BIB9", 2)), "unknown_BIB9");
    }

    #[test]
    fn test_course_lookup() {
        let cat = sample();
        assert_eq!(cat.course("BIB9").map(|c| c.section_count), Some(2));
        assert!(cat.course("XYZ").is_none());
        assert_eq!(cat.course_count(), 2);
    }

    #[test]
    fn test_duplicate_course_last_wins() {
        let courses = vec![
            Course::new("C1").with_max_size(10),
            Course::new("C1").with_max_size(30),
        ];
        let cat = Catalog::build(&courses, &[], &[]);
        assert_eq!(cat.course("C1").map(|c| c.max_size), Some(30));
    }
}
