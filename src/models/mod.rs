//! Timetabling domain models.
//!
//! Provides the core data types for block timetabling problems and their
//! solutions.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Conference | Clinic |
//! |-------------|--------|------------|--------|
//! | Block | Period | Session slot | Appointment slot |
//! | Course | Subject | Track | Service |
//! | Section | Class group | Talk room | Session |
//! | Lecturer | Teacher | Speaker | Practitioner |
//! | Request | Enrolment wish | Registration | Booking |

mod block;
mod course;
mod request;
mod rules;
mod section;
mod timetable;

pub use block::{blocks, Block};
pub use course::Course;
pub use request::{Request, Tier};
pub use rules::{Rules, DEFAULT_BLOCKS, EXTENDED_BLOCKS};
pub use section::{placeholder_lecturer, Section, SectionKey, SectionLecturer};
pub use timetable::Timetable;
