//! Coursera + UPSO exports -> `_data/studies.yml`
//!
//! Both sources feed a single file. Either one may be missing; the file is
//! still written with an empty list in its place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::{FieldRule, Object, RecordSource, truncate};

/// Tracker prefix of the Coursera export
pub const COURSERA_SOURCE: &str = "coursera";

/// Tracker prefix of the UPSO (university) export
pub const UPSO_SOURCE: &str = "upso";

/// Output file name inside `_data/`
pub const OUTPUT: &str = "studies.yml";

const COURSES: RecordSource = RecordSource::new(&["courses"]);
const COURSE_TITLE: FieldRule = FieldRule::new("title", &["name", "title", "course_name"]);
const COURSE_PERCENT: FieldRule = FieldRule::new("percent", &["percent", "progress"]);

const SUBJECTS: RecordSource = RecordSource::new(&["materias", "subjects"]);
const SUBJECT_NAME: FieldRule = FieldRule::new("nombre", &["nombre", "name", "subject"]);
const SUBJECT_STATUS: FieldRule = FieldRule::new("estado", &["estado", "status"]);

/// Status fragments marking a subject as currently being taken
const IN_PROGRESS_MARKERS: &[&str] = &["en curso", "cursando", "ongoing", "progreso"];

const UNNAMED_COURSE: &str = "Curso sin nombre";
const UNNAMED_SUBJECT: &str = "Materia sin nombre";

/// An online course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name
    pub title: String,
    /// Completion percentage, truncated
    pub percent: i64,
}

/// A university subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name
    pub nombre: String,
    /// Status as reported by the tracker
    pub estado: String,
}

/// University section of `studies.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upso {
    /// Subjects currently in progress
    pub en_curso: Vec<Subject>,
}

/// Contents of `studies.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Studies {
    /// Coursera courses
    pub coursera: Vec<Course>,
    /// University subjects
    pub upso: Upso,
}

/// Normalize a Coursera export; unrecognized shapes yield no courses
pub fn courses(export: &Value) -> Vec<Course> {
    COURSES
        .objects(export)
        .unwrap_or_default()
        .into_iter()
        .map(|obj| Course {
            title: COURSE_TITLE
                .display(obj)
                .unwrap_or_else(|| UNNAMED_COURSE.to_string()),
            percent: COURSE_PERCENT.number(obj).map(truncate).unwrap_or(0),
        })
        .collect()
}

/// Normalize a UPSO export, keeping only subjects in progress
pub fn subjects_in_progress(export: &Value) -> Vec<Subject> {
    SUBJECTS
        .objects(export)
        .unwrap_or_default()
        .into_iter()
        .filter_map(subject_in_progress)
        .collect()
}

fn subject_in_progress(obj: &Object) -> Option<Subject> {
    let estado = SUBJECT_STATUS
        .display(obj)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let lowered = estado.to_lowercase();
    if !IN_PROGRESS_MARKERS.iter().any(|m| lowered.contains(m)) {
        return None;
    }

    let nombre = SUBJECT_NAME
        .display(obj)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| UNNAMED_SUBJECT.to_string());
    Some(Subject { nombre, estado })
}

impl Studies {
    /// Assemble the file from whichever exports were available
    pub fn from_exports(coursera: Option<&Value>, upso: Option<&Value>) -> Self {
        Self {
            coursera: coursera.map(courses).unwrap_or_default(),
            upso: Upso {
                en_curso: upso.map(subjects_in_progress).unwrap_or_default(),
            },
        }
    }
}
