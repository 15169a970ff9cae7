//! Domain models for the registry. Each entity carries an opaque id assigned
//! at construction, and relationships are stored as ids rather than nested
//! values. Values handed out by the registry are snapshots: mutating them
//! never changes registry state.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use thiserror::Error;
use uuid::Uuid;

/// Declare a UUID-backed identifier that can be bound to and read from SQLite.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                Uuid::column_result(value).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identity of a course. Two courses with the same name are still distinct.
    CourseId
);
entity_id!(
    /// Identity of a teacher.
    TeacherId
);
entity_id!(
    /// Identity of a student.
    StudentId
);

/// Reasons an entity cannot be constructed. The messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Имя курса и URL платформы обязательны для онлайн-курса.")]
    IncompleteOnlineCourse,
    #[error("Имя курса и адрес обязательны для оффлайн-курса.")]
    IncompleteOfflineCourse,
    #[error("Имя преподавателя обязательно")]
    BlankTeacherName,
    #[error("Имя студента обязательно")]
    BlankStudentName,
}

/// Delivery format of a course together with its required secondary field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseKind {
    Online { platform_url: String },
    Offline { location: String },
}

impl CourseKind {
    /// Storage tag written to the `kind` column.
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            CourseKind::Online { .. } => "online",
            CourseKind::Offline { .. } => "offline",
        }
    }

    /// The variant-specific field: platform URL or location.
    pub fn detail(&self) -> &str {
        match self {
            CourseKind::Online { platform_url } => platform_url,
            CourseKind::Offline { location } => location,
        }
    }

    /// Rebuild a kind from its storage tag. Unknown tags yield `None`.
    pub(crate) fn from_parts(tag: &str, detail: String) -> Option<Self> {
        match tag {
            "online" => Some(CourseKind::Online {
                platform_url: detail,
            }),
            "offline" => Some(CourseKind::Offline { location: detail }),
            _ => None,
        }
    }

    /// Descriptive line shown next to the course name in listings.
    pub fn details(&self) -> String {
        match self {
            CourseKind::Online { platform_url } => {
                format!("Тип: Онлайн, Платформа: {platform_url}")
            }
            CourseKind::Offline { location } => format!("Тип: Оффлайн, Адрес: {location}"),
        }
    }
}

/// A course snapshot. `teacher` and `students` mirror the teacher's course
/// list and each student's enrollment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub kind: CourseKind,
    pub teacher: Option<TeacherId>,
    /// Enrolled students in order of enrollment.
    pub students: Vec<StudentId>,
}

impl Course {
    /// Build an unregistered online course. Both fields are trimmed and must
    /// be non-blank.
    pub fn online(name: &str, platform_url: &str) -> Result<Self, ValidationError> {
        let (name, platform_url) = (name.trim(), platform_url.trim());
        if name.is_empty() || platform_url.is_empty() {
            return Err(ValidationError::IncompleteOnlineCourse);
        }
        Ok(Self::unlinked(
            name,
            CourseKind::Online {
                platform_url: platform_url.to_string(),
            },
        ))
    }

    /// Build an unregistered offline course held at `location`.
    pub fn offline(name: &str, location: &str) -> Result<Self, ValidationError> {
        let (name, location) = (name.trim(), location.trim());
        if name.is_empty() || location.is_empty() {
            return Err(ValidationError::IncompleteOfflineCourse);
        }
        Ok(Self::unlinked(
            name,
            CourseKind::Offline {
                location: location.to_string(),
            },
        ))
    }

    fn unlinked(name: &str, kind: CourseKind) -> Self {
        Self {
            id: CourseId::new(),
            name: name.to_string(),
            kind,
            teacher: None,
            students: Vec::new(),
        }
    }

    pub fn details(&self) -> String {
        self.kind.details()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    /// Assigned courses in order of assignment.
    pub courses: Vec<CourseId>,
}

impl Teacher {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankTeacherName);
        }
        Ok(Self {
            id: TeacherId::new(),
            name: name.to_string(),
            courses: Vec::new(),
        })
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Courses in order of enrollment.
    pub enrolled_courses: Vec<CourseId>,
}

impl Student {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankStudentName);
        }
        Ok(Self {
            id: StudentId::new(),
            name: name.to_string(),
            enrolled_courses: Vec::new(),
        })
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_course_trims_inputs() {
        let course = Course::online("  Rust 101 ", " https://learn.example ").unwrap();
        assert_eq!(course.name, "Rust 101");
        assert_eq!(course.kind.detail(), "https://learn.example");
        assert!(course.teacher.is_none());
        assert!(course.students.is_empty());
    }

    #[test]
    fn blank_course_fields_are_rejected() {
        assert_eq!(
            Course::online("   ", "https://x"),
            Err(ValidationError::IncompleteOnlineCourse)
        );
        assert_eq!(
            Course::online("Rust", "\t"),
            Err(ValidationError::IncompleteOnlineCourse)
        );
        assert_eq!(
            Course::offline("", "Room 4"),
            Err(ValidationError::IncompleteOfflineCourse)
        );
        assert_eq!(
            Course::offline("Math", " "),
            Err(ValidationError::IncompleteOfflineCourse)
        );
    }

    #[test]
    fn details_depend_on_kind() {
        let online = Course::online("A", "https://p.example").unwrap();
        let offline = Course::offline("B", "ул. Ленина, 1").unwrap();
        assert_eq!(online.details(), "Тип: Онлайн, Платформа: https://p.example");
        assert_eq!(offline.details(), "Тип: Оффлайн, Адрес: ул. Ленина, 1");
    }

    #[test]
    fn same_name_gives_distinct_identities() {
        let first = Teacher::new("Иванов").unwrap();
        let second = Teacher::new("Иванов").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn people_require_names() {
        assert_eq!(Teacher::new(" "), Err(ValidationError::BlankTeacherName));
        assert_eq!(Student::new(""), Err(ValidationError::BlankStudentName));
        assert_eq!(Student::new(" Петров ").unwrap().name, "Петров");
    }

    #[test]
    fn kind_round_trips_through_storage_tag() {
        let kind = CourseKind::Offline {
            location: "Hall".to_string(),
        };
        let rebuilt = CourseKind::from_parts(kind.tag(), kind.detail().to_string());
        assert_eq!(rebuilt, Some(kind));
        assert_eq!(CourseKind::from_parts("hybrid", String::new()), None);
    }
}
