use anyhow::{anyhow, Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Course, CourseId, CourseKind, StudentId, TeacherId};

/// Map a `courses` row onto a snapshot. Enrollment lists are attached
/// separately by [`attach_students`].
fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    let tag: String = row.get(2)?;
    let detail: String = row.get(3)?;
    let kind = CourseKind::from_parts(&tag, detail)
        .ok_or_else(|| rusqlite::Error::InvalidColumnType(2, "kind".to_string(), Type::Text))?;

    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        kind,
        teacher: row.get(4)?,
        students: Vec::new(),
    })
}

/// Fill in each course's student list, oldest enrollment first.
fn attach_students(conn: &Connection, courses: &mut [Course]) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("SELECT student_id FROM enrollments WHERE course_id = ?1 ORDER BY seq")
        .context("failed to prepare enrollment query")?;

    for course in courses.iter_mut() {
        course.students = stmt
            .query_map([course.id], |row| row.get(0))
            .context("failed to load enrolled students")?
            .collect::<Result<Vec<StudentId>, _>>()
            .context("failed to collect enrolled students")?;
    }

    Ok(())
}

/// Every registered course in insertion order.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare("SELECT id, name, kind, detail, teacher_id FROM courses ORDER BY seq")
        .context("failed to prepare course query")?;

    let mut courses = stmt
        .query_map([], course_from_row)
        .context("failed to load courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect courses")?;

    attach_students(conn, &mut courses)?;
    Ok(courses)
}

/// Courses currently held by `teacher`, in the order they were assigned.
pub fn fetch_courses_for_teacher(conn: &Connection, teacher: TeacherId) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, kind, detail, teacher_id
             FROM courses
             WHERE teacher_id = ?1
             ORDER BY assigned_seq",
        )
        .context("failed to prepare teacher courses query")?;

    let mut courses = stmt
        .query_map([teacher], course_from_row)
        .context("failed to load teacher courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teacher courses")?;

    attach_students(conn, &mut courses)?;
    Ok(courses)
}

pub fn fetch_course(conn: &Connection, id: CourseId) -> Result<Option<Course>> {
    let course = conn
        .query_row(
            "SELECT id, name, kind, detail, teacher_id FROM courses WHERE id = ?1",
            [id],
            course_from_row,
        )
        .optional()
        .context("failed to load course")?;

    let mut found: Vec<Course> = course.into_iter().collect();
    attach_students(conn, &mut found)?;
    Ok(found.pop())
}

pub fn course_exists(conn: &Connection, id: CourseId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )
    .context("failed to check course membership")
}

/// Register a course. Only the course's own fields are stored; any teacher or
/// student links carried by the value are ignored. Returns `false` when a
/// course with the same id is already present.
pub fn insert_course(conn: &Connection, course: &Course) -> Result<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO courses (id, name, kind, detail) VALUES (?1, ?2, ?3, ?4)",
            params![course.id, course.name, course.kind.tag(), course.kind.detail()],
        )
        .context("failed to insert course")?;
    Ok(inserted > 0)
}

/// Drop the course row itself. Enrollments and the teacher link must already
/// be gone, otherwise the foreign key check rejects the delete.
pub fn delete_course(conn: &Connection, id: CourseId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM courses WHERE id = ?1", [id])
        .context("failed to delete course")?;
    Ok(deleted > 0)
}

/// Create the student↔course edge. A single row represents both directions,
/// so the course's student list and the student's course list change
/// together. Enrolling twice is a no-op and returns `false`.
pub fn enroll_student(conn: &Connection, course: CourseId, student: StudentId) -> Result<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO enrollments (course_id, student_id) VALUES (?1, ?2)",
            params![course, student],
        )
        .map_err(|err| match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => {
                anyhow!("course or student is not registered")
            }
            _ => err.into(),
        })
        .context("failed to enroll student")?;
    Ok(inserted > 0)
}

/// Remove the student↔course edge. Returns `false` if it did not exist.
pub fn unenroll_student(conn: &Connection, course: CourseId, student: StudentId) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM enrollments WHERE course_id = ?1 AND student_id = ?2",
            params![course, student],
        )
        .context("failed to unenroll student")?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_student, open_in_memory};
    use crate::models::Student;

    #[test]
    fn insert_is_identity_based() {
        let conn = open_in_memory().unwrap();
        let first = Course::online("Rust", "https://a").unwrap();
        let twin = Course::online("Rust", "https://a").unwrap();

        assert!(insert_course(&conn, &first).unwrap());
        assert!(!insert_course(&conn, &first).unwrap());
        assert!(insert_course(&conn, &twin).unwrap());
        assert_eq!(fetch_courses(&conn).unwrap().len(), 2);
    }

    #[test]
    fn fetch_preserves_kind_and_order() {
        let conn = open_in_memory().unwrap();
        let online = Course::online("Zeta", "https://z").unwrap();
        let offline = Course::offline("Alpha", "Room 1").unwrap();
        insert_course(&conn, &online).unwrap();
        insert_course(&conn, &offline).unwrap();

        let courses = fetch_courses(&conn).unwrap();
        assert_eq!(courses, vec![online, offline]);
    }

    #[test]
    fn enrollment_is_idempotent() {
        let conn = open_in_memory().unwrap();
        let course = Course::offline("Math", "Room 2").unwrap();
        let student = Student::new("Anna").unwrap();
        insert_course(&conn, &course).unwrap();
        insert_student(&conn, &student).unwrap();

        assert!(enroll_student(&conn, course.id, student.id).unwrap());
        assert!(!enroll_student(&conn, course.id, student.id).unwrap());
        let loaded = fetch_course(&conn, course.id).unwrap().unwrap();
        assert_eq!(loaded.students, vec![student.id]);

        assert!(unenroll_student(&conn, course.id, student.id).unwrap());
        assert!(!unenroll_student(&conn, course.id, student.id).unwrap());
        let loaded = fetch_course(&conn, course.id).unwrap().unwrap();
        assert!(loaded.students.is_empty());
    }

    #[test]
    fn enrolling_unknown_student_is_rejected() {
        let conn = open_in_memory().unwrap();
        let course = Course::offline("Math", "Room 2").unwrap();
        insert_course(&conn, &course).unwrap();

        assert!(enroll_student(&conn, course.id, StudentId::new()).is_err());
    }

    #[test]
    fn delete_refuses_while_edges_remain() {
        let conn = open_in_memory().unwrap();
        let course = Course::offline("Math", "Room 2").unwrap();
        let student = Student::new("Anna").unwrap();
        insert_course(&conn, &course).unwrap();
        insert_student(&conn, &student).unwrap();
        enroll_student(&conn, course.id, student.id).unwrap();

        assert!(delete_course(&conn, course.id).is_err());
        unenroll_student(&conn, course.id, student.id).unwrap();
        assert!(delete_course(&conn, course.id).unwrap());
        assert!(fetch_course(&conn, course.id).unwrap().is_none());
    }
}
