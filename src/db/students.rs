use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{CourseId, Student, StudentId};

/// Populate each student's course list from `enrollments`, oldest first.
fn attach_enrollments(conn: &Connection, students: &mut [Student]) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("SELECT course_id FROM enrollments WHERE student_id = ?1 ORDER BY seq")
        .context("failed to prepare enrolled courses query")?;

    for student in students.iter_mut() {
        student.enrolled_courses = stmt
            .query_map([student.id], |row| row.get(0))
            .context("failed to load enrolled courses")?
            .collect::<Result<Vec<CourseId>, _>>()
            .context("failed to collect enrolled courses")?;
    }

    Ok(())
}

/// Every registered student in insertion order.
pub fn fetch_students(conn: &Connection) -> Result<Vec<Student>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM students ORDER BY seq")
        .context("failed to prepare student query")?;

    let mut students = stmt
        .query_map([], |row| {
            Ok(Student {
                id: row.get(0)?,
                name: row.get(1)?,
                enrolled_courses: Vec::new(),
            })
        })
        .context("failed to load students")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect students")?;

    attach_enrollments(conn, &mut students)?;
    Ok(students)
}

pub fn fetch_student(conn: &Connection, id: StudentId) -> Result<Option<Student>> {
    let student = conn
        .query_row("SELECT id, name FROM students WHERE id = ?1", [id], |row| {
            Ok(Student {
                id: row.get(0)?,
                name: row.get(1)?,
                enrolled_courses: Vec::new(),
            })
        })
        .optional()
        .context("failed to load student")?;

    let mut found: Vec<Student> = student.into_iter().collect();
    attach_enrollments(conn, &mut found)?;
    Ok(found.pop())
}

pub fn student_exists(conn: &Connection, id: StudentId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )
    .context("failed to check student membership")
}

/// Register a student; returns `false` if the id is already present.
pub fn insert_student(conn: &Connection, student: &Student) -> Result<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO students (id, name) VALUES (?1, ?2)",
            params![student.id, student.name],
        )
        .context("failed to insert student")?;
    Ok(inserted > 0)
}

/// Drop the student row. Fails while any enrollment still references it.
pub fn delete_student(conn: &Connection, id: StudentId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM students WHERE id = ?1", [id])
        .context("failed to delete student")?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{enroll_student, insert_course, open_in_memory};
    use crate::models::Course;

    #[test]
    fn enrollments_follow_enrollment_order() {
        let conn = open_in_memory().unwrap();
        let student = Student::new("Olga").unwrap();
        let late = Course::online("Late", "https://l").unwrap();
        let early = Course::online("Early", "https://e").unwrap();
        insert_student(&conn, &student).unwrap();
        insert_course(&conn, &late).unwrap();
        insert_course(&conn, &early).unwrap();

        enroll_student(&conn, early.id, student.id).unwrap();
        enroll_student(&conn, late.id, student.id).unwrap();

        let loaded = fetch_student(&conn, student.id).unwrap().unwrap();
        assert_eq!(loaded.enrolled_courses, vec![early.id, late.id]);
    }

    #[test]
    fn membership_tracks_insert_and_delete() {
        let conn = open_in_memory().unwrap();
        let student = Student::new("Olga").unwrap();

        assert!(!student_exists(&conn, student.id).unwrap());
        assert!(insert_student(&conn, &student).unwrap());
        assert!(!insert_student(&conn, &student).unwrap());
        assert!(student_exists(&conn, student.id).unwrap());
        assert_eq!(fetch_students(&conn).unwrap().len(), 1);

        assert!(delete_student(&conn, student.id).unwrap());
        assert!(!delete_student(&conn, student.id).unwrap());
        assert!(fetch_student(&conn, student.id).unwrap().is_none());
    }
}
