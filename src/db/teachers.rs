use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{CourseId, Teacher, TeacherId};

/// Populate each teacher's course list from the `courses.teacher_id` column,
/// which is the single record of the teacher↔course edge.
fn attach_courses(conn: &Connection, teachers: &mut [Teacher]) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM courses WHERE teacher_id = ?1 ORDER BY assigned_seq")
        .context("failed to prepare assigned courses query")?;

    for teacher in teachers.iter_mut() {
        teacher.courses = stmt
            .query_map([teacher.id], |row| row.get(0))
            .context("failed to load assigned courses")?
            .collect::<Result<Vec<CourseId>, _>>()
            .context("failed to collect assigned courses")?;
    }

    Ok(())
}

/// Every registered teacher in insertion order.
pub fn fetch_teachers(conn: &Connection) -> Result<Vec<Teacher>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM teachers ORDER BY seq")
        .context("failed to prepare teacher query")?;

    let mut teachers = stmt
        .query_map([], |row| {
            Ok(Teacher {
                id: row.get(0)?,
                name: row.get(1)?,
                courses: Vec::new(),
            })
        })
        .context("failed to load teachers")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teachers")?;

    attach_courses(conn, &mut teachers)?;
    Ok(teachers)
}

pub fn fetch_teacher(conn: &Connection, id: TeacherId) -> Result<Option<Teacher>> {
    let teacher = conn
        .query_row("SELECT id, name FROM teachers WHERE id = ?1", [id], |row| {
            Ok(Teacher {
                id: row.get(0)?,
                name: row.get(1)?,
                courses: Vec::new(),
            })
        })
        .optional()
        .context("failed to load teacher")?;

    let mut found: Vec<Teacher> = teacher.into_iter().collect();
    attach_courses(conn, &mut found)?;
    Ok(found.pop())
}

pub fn teacher_exists(conn: &Connection, id: TeacherId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM teachers WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )
    .context("failed to check teacher membership")
}

/// Register a teacher; returns `false` if the id is already present.
pub fn insert_teacher(conn: &Connection, teacher: &Teacher) -> Result<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO teachers (id, name) VALUES (?1, ?2)",
            params![teacher.id, teacher.name],
        )
        .context("failed to insert teacher")?;
    Ok(inserted > 0)
}

/// Drop the teacher row. Fails while any course still points at the teacher.
pub fn delete_teacher(conn: &Connection, id: TeacherId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM teachers WHERE id = ?1", [id])
        .context("failed to delete teacher")?;
    Ok(deleted > 0)
}

/// Make `teacher` the owner of `course`. The course's teacher field and the
/// teacher's course list are the same column, so both sides change at once.
/// A course held by someone else moves to `teacher` and is appended to the
/// end of their list. Returns `false` when nothing changed.
pub fn assign_course(conn: &Connection, teacher: TeacherId, course: CourseId) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE courses
             SET teacher_id = ?1,
                 assigned_seq = (SELECT COALESCE(MAX(assigned_seq), 0) + 1 FROM courses)
             WHERE id = ?2 AND teacher_id IS NOT ?1",
            params![teacher, course],
        )
        .map_err(|err| match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => {
                anyhow!("teacher is not registered")
            }
            _ => err.into(),
        })
        .context("failed to assign course")?;
    Ok(updated > 0)
}

/// Clear the edge between `teacher` and `course`. Has no effect if the course
/// belongs to a different teacher or to nobody.
pub fn unassign_course(conn: &Connection, teacher: TeacherId, course: CourseId) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE courses
             SET teacher_id = NULL, assigned_seq = NULL
             WHERE id = ?2 AND teacher_id = ?1",
            params![teacher, course],
        )
        .context("failed to unassign course")?;
    Ok(updated > 0)
}
