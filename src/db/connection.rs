use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open a private in-memory database and create the registry schema. Every
/// call yields an independent, empty store.
///
/// Foreign keys are enforced without cascades, so removing an entity whose
/// edges are still present fails.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE teachers (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id BLOB NOT NULL UNIQUE,
            name TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create teachers table")?;

    conn.execute(
        "CREATE TABLE students (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id BLOB NOT NULL UNIQUE,
            name TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create students table")?;

    conn.execute(
        "CREATE TABLE courses (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id BLOB NOT NULL UNIQUE,
            name TEXT NOT NULL,
            kind TEXT NOT NULL CHECK (kind IN ('online', 'offline')),
            detail TEXT NOT NULL,
            teacher_id BLOB REFERENCES teachers(id),
            assigned_seq INTEGER
        )",
        [],
    )
    .context("failed to create courses table")?;

    conn.execute(
        "CREATE TABLE enrollments (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id BLOB NOT NULL REFERENCES courses(id),
            student_id BLOB NOT NULL REFERENCES students(id),
            UNIQUE (course_id, student_id)
        )",
        [],
    )
    .context("failed to create enrollments table")?;

    Ok(conn)
}
