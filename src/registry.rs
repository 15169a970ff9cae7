//! The registry owns the canonical course, teacher and student collections
//! and is the only place that composes edge changes with removals.
//!
//! Lookups that miss and inserts that collide are absorbed as no-ops. The
//! `Result` on every method only reports storage failures.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use crate::db;
use crate::models::{Course, CourseId, Student, StudentId, Teacher, TeacherId};

/// In-memory store of courses, teachers, students and their associations.
///
/// There is no global instance: construct one with [`CourseRegistry::in_memory`]
/// and hand it to whatever needs it. Each instance has its own private
/// database, so a fresh registry is always empty.
pub struct CourseRegistry {
    conn: Connection,
}

impl CourseRegistry {
    pub fn in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn add_course(&mut self, course: &Course) -> Result<()> {
        if db::insert_course(&self.conn, course)? {
            debug!(course = %course.id, name = %course.name, "course registered");
        } else {
            debug!(course = %course.id, "course already registered");
        }
        Ok(())
    }

    pub fn add_teacher(&mut self, teacher: &Teacher) -> Result<()> {
        if db::insert_teacher(&self.conn, teacher)? {
            debug!(teacher = %teacher.id, name = %teacher.name, "teacher registered");
        } else {
            debug!(teacher = %teacher.id, "teacher already registered");
        }
        Ok(())
    }

    pub fn add_student(&mut self, student: &Student) -> Result<()> {
        if db::insert_student(&self.conn, student)? {
            debug!(student = %student.id, name = %student.name, "student registered");
        } else {
            debug!(student = %student.id, "student already registered");
        }
        Ok(())
    }

    /// Remove a course after unenrolling all of its students and releasing its
    /// teacher. The whole sequence commits as one transaction.
    pub fn remove_course(&mut self, id: CourseId) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin course removal")?;

        let Some(course) = db::fetch_course(&tx, id)? else {
            debug!(course = %id, "remove skipped: course not registered");
            return Ok(());
        };

        for student in &course.students {
            db::unenroll_student(&tx, course.id, *student)?;
        }
        if let Some(teacher) = course.teacher {
            db::unassign_course(&tx, teacher, course.id)?;
        }
        db::delete_course(&tx, course.id)?;

        tx.commit().context("failed to commit course removal")?;
        debug!(
            course = %id,
            students = course.students.len(),
            had_teacher = course.teacher.is_some(),
            "course removed"
        );
        Ok(())
    }

    /// Remove a teacher after releasing every course they hold. The courses
    /// stay registered with no teacher.
    pub fn remove_teacher(&mut self, id: TeacherId) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin teacher removal")?;

        let Some(teacher) = db::fetch_teacher(&tx, id)? else {
            debug!(teacher = %id, "remove skipped: teacher not registered");
            return Ok(());
        };

        for course in &teacher.courses {
            db::unassign_course(&tx, teacher.id, *course)?;
        }
        db::delete_teacher(&tx, teacher.id)?;

        tx.commit().context("failed to commit teacher removal")?;
        debug!(teacher = %id, released = teacher.courses.len(), "teacher removed");
        Ok(())
    }

    /// Remove a student after unenrolling them from every course.
    pub fn remove_student(&mut self, id: StudentId) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("failed to begin student removal")?;

        let Some(student) = db::fetch_student(&tx, id)? else {
            debug!(student = %id, "remove skipped: student not registered");
            return Ok(());
        };

        for course in &student.enrolled_courses {
            db::unenroll_student(&tx, *course, student.id)?;
        }
        db::delete_student(&tx, student.id)?;

        tx.commit().context("failed to commit student removal")?;
        debug!(
            student = %id,
            unenrolled = student.enrolled_courses.len(),
            "student removed"
        );
        Ok(())
    }

    /// Link a teacher and a course. Silently does nothing unless both are
    /// registered.
    pub fn assign_teacher_to_course(&mut self, teacher: TeacherId, course: CourseId) -> Result<()> {
        if !db::teacher_exists(&self.conn, teacher)? || !db::course_exists(&self.conn, course)? {
            debug!(%teacher, %course, "assignment skipped: unknown teacher or course");
            return Ok(());
        }
        if db::assign_course(&self.conn, teacher, course)? {
            debug!(%teacher, %course, "teacher assigned");
        }
        Ok(())
    }

    /// Enroll a student in a course. Silently does nothing unless both are
    /// registered.
    pub fn enroll_student_in_course(&mut self, student: StudentId, course: CourseId) -> Result<()> {
        if !db::student_exists(&self.conn, student)? || !db::course_exists(&self.conn, course)? {
            debug!(%student, %course, "enrollment skipped: unknown student or course");
            return Ok(());
        }
        if db::enroll_student(&self.conn, course, student)? {
            debug!(%student, %course, "student enrolled");
        }
        Ok(())
    }

    pub fn all_courses(&self) -> Result<Vec<Course>> {
        db::fetch_courses(&self.conn)
    }

    pub fn all_teachers(&self) -> Result<Vec<Teacher>> {
        db::fetch_teachers(&self.conn)
    }

    pub fn all_students(&self) -> Result<Vec<Student>> {
        db::fetch_students(&self.conn)
    }

    /// The teacher's courses in assignment order, or nothing for an
    /// unregistered teacher.
    pub fn courses_by_teacher(&self, teacher: TeacherId) -> Result<Vec<Course>> {
        if !db::teacher_exists(&self.conn, teacher)? {
            return Ok(Vec::new());
        }
        db::fetch_courses_for_teacher(&self.conn, teacher)
    }

    pub fn course(&self, id: CourseId) -> Result<Option<Course>> {
        db::fetch_course(&self.conn, id)
    }

    pub fn teacher(&self, id: TeacherId) -> Result<Option<Teacher>> {
        db::fetch_teacher(&self.conn, id)
    }

    pub fn student(&self, id: StudentId) -> Result<Option<Student>> {
        db::fetch_student(&self.conn, id)
    }
}
