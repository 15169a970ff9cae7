//! Validation layer in front of the registry. Every mutating call returns an
//! [`OperationResult`]; nothing here propagates an error to the caller. Course,
//! teacher and student positions are 0-based indices into the current
//! snapshot, so they must be re-read after any mutation.

use std::fmt;

use anyhow::Result;
use tracing::{info, warn};

use crate::models::{Course, Student, Teacher, TeacherId, ValidationError};
use crate::registry::CourseRegistry;

const COURSE_NAME_REQUIRED: &str = "Название курса обязательно";
const PLATFORM_URL_REQUIRED: &str = "URL платформы обязателен";
const LOCATION_REQUIRED: &str = "Адрес обязателен";
const TEACHER_NAME_REQUIRED: &str = "Имя преподавателя обязательно";
const STUDENT_NAME_REQUIRED: &str = "Имя студента обязательно";
const INVALID_TEACHER_INDEX: &str = "Неверный номер преподавателя";
const INVALID_STUDENT_INDEX: &str = "Неверный номер студента";
const INVALID_COURSE_INDEX: &str = "Неверный номер курса";

/// Outcome of a service call: a success flag plus a message meant for the
/// user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    success: bool,
    message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        let message = message.into();
        info!(%message, "operation succeeded");
        Self {
            success: true,
            message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(%message, "operation failed");
        Self {
            success: false,
            message,
        }
    }

    /// Failure carrying an unexpected error, prefixed with what was being
    /// attempted. The alternate form keeps the whole context chain.
    fn error(prefix: &str, err: impl fmt::Display) -> Self {
        Self::failure(format!("{prefix}: {err:#}"))
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Front door used by the terminal UI. Owns the registry it validates for.
pub struct CourseService {
    registry: CourseRegistry,
}

impl CourseService {
    pub fn new(registry: CourseRegistry) -> Self {
        Self { registry }
    }

    /// Read access to the wrapped registry.
    pub fn registry(&self) -> &CourseRegistry {
        &self.registry
    }

    pub fn create_online_course(&mut self, name: &str, platform_url: &str) -> OperationResult {
        if name.trim().is_empty() {
            return OperationResult::failure(COURSE_NAME_REQUIRED);
        }
        if platform_url.trim().is_empty() {
            return OperationResult::failure(PLATFORM_URL_REQUIRED);
        }

        match self.register_course(Course::online(name, platform_url)) {
            Ok(course) => OperationResult::success(format!("Онлайн-курс '{course}' создан")),
            Err(err) => OperationResult::error("Ошибка создания курса", err),
        }
    }

    pub fn create_offline_course(&mut self, name: &str, location: &str) -> OperationResult {
        if name.trim().is_empty() {
            return OperationResult::failure(COURSE_NAME_REQUIRED);
        }
        if location.trim().is_empty() {
            return OperationResult::failure(LOCATION_REQUIRED);
        }

        match self.register_course(Course::offline(name, location)) {
            Ok(course) => OperationResult::success(format!("Оффлайн-курс '{course}' создан")),
            Err(err) => OperationResult::error("Ошибка создания курса", err),
        }
    }

    fn register_course(&mut self, built: Result<Course, ValidationError>) -> Result<Course> {
        let course = built?;
        self.registry.add_course(&course)?;
        Ok(course)
    }

    pub fn add_teacher(&mut self, name: &str) -> OperationResult {
        if name.trim().is_empty() {
            return OperationResult::failure(TEACHER_NAME_REQUIRED);
        }

        let added = Teacher::new(name)
            .map_err(anyhow::Error::from)
            .and_then(|teacher| self.registry.add_teacher(&teacher).map(|()| teacher));
        match added {
            Ok(teacher) => OperationResult::success(format!("Преподаватель '{teacher}' добавлен")),
            Err(err) => OperationResult::error("Ошибка добавления преподавателя", err),
        }
    }

    pub fn add_student(&mut self, name: &str) -> OperationResult {
        if name.trim().is_empty() {
            return OperationResult::failure(STUDENT_NAME_REQUIRED);
        }

        let added = Student::new(name)
            .map_err(anyhow::Error::from)
            .and_then(|student| self.registry.add_student(&student).map(|()| student));
        match added {
            Ok(student) => OperationResult::success(format!("Студент '{student}' добавлен")),
            Err(err) => OperationResult::error("Ошибка добавления студента", err),
        }
    }

    pub fn assign_teacher_to_course(
        &mut self,
        teacher_index: usize,
        course_index: usize,
    ) -> OperationResult {
        const CONTEXT: &str = "Ошибка назначения преподавателя";

        let teachers = match self.registry.all_teachers() {
            Ok(teachers) => teachers,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };
        let courses = match self.registry.all_courses() {
            Ok(courses) => courses,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };

        let Some(teacher) = teachers.get(teacher_index) else {
            return OperationResult::failure(INVALID_TEACHER_INDEX);
        };
        let Some(course) = courses.get(course_index) else {
            return OperationResult::failure(INVALID_COURSE_INDEX);
        };

        match self.registry.assign_teacher_to_course(teacher.id, course.id) {
            Ok(()) => OperationResult::success(format!(
                "Преподаватель '{teacher}' назначен на курс '{course}'"
            )),
            Err(err) => OperationResult::error(CONTEXT, err),
        }
    }

    pub fn enroll_student_in_course(
        &mut self,
        student_index: usize,
        course_index: usize,
    ) -> OperationResult {
        const CONTEXT: &str = "Ошибка записи студента";

        let students = match self.registry.all_students() {
            Ok(students) => students,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };
        let courses = match self.registry.all_courses() {
            Ok(courses) => courses,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };

        let Some(student) = students.get(student_index) else {
            return OperationResult::failure(INVALID_STUDENT_INDEX);
        };
        let Some(course) = courses.get(course_index) else {
            return OperationResult::failure(INVALID_COURSE_INDEX);
        };

        match self.registry.enroll_student_in_course(student.id, course.id) {
            Ok(()) => OperationResult::success(format!(
                "Студент '{student}' записан на курс '{course}'"
            )),
            Err(err) => OperationResult::error(CONTEXT, err),
        }
    }

    pub fn remove_course(&mut self, course_index: usize) -> OperationResult {
        const CONTEXT: &str = "Ошибка удаления курса";

        let courses = match self.registry.all_courses() {
            Ok(courses) => courses,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };
        let Some(course) = courses.get(course_index) else {
            return OperationResult::failure(INVALID_COURSE_INDEX);
        };

        match self.registry.remove_course(course.id) {
            Ok(()) => OperationResult::success(format!("Курс '{course}' удален")),
            Err(err) => OperationResult::error(CONTEXT, err),
        }
    }

    /// Remove a teacher; their courses stay registered without a teacher.
    pub fn remove_teacher(&mut self, teacher_index: usize) -> OperationResult {
        const CONTEXT: &str = "Ошибка удаления преподавателя";

        let teachers = match self.registry.all_teachers() {
            Ok(teachers) => teachers,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };
        let Some(teacher) = teachers.get(teacher_index) else {
            return OperationResult::failure(INVALID_TEACHER_INDEX);
        };

        match self.registry.remove_teacher(teacher.id) {
            Ok(()) => OperationResult::success(format!("Преподаватель '{teacher}' удален")),
            Err(err) => OperationResult::error(CONTEXT, err),
        }
    }

    pub fn remove_student(&mut self, student_index: usize) -> OperationResult {
        const CONTEXT: &str = "Ошибка удаления студента";

        let students = match self.registry.all_students() {
            Ok(students) => students,
            Err(err) => return OperationResult::error(CONTEXT, err),
        };
        let Some(student) = students.get(student_index) else {
            return OperationResult::failure(INVALID_STUDENT_INDEX);
        };

        match self.registry.remove_student(student.id) {
            Ok(()) => OperationResult::success(format!("Студент '{student}' удален")),
            Err(err) => OperationResult::error(CONTEXT, err),
        }
    }

    pub fn all_courses(&self) -> Result<Vec<Course>> {
        self.registry.all_courses()
    }

    pub fn all_teachers(&self) -> Result<Vec<Teacher>> {
        self.registry.all_teachers()
    }

    pub fn all_students(&self) -> Result<Vec<Student>> {
        self.registry.all_students()
    }

    pub fn courses_by_teacher(&self, teacher: TeacherId) -> Result<Vec<Course>> {
        self.registry.courses_by_teacher(teacher)
    }
}
