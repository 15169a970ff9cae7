use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::{Course, CourseId, Student, Teacher};

/// Placeholder shown when a course has no teacher.
const NO_TEACHER: &str = "Нет";

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Name of the course's teacher looked up in the current teacher snapshot.
pub(crate) fn teacher_name<'a>(course: &Course, teachers: &'a [Teacher]) -> &'a str {
    course
        .teacher
        .and_then(|id| teachers.iter().find(|teacher| teacher.id == id))
        .map(|teacher| teacher.name.as_str())
        .unwrap_or(NO_TEACHER)
}

/// Comma-separated names of the students enrolled in `course`, in enrollment
/// order.
pub(crate) fn student_names(course: &Course, students: &[Student]) -> String {
    course
        .students
        .iter()
        .filter_map(|id| students.iter().find(|student| student.id == *id))
        .map(|student| student.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary line for a course in the main listing.
pub(crate) fn course_summary(course: &Course, teachers: &[Teacher]) -> String {
    format!(
        "{}, Преподаватель: {}, {}",
        course.name,
        teacher_name(course, teachers),
        course.details()
    )
}

/// Names of the courses with the given ids, skipping ids no longer present.
pub(crate) fn course_names<'a, I>(ids: I, courses: &[Course]) -> String
where
    I: IntoIterator<Item = &'a CourseId>,
{
    ids.into_iter()
        .filter_map(|id| courses.iter().find(|course| course.id == *id))
        .map(|course| course.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
