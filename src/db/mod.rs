//! Storage module split across logical submodules.

mod connection;
mod courses;
mod students;
mod teachers;

pub use connection::open_in_memory;
pub use courses::{
    course_exists, delete_course, enroll_student, fetch_course, fetch_courses,
    fetch_courses_for_teacher, insert_course, unenroll_student,
};
pub use students::{delete_student, fetch_student, fetch_students, insert_student, student_exists};
pub use teachers::{
    assign_course, delete_teacher, fetch_teacher, fetch_teachers, insert_teacher, teacher_exists,
    unassign_course,
};
