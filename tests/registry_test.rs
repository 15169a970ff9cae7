//! Registry behavior: duplicate suppression, silent no-ops, and edge cleanup on
//! removal.

use course_registry::{Course, CourseRegistry, Student, Teacher};

fn registry() -> CourseRegistry {
    CourseRegistry::in_memory().unwrap()
}

#[test]
fn same_course_added_twice_is_stored_once() {
    let mut registry = registry();
    let course = Course::online("Rust", "https://rust.example").unwrap();

    registry.add_course(&course).unwrap();
    registry.add_course(&course).unwrap();

    assert_eq!(registry.all_courses().unwrap().len(), 1);
}

#[test]
fn equal_names_are_distinct_entries() {
    let mut registry = registry();
    registry.add_teacher(&Teacher::new("Ivanov").unwrap()).unwrap();
    registry.add_teacher(&Teacher::new("Ivanov").unwrap()).unwrap();

    assert_eq!(registry.all_teachers().unwrap().len(), 2);
}

#[test]
fn removing_unregistered_course_changes_nothing() {
    let mut registry = registry();
    let kept = Course::offline("Math", "Room 5").unwrap();
    let teacher = Teacher::new("Dr. Brown").unwrap();
    registry.add_course(&kept).unwrap();
    registry.add_teacher(&teacher).unwrap();
    registry.assign_teacher_to_course(teacher.id, kept.id).unwrap();
    let before = registry.all_courses().unwrap();

    let stranger = Course::offline("History", "Room 7").unwrap();
    registry.remove_course(stranger.id).unwrap();

    assert_eq!(registry.all_courses().unwrap(), before);
    assert_eq!(
        registry.teacher(teacher.id).unwrap().unwrap().courses,
        vec![kept.id]
    );
}

#[test]
fn assignment_updates_both_sides() {
    let mut registry = registry();
    let course = Course::offline("Math", "Room 5").unwrap();
    let teacher = Teacher::new("Dr. Brown").unwrap();
    registry.add_course(&course).unwrap();
    registry.add_teacher(&teacher).unwrap();

    registry.assign_teacher_to_course(teacher.id, course.id).unwrap();

    let course = registry.course(course.id).unwrap().unwrap();
    let teacher = registry.teacher(teacher.id).unwrap().unwrap();
    assert_eq!(course.teacher, Some(teacher.id));
    assert_eq!(teacher.courses, vec![course.id]);
}

#[test]
fn assignment_with_unregistered_side_is_ignored() {
    let mut registry = registry();
    let course = Course::offline("Math", "Room 5").unwrap();
    let outsider = Teacher::new("Dr. Who").unwrap();
    registry.add_course(&course).unwrap();

    registry.assign_teacher_to_course(outsider.id, course.id).unwrap();

    assert_eq!(registry.course(course.id).unwrap().unwrap().teacher, None);
    assert!(registry.teacher(outsider.id).unwrap().is_none());
}

#[test]
fn removing_teacher_releases_courses() {
    let mut registry = registry();
    let course = Course::offline("Math", "Room 5").unwrap();
    let teacher = Teacher::new("Dr. Brown").unwrap();
    registry.add_course(&course).unwrap();
    registry.add_teacher(&teacher).unwrap();
    registry.assign_teacher_to_course(teacher.id, course.id).unwrap();

    registry.remove_teacher(teacher.id).unwrap();

    assert_eq!(registry.course(course.id).unwrap().unwrap().teacher, None);
    assert!(registry.teacher(teacher.id).unwrap().is_none());
    assert!(registry.courses_by_teacher(teacher.id).unwrap().is_empty());
    assert_eq!(registry.all_courses().unwrap().len(), 1);
}

#[test]
fn enrollment_updates_both_sides() {
    let mut registry = registry();
    let course = Course::online("Rust", "https://rust.example").unwrap();
    let student = Student::new("Anna").unwrap();
    registry.add_course(&course).unwrap();
    registry.add_student(&student).unwrap();

    registry.enroll_student_in_course(student.id, course.id).unwrap();
    registry.enroll_student_in_course(student.id, course.id).unwrap();

    let course = registry.course(course.id).unwrap().unwrap();
    let student = registry.student(student.id).unwrap().unwrap();
    assert_eq!(course.students, vec![student.id]);
    assert_eq!(student.enrolled_courses, vec![course.id]);
}

#[test]
fn removing_student_unenrolls_everywhere() {
    let mut registry = registry();
    let rust = Course::online("Rust", "https://rust.example").unwrap();
    let math = Course::offline("Math", "Room 5").unwrap();
    let anna = Student::new("Anna").unwrap();
    let boris = Student::new("Boris").unwrap();
    for course in [&rust, &math] {
        registry.add_course(course).unwrap();
    }
    for student in [&anna, &boris] {
        registry.add_student(student).unwrap();
        registry.enroll_student_in_course(student.id, rust.id).unwrap();
        registry.enroll_student_in_course(student.id, math.id).unwrap();
    }

    registry.remove_student(anna.id).unwrap();

    for course in registry.all_courses().unwrap() {
        assert_eq!(course.students, vec![boris.id]);
    }
    assert!(registry.student(anna.id).unwrap().is_none());
}

#[test]
fn removing_course_severs_every_edge() {
    let mut registry = registry();
    let course = Course::online("Rust", "https://rust.example").unwrap();
    let teacher = Teacher::new("Dr. Brown").unwrap();
    let student = Student::new("Anna").unwrap();
    registry.add_course(&course).unwrap();
    registry.add_teacher(&teacher).unwrap();
    registry.add_student(&student).unwrap();
    registry.assign_teacher_to_course(teacher.id, course.id).unwrap();
    registry.enroll_student_in_course(student.id, course.id).unwrap();

    registry.remove_course(course.id).unwrap();

    assert!(registry.all_courses().unwrap().is_empty());
    assert!(registry.teacher(teacher.id).unwrap().unwrap().courses.is_empty());
    assert!(registry
        .student(student.id)
        .unwrap()
        .unwrap()
        .enrolled_courses
        .is_empty());
}

#[test]
fn snapshots_are_independent() {
    let mut registry = registry();
    registry
        .add_course(&Course::online("Rust", "https://rust.example").unwrap())
        .unwrap();

    let mut snapshot = registry.all_courses().unwrap();
    snapshot.clear();
    snapshot.push(Course::offline("Ghost", "Nowhere").unwrap());

    let courses = registry.all_courses().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "Rust");
}

#[test]
fn courses_by_teacher_follow_assignment_order() {
    let mut registry = registry();
    let teacher = Teacher::new("Dr. Brown").unwrap();
    let first = Course::offline("Math", "Room 5").unwrap();
    let second = Course::online("Rust", "https://rust.example").unwrap();
    registry.add_teacher(&teacher).unwrap();
    registry.add_course(&first).unwrap();
    registry.add_course(&second).unwrap();

    registry.assign_teacher_to_course(teacher.id, second.id).unwrap();
    registry.assign_teacher_to_course(teacher.id, first.id).unwrap();

    let names: Vec<_> = registry
        .courses_by_teacher(teacher.id)
        .unwrap()
        .into_iter()
        .map(|course| course.name)
        .collect();
    assert_eq!(names, ["Rust", "Math"]);

    let stranger = Teacher::new("Dr. Who").unwrap();
    assert!(registry.courses_by_teacher(stranger.id).unwrap().is_empty());
}

#[test]
fn reassignment_moves_course_between_teachers() {
    let mut registry = registry();
    let course = Course::offline("Math", "Room 5").unwrap();
    let brown = Teacher::new("Dr. Brown").unwrap();
    let green = Teacher::new("Dr. Green").unwrap();
    registry.add_course(&course).unwrap();
    registry.add_teacher(&brown).unwrap();
    registry.add_teacher(&green).unwrap();

    registry.assign_teacher_to_course(brown.id, course.id).unwrap();
    registry.assign_teacher_to_course(green.id, course.id).unwrap();

    assert!(registry.courses_by_teacher(brown.id).unwrap().is_empty());
    assert_eq!(registry.courses_by_teacher(green.id).unwrap().len(), 1);
    assert_eq!(
        registry.course(course.id).unwrap().unwrap().teacher,
        Some(green.id)
    );
}
