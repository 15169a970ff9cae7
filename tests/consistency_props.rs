//! Property tests over random registry operation sequences.
//!
//! Entities are drawn from small fixed pools so that operations frequently
//! hit registered, unregistered and already-linked entities alike. After every
//! sequence the stored edges must be mirrored on both sides and may only
//! reference registered entities.

use std::collections::HashSet;

use course_registry::{Course, CourseRegistry, Student, Teacher};
use proptest::prelude::*;

const POOL: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    AddCourse(usize),
    AddTeacher(usize),
    AddStudent(usize),
    RemoveCourse(usize),
    RemoveTeacher(usize),
    RemoveStudent(usize),
    Assign { teacher: usize, course: usize },
    Enroll { student: usize, course: usize },
}

struct Pools {
    courses: Vec<Course>,
    teachers: Vec<Teacher>,
    students: Vec<Student>,
}

impl Pools {
    fn new() -> Self {
        Self {
            courses: (0..POOL)
                .map(|i| {
                    let name = format!("Course {i}");
                    let course = if i % 2 == 0 {
                        Course::online(&name, "https://platform.example")
                    } else {
                        Course::offline(&name, "Room 1")
                    };
                    course.unwrap()
                })
                .collect(),
            teachers: (0..POOL)
                .map(|i| Teacher::new(&format!("Teacher {i}")).unwrap())
                .collect(),
            students: (0..POOL)
                .map(|i| Student::new(&format!("Student {i}")).unwrap())
                .collect(),
        }
    }

    fn apply(&self, registry: &mut CourseRegistry, op: &Op) {
        match *op {
            Op::AddCourse(i) => registry.add_course(&self.courses[i]).unwrap(),
            Op::AddTeacher(i) => registry.add_teacher(&self.teachers[i]).unwrap(),
            Op::AddStudent(i) => registry.add_student(&self.students[i]).unwrap(),
            Op::RemoveCourse(i) => registry.remove_course(self.courses[i].id).unwrap(),
            Op::RemoveTeacher(i) => registry.remove_teacher(self.teachers[i].id).unwrap(),
            Op::RemoveStudent(i) => registry.remove_student(self.students[i].id).unwrap(),
            Op::Assign { teacher, course } => registry
                .assign_teacher_to_course(self.teachers[teacher].id, self.courses[course].id)
                .unwrap(),
            Op::Enroll { student, course } => registry
                .enroll_student_in_course(self.students[student].id, self.courses[course].id)
                .unwrap(),
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let idx = 0..POOL;
    prop_oneof![
        3 => idx.clone().prop_map(Op::AddCourse),
        2 => idx.clone().prop_map(Op::AddTeacher),
        2 => idx.clone().prop_map(Op::AddStudent),
        1 => idx.clone().prop_map(Op::RemoveCourse),
        1 => idx.clone().prop_map(Op::RemoveTeacher),
        1 => idx.clone().prop_map(Op::RemoveStudent),
        3 => (idx.clone(), idx.clone())
            .prop_map(|(teacher, course)| Op::Assign { teacher, course }),
        3 => (idx.clone(), idx).prop_map(|(student, course)| Op::Enroll { student, course }),
    ]
}

fn assert_consistent(registry: &CourseRegistry) {
    let courses = registry.all_courses().unwrap();
    let teachers = registry.all_teachers().unwrap();
    let students = registry.all_students().unwrap();

    let course_ids: HashSet<_> = courses.iter().map(|course| course.id).collect();
    let teacher_ids: HashSet<_> = teachers.iter().map(|teacher| teacher.id).collect();
    let student_ids: HashSet<_> = students.iter().map(|student| student.id).collect();

    for course in &courses {
        if let Some(teacher_id) = course.teacher {
            assert!(teacher_ids.contains(&teacher_id));
            let teacher = teachers.iter().find(|t| t.id == teacher_id).unwrap();
            assert!(teacher.courses.contains(&course.id));
        }
        let unique: HashSet<_> = course.students.iter().collect();
        assert_eq!(unique.len(), course.students.len());
        for student_id in &course.students {
            assert!(student_ids.contains(student_id));
            let student = students.iter().find(|s| s.id == *student_id).unwrap();
            assert!(student.enrolled_courses.contains(&course.id));
        }
    }

    for teacher in &teachers {
        for course_id in &teacher.courses {
            assert!(course_ids.contains(course_id));
            let course = courses.iter().find(|c| c.id == *course_id).unwrap();
            assert_eq!(course.teacher, Some(teacher.id));
        }
    }

    for student in &students {
        for course_id in &student.enrolled_courses {
            assert!(course_ids.contains(course_id));
            let course = courses.iter().find(|c| c.id == *course_id).unwrap();
            assert!(course.students.contains(&student.id));
        }
    }
}

proptest! {
    /// Every edge is mirrored and points at registered entities, whatever
    /// order adds, removals and links arrive in.
    #[test]
    fn edges_stay_symmetric(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let pools = Pools::new();
        let mut registry = CourseRegistry::in_memory().unwrap();

        for op in &ops {
            pools.apply(&mut registry, op);
        }

        assert_consistent(&registry);
    }

    /// Removing a course and re-adding the same instance brings it back with
    /// no edges.
    #[test]
    fn readded_course_starts_unlinked(
        teacher in 0..POOL,
        student in 0..POOL,
        course in 0..POOL
    ) {
        let pools = Pools::new();
        let mut registry = CourseRegistry::in_memory().unwrap();
        for op in [
            Op::AddCourse(course),
            Op::AddTeacher(teacher),
            Op::AddStudent(student),
            Op::Assign { teacher, course },
            Op::Enroll { student, course },
            Op::RemoveCourse(course),
            Op::AddCourse(course),
        ] {
            pools.apply(&mut registry, &op);
        }

        let stored = registry.course(pools.courses[course].id).unwrap().unwrap();
        prop_assert_eq!(stored.teacher, None);
        prop_assert!(stored.students.is_empty());
        assert_consistent(&registry);
    }
}
