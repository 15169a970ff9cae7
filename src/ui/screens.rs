use crate::models::{Course, Teacher};

/// Tabs on the main screen, one per registry collection.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    Courses,
    Teachers,
    Students,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Courses, Tab::Teachers, Tab::Students];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Courses => "Курсы",
            Tab::Teachers => "Преподаватели",
            Tab::Students => "Студенты",
        }
    }

    pub(crate) fn position(self) -> usize {
        match self {
            Tab::Courses => 0,
            Tab::Teachers => 1,
            Tab::Students => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub(crate) fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Cursor over a snapshot list. The cursor is a plain position, which matches
/// the positional indices the service expects.
#[derive(Clone, Debug)]
pub(crate) struct Selection<T> {
    pub(crate) items: Vec<T>,
    pub(crate) selected: usize,
}

impl<T> Selection<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        let mut selection = Self { items, selected: 0 };
        selection.ensure_in_bounds();
        selection
    }

    pub(crate) fn current(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = self.selected.saturating_add_signed(offset).min(last);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    /// Replace the snapshot, keeping the cursor where it was when possible.
    pub(crate) fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.ensure_in_bounds();
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.items.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.items.len() {
            self.selected = self.items.len() - 1;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Drill-down view listing one teacher's courses.
pub(crate) struct TeacherCoursesScreen {
    pub(crate) teacher: Teacher,
    pub(crate) courses: Selection<Course>,
}

impl TeacherCoursesScreen {
    pub(crate) fn new(teacher: Teacher, courses: Vec<Course>) -> Self {
        Self {
            teacher,
            courses: Selection::new(courses),
        }
    }
}

/// What picking a course from [`CoursePicker`] will do. The person is
/// addressed by snapshot position, like every other service call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PickPurpose {
    AssignTeacher { teacher_index: usize, name: String },
    EnrollStudent { student_index: usize, name: String },
}

impl PickPurpose {
    pub(crate) fn title(&self) -> String {
        match self {
            PickPurpose::AssignTeacher { name, .. } => format!("Назначить {name} на курс"),
            PickPurpose::EnrollStudent { name, .. } => format!("Записать {name} на курс"),
        }
    }
}

/// Modal course chooser used for assignment and enrollment.
pub(crate) struct CoursePicker {
    pub(crate) purpose: PickPurpose,
    pub(crate) courses: Selection<Course>,
}

impl CoursePicker {
    pub(crate) fn new(purpose: PickPurpose, courses: Vec<Course>) -> Self {
        Self {
            purpose,
            courses: Selection::new(courses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps_movement() {
        let mut selection = Selection::new(vec!['a', 'b', 'c']);
        selection.move_selection(-3);
        assert_eq!(selection.selected, 0);
        selection.move_selection(10);
        assert_eq!(selection.current(), Some(&'c'));
        selection.select_first();
        assert_eq!(selection.current(), Some(&'a'));
    }

    #[test]
    fn shrinking_items_pulls_cursor_back() {
        let mut selection = Selection::new(vec![1, 2, 3]);
        selection.select_last();
        selection.set_items(vec![1]);
        assert_eq!(selection.selected, 0);
        selection.set_items(Vec::new());
        assert!(selection.current().is_none());
        selection.move_selection(1);
        assert_eq!(selection.selected, 0);
    }

    #[test]
    fn large_offsets_saturate_from_any_position() {
        let mut selection = Selection::new(vec![1, 2, 3]);
        selection.move_selection(1);
        selection.move_selection(isize::MAX);
        assert_eq!(selection.selected, 2);
        selection.move_selection(isize::MIN);
        assert_eq!(selection.selected, 0);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::Courses.next(), Tab::Teachers);
        assert_eq!(Tab::Students.next(), Tab::Courses);
        assert_eq!(Tab::Courses.previous(), Tab::Students);
    }
}
