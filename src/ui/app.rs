use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::models::{Course, CourseKind, Student, Teacher};
use crate::service::{CourseService, OperationResult};

use super::forms::{
    ConfirmRemoval, CourseField, CourseForm, CourseFormat, PersonForm, PersonRole, RemovalTarget,
};
use super::helpers::{
    centered_rect, course_names, course_summary, student_names, surface_error,
};
use super::screens::{CoursePicker, PickPurpose, Selection, Tab, TeacherCoursesScreen};

/// Height of the tab strip at the top of the main screen.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 4;
/// How far PageUp/PageDown move the cursor.
const PAGE_STEP: isize = 5;

const NOT_ENOUGH_FOR_ASSIGNMENT: &str =
    "Недостаточно данных: добавьте преподавателей и/или курсы.";
const NOT_ENOUGH_FOR_ENROLLMENT: &str = "Недостаточно данных: добавьте студентов и/или курсы.";

/// High-level navigation states.
enum Screen {
    Lists,
    TeacherCourses(TeacherCoursesScreen),
}

/// Fine-grained modes layered over the current screen.
enum Mode {
    Normal,
    AddingCourse(CourseForm),
    AddingPerson(PersonForm),
    PickingCourse(CoursePicker),
    ConfirmRemoval(ConfirmRemoval),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The three selections hold
/// the latest snapshots; they are refreshed after every service call so the
/// cursor positions stay valid service indices.
pub struct App {
    service: CourseService,
    courses: Selection<Course>,
    teachers: Selection<Teacher>,
    students: Selection<Student>,
    tab: Tab,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(service: CourseService) -> Result<Self> {
        let courses = Selection::new(service.all_courses()?);
        let teachers = Selection::new(service.all_teachers()?);
        let students = Selection::new(service.all_students()?);
        Ok(Self {
            service,
            courses,
            teachers,
            students,
            tab: Tab::Courses,
            screen: Screen::Lists,
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Route a key press to the active mode. Returns `true` when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingCourse(form) => self.handle_add_course(code, form)?,
            Mode::AddingPerson(form) => self.handle_add_person(code, form)?,
            Mode::PickingCourse(picker) => self.handle_pick_course(code, picker)?,
            Mode::ConfirmRemoval(confirm) => self.handle_confirm_removal(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        if matches!(self.screen, Screen::TeacherCourses(_)) {
            self.handle_teacher_courses_key(code, exit);
            return Ok(Mode::Normal);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::Right => self.switch_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left => self.switch_tab(self.tab.previous()),
            KeyCode::Char('1') => self.switch_tab(Tab::Courses),
            KeyCode::Char('2') => self.switch_tab(Tab::Teachers),
            KeyCode::Char('3') => self.switch_tab(Tab::Students),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.active_list_jump(false),
            KeyCode::End => self.active_list_jump(true),
            _ => {
                return match self.tab {
                    Tab::Courses => self.handle_courses_key(code),
                    Tab::Teachers => self.handle_teachers_key(code),
                    Tab::Students => self.handle_students_key(code),
                };
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_courses_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.clear_status();
                return Ok(Mode::AddingCourse(CourseForm::new(CourseFormat::Online)));
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.clear_status();
                return Ok(Mode::AddingCourse(CourseForm::new(CourseFormat::Offline)));
            }
            KeyCode::Char('-') | KeyCode::Delete => match self.courses.current() {
                Some(course) => {
                    let confirm = ConfirmRemoval {
                        target: RemovalTarget::Course,
                        index: self.courses.selected,
                        label: course.name.clone(),
                    };
                    self.clear_status();
                    return Ok(Mode::ConfirmRemoval(confirm));
                }
                None => self.set_status("Нет доступных курсов для удаления.", StatusKind::Error),
            },
            KeyCode::Enter => {
                if let Some(course) = self.courses.current().cloned() {
                    self.open_course_link(&course);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_teachers_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingPerson(PersonForm::new(PersonRole::Teacher)));
            }
            KeyCode::Char('-') | KeyCode::Delete => match self.teachers.current() {
                Some(teacher) => {
                    let confirm = ConfirmRemoval {
                        target: RemovalTarget::Teacher,
                        index: self.teachers.selected,
                        label: teacher.name.clone(),
                    };
                    self.clear_status();
                    return Ok(Mode::ConfirmRemoval(confirm));
                }
                None => self.set_status("Нет доступных преподавателей.", StatusKind::Error),
            },
            KeyCode::Char('a') | KeyCode::Char('A') => {
                match self.teachers.current() {
                    Some(teacher) if !self.courses.is_empty() => {
                        let purpose = PickPurpose::AssignTeacher {
                            teacher_index: self.teachers.selected,
                            name: teacher.name.clone(),
                        };
                        self.clear_status();
                        return Ok(Mode::PickingCourse(CoursePicker::new(
                            purpose,
                            self.courses.items.clone(),
                        )));
                    }
                    _ => self.set_status(NOT_ENOUGH_FOR_ASSIGNMENT, StatusKind::Error),
                }
            }
            KeyCode::Enter => {
                if let Some(teacher) = self.teachers.current().cloned() {
                    let courses = self.service.courses_by_teacher(teacher.id)?;
                    self.clear_status();
                    self.screen = Screen::TeacherCourses(TeacherCoursesScreen::new(teacher, courses));
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_students_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingPerson(PersonForm::new(PersonRole::Student)));
            }
            KeyCode::Char('-') | KeyCode::Delete => match self.students.current() {
                Some(student) => {
                    let confirm = ConfirmRemoval {
                        target: RemovalTarget::Student,
                        index: self.students.selected,
                        label: student.name.clone(),
                    };
                    self.clear_status();
                    return Ok(Mode::ConfirmRemoval(confirm));
                }
                None => self.set_status("Нет доступных студентов.", StatusKind::Error),
            },
            KeyCode::Char('e') | KeyCode::Char('E') => match self.students.current() {
                Some(student) if !self.courses.is_empty() => {
                    let purpose = PickPurpose::EnrollStudent {
                        student_index: self.students.selected,
                        name: student.name.clone(),
                    };
                    self.clear_status();
                    return Ok(Mode::PickingCourse(CoursePicker::new(
                        purpose,
                        self.courses.items.clone(),
                    )));
                }
                _ => self.set_status(NOT_ENOUGH_FOR_ENROLLMENT, StatusKind::Error),
            },
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_teacher_courses_key(&mut self, code: KeyCode, exit: &mut bool) {
        let Screen::TeacherCourses(view) = &mut self.screen else {
            return;
        };

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                self.screen = Screen::Lists;
                self.clear_status();
            }
            KeyCode::Up => view.courses.move_selection(-1),
            KeyCode::Down => view.courses.move_selection(1),
            KeyCode::Home => view.courses.select_first(),
            KeyCode::End => view.courses.select_last(),
            KeyCode::Enter => {
                let course = view.courses.current().cloned();
                if let Some(course) = course {
                    self.open_course_link(&course);
                }
            }
            _ => {}
        }
    }

    fn handle_add_course(&mut self, code: KeyCode, mut form: CourseForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Создание курса отменено.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let result = match form.format {
                    CourseFormat::Online => self.service.create_online_course(&form.name, &form.detail),
                    CourseFormat::Offline => {
                        self.service.create_offline_course(&form.name, &form.detail)
                    }
                };
                self.report(&result);
                if result.is_success() {
                    self.reload()?;
                    self.tab = Tab::Courses;
                    self.courses.select_last();
                    return Ok(Mode::Normal);
                }
                form.error = Some(result.message().to_string());
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingCourse(form))
    }

    fn handle_add_person(&mut self, code: KeyCode, mut form: PersonForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Добавление отменено.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let result = match form.role {
                    PersonRole::Teacher => self.service.add_teacher(&form.name),
                    PersonRole::Student => self.service.add_student(&form.name),
                };
                self.report(&result);
                if result.is_success() {
                    self.reload()?;
                    match form.role {
                        PersonRole::Teacher => self.teachers.select_last(),
                        PersonRole::Student => self.students.select_last(),
                    }
                    return Ok(Mode::Normal);
                }
                form.error = Some(result.message().to_string());
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingPerson(form))
    }

    fn handle_pick_course(&mut self, code: KeyCode, mut picker: CoursePicker) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Действие отменено.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Up => picker.courses.move_selection(-1),
            KeyCode::Down => picker.courses.move_selection(1),
            KeyCode::Home => picker.courses.select_first(),
            KeyCode::End => picker.courses.select_last(),
            KeyCode::Enter => {
                let course_index = picker.courses.selected;
                let result = match picker.purpose {
                    PickPurpose::AssignTeacher { teacher_index, .. } => self
                        .service
                        .assign_teacher_to_course(teacher_index, course_index),
                    PickPurpose::EnrollStudent { student_index, .. } => self
                        .service
                        .enroll_student_in_course(student_index, course_index),
                };
                self.report(&result);
                self.reload()?;
                return Ok(Mode::Normal);
            }
            _ => {}
        }
        Ok(Mode::PickingCourse(picker))
    }

    fn handle_confirm_removal(&mut self, code: KeyCode, confirm: ConfirmRemoval) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Удаление отменено.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let result = match confirm.target {
                    RemovalTarget::Course => self.service.remove_course(confirm.index),
                    RemovalTarget::Teacher => self.service.remove_teacher(confirm.index),
                    RemovalTarget::Student => self.service.remove_student(confirm.index),
                };
                self.report(&result);
                self.reload()?;
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmRemoval(confirm)),
        }
    }

    /// Refresh every snapshot after a mutation. The teacher drill-down follows
    /// its teacher, or closes if the teacher is gone.
    fn reload(&mut self) -> Result<()> {
        self.courses.set_items(self.service.all_courses()?);
        self.teachers.set_items(self.service.all_teachers()?);
        self.students.set_items(self.service.all_students()?);

        if let Screen::TeacherCourses(view) = &mut self.screen {
            let refreshed = self
                .teachers
                .items
                .iter()
                .find(|teacher| teacher.id == view.teacher.id)
                .cloned();
            match refreshed {
                Some(teacher) => {
                    view.courses
                        .set_items(self.service.courses_by_teacher(teacher.id)?);
                    view.teacher = teacher;
                }
                None => self.screen = Screen::Lists,
            }
        }
        Ok(())
    }

    fn open_course_link(&mut self, course: &Course) {
        let CourseKind::Online { platform_url } = &course.kind else {
            self.set_status("У оффлайн-курса нет ссылки.", StatusKind::Error);
            return;
        };
        match open_link(platform_url) {
            Ok(()) => self.set_status(format!("Открыт {platform_url}"), StatusKind::Info),
            Err(err) => {
                debug!(url = %platform_url, error = %err, "failed to open platform link");
                let message = surface_error(&anyhow::Error::from(err));
                self.set_status(
                    format!("Не удалось открыть ссылку: {message}"),
                    StatusKind::Error,
                );
            }
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.clear_status();
    }

    fn move_selection(&mut self, offset: isize) {
        match self.tab {
            Tab::Courses => self.courses.move_selection(offset),
            Tab::Teachers => self.teachers.move_selection(offset),
            Tab::Students => self.students.move_selection(offset),
        }
    }

    fn active_list_jump(&mut self, to_last: bool) {
        match (self.tab, to_last) {
            (Tab::Courses, false) => self.courses.select_first(),
            (Tab::Courses, true) => self.courses.select_last(),
            (Tab::Teachers, false) => self.teachers.select_first(),
            (Tab::Teachers, true) => self.teachers.select_last(),
            (Tab::Students, false) => self.students.select_first(),
            (Tab::Students, true) => self.students.select_last(),
        }
    }

    fn report(&mut self, result: &OperationResult) {
        let kind = if result.is_success() {
            StatusKind::Info
        } else {
            StatusKind::Error
        };
        self.set_status(result.message(), kind);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        if area.height > HEADER_HEIGHT + FOOTER_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(HEADER_HEIGHT),
                    Constraint::Min(0),
                    Constraint::Length(FOOTER_HEIGHT),
                ])
                .split(area);
            self.draw_header(frame, chunks[0]);
            self.draw_content(frame, chunks[1]);
            self.draw_footer(frame, chunks[2]);
        } else {
            self.draw_content(frame, area);
        }

        match &self.mode {
            Mode::AddingCourse(form) => self.draw_course_form(frame, area, form),
            Mode::AddingPerson(form) => self.draw_person_form(frame, area, form),
            Mode::PickingCourse(picker) => self.draw_picker(frame, area, picker),
            Mode::ConfirmRemoval(confirm) => self.draw_confirm(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Система управления курсами");
        match &self.screen {
            Screen::Lists => {
                let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
                    .select(self.tab.position())
                    .block(block)
                    .highlight_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    );
                frame.render_widget(tabs, area);
            }
            Screen::TeacherCourses(view) => {
                let title = Paragraph::new(Line::from(vec![
                    Span::raw("Курсы преподавателя "),
                    Span::styled(
                        view.teacher.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
                .block(block);
                frame.render_widget(title, area);
            }
        }
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        match &self.screen {
            Screen::Lists => match self.tab {
                Tab::Courses => self.draw_courses(frame, area),
                Tab::Teachers => self.draw_teachers(frame, area),
                Tab::Students => self.draw_students(frame, area),
            },
            Screen::TeacherCourses(view) => self.draw_teacher_courses(frame, area, view),
        }
    }

    fn draw_courses(&self, frame: &mut Frame, area: Rect) {
        if self.courses.is_empty() {
            draw_empty(
                frame,
                area,
                "Все курсы",
                "Нет доступных курсов. Нажмите 'o' или 'f', чтобы добавить.",
            );
            return;
        }

        let items = self
            .courses
            .items
            .iter()
            .enumerate()
            .map(|(idx, course)| {
                ListItem::new(vec![
                    Line::from(format!(
                        "{}. {}",
                        idx + 1,
                        course_summary(course, &self.teachers.items)
                    )),
                    secondary_line("Студенты", student_names(course, &self.students.items)),
                ])
            })
            .collect();
        render_list(frame, area, "Все курсы", items, self.courses.selected);
    }

    fn draw_teachers(&self, frame: &mut Frame, area: Rect) {
        if self.teachers.is_empty() {
            draw_empty(
                frame,
                area,
                "Преподаватели",
                "Нет доступных преподавателей. Нажмите '+', чтобы добавить.",
            );
            return;
        }

        let items = self
            .teachers
            .items
            .iter()
            .enumerate()
            .map(|(idx, teacher)| {
                ListItem::new(vec![
                    Line::from(format!("{}. {}", idx + 1, teacher.name)),
                    secondary_line("Курсы", course_names(&teacher.courses, &self.courses.items)),
                ])
            })
            .collect();
        render_list(frame, area, "Преподаватели", items, self.teachers.selected);
    }

    fn draw_students(&self, frame: &mut Frame, area: Rect) {
        if self.students.is_empty() {
            draw_empty(
                frame,
                area,
                "Студенты",
                "Нет доступных студентов. Нажмите '+', чтобы добавить.",
            );
            return;
        }

        let items = self
            .students
            .items
            .iter()
            .enumerate()
            .map(|(idx, student)| {
                ListItem::new(vec![
                    Line::from(format!("{}. {}", idx + 1, student.name)),
                    secondary_line(
                        "Курсы",
                        course_names(&student.enrolled_courses, &self.courses.items),
                    ),
                ])
            })
            .collect();
        render_list(frame, area, "Студенты", items, self.students.selected);
    }

    fn draw_teacher_courses(&self, frame: &mut Frame, area: Rect, view: &TeacherCoursesScreen) {
        if view.courses.is_empty() {
            let message = format!(
                "У преподавателя {} нет назначенных курсов.",
                view.teacher.name
            );
            draw_empty(frame, area, "Курсы", &message);
            return;
        }

        let items = view
            .courses
            .items
            .iter()
            .map(|course| {
                ListItem::new(vec![
                    Line::from(format!("- {}, {}", course.name, course.details())),
                    secondary_line("Студенты", student_names(course, &self.students.items)),
                ])
            })
            .collect();
        render_list(frame, area, "Курсы", items, view.courses.selected);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingCourse(_)) => &[
                ("[Tab]", "Поле"),
                ("[Enter]", "Сохранить"),
                ("[Esc]", "Отмена"),
            ],
            (_, Mode::AddingPerson(_)) => &[("[Enter]", "Сохранить"), ("[Esc]", "Отмена")],
            (_, Mode::PickingCourse(_)) => &[
                ("[↑↓]", "Выбор"),
                ("[Enter]", "Подтвердить"),
                ("[Esc]", "Отмена"),
            ],
            (_, Mode::ConfirmRemoval(_)) => &[("[Y]", "Удалить"), ("[N/Esc]", "Отмена")],
            (Screen::TeacherCourses(_), Mode::Normal) => &[
                ("[↑↓]", "Навигация"),
                ("[Enter]", "Открыть ссылку"),
                ("[Esc]", "Назад"),
                ("[q]", "Выход"),
            ],
            (Screen::Lists, Mode::Normal) => match self.tab {
                Tab::Courses => &[
                    ("[Tab]", "Раздел"),
                    ("[o]", "Онлайн-курс"),
                    ("[f]", "Оффлайн-курс"),
                    ("[-]", "Удалить"),
                    ("[Enter]", "Открыть ссылку"),
                    ("[q]", "Выход"),
                ],
                Tab::Teachers => &[
                    ("[Tab]", "Раздел"),
                    ("[+]", "Добавить"),
                    ("[-]", "Удалить"),
                    ("[a]", "Назначить на курс"),
                    ("[Enter]", "Курсы"),
                    ("[q]", "Выход"),
                ],
                Tab::Students => &[
                    ("[Tab]", "Раздел"),
                    ("[+]", "Добавить"),
                    ("[-]", "Удалить"),
                    ("[e]", "Записать на курс"),
                    ("[q]", "Выход"),
                ],
            },
        };

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let spans = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(format!(" {label}   ")),
                ]
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }

    fn draw_course_form(&self, frame: &mut Frame, area: Rect, form: &CourseForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(form.format.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(CourseField::Name),
            form.build_line(CourseField::Detail),
            Line::from(""),
        ];
        lines.push(form_hint(form.error.as_deref()));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (column, row) = form.cursor_offset();
        frame.set_cursor_position((inner.x + column as u16, inner.y + row));
    }

    fn draw_person_form(&self, frame: &mut Frame, area: Rect, form: &PersonForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.role.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            form.build_line(),
            Line::from(""),
            form_hint(form.error.as_deref()),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        frame.set_cursor_position((inner.x + form.cursor_offset() as u16, inner.y));
    }

    fn draw_picker(&self, frame: &mut Frame, area: Rect, picker: &CoursePicker) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let items = picker
            .courses
            .items
            .iter()
            .enumerate()
            .map(|(idx, course)| {
                ListItem::new(Line::from(format!(
                    "{}. {}",
                    idx + 1,
                    course_summary(course, &self.teachers.items)
                )))
            })
            .collect();
        render_list(
            frame,
            popup_area,
            &picker.purpose.title(),
            items,
            picker.courses.selected,
        );
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemoval) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Подтверждение удаления")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(confirm.question()),
            Line::from(confirm.consequence()),
            Line::from(""),
            Line::from(Span::styled(
                "Нажмите Y для подтверждения или N / Esc для отмены.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// Bordered list with the cursor row highlighted.
fn render_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn secondary_line(label: &str, value: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("   {label}: {value}"),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Either the pending validation error or the default key hint.
fn form_hint(error: Option<&str>) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            "Enter: сохранить, Tab: следующее поле, Esc: отмена",
            Style::default().fg(Color::Gray),
        )),
    }
}
