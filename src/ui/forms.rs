use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Which course variant a [`CourseForm`] creates.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum CourseFormat {
    Online,
    Offline,
}

impl CourseFormat {
    pub(crate) fn title(self) -> &'static str {
        match self {
            CourseFormat::Online => "Новый онлайн-курс",
            CourseFormat::Offline => "Новый оффлайн-курс",
        }
    }

    /// Label of the variant-specific field.
    pub(crate) fn detail_label(self) -> &'static str {
        match self {
            CourseFormat::Online => "URL платформы",
            CourseFormat::Offline => "Адрес",
        }
    }
}

/// Fields available within the course form.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum CourseField {
    #[default]
    Name,
    Detail,
}

/// Form state for creating a course. Inputs are kept raw; trimming and
/// validation happen in the service.
#[derive(Clone, Debug)]
pub(crate) struct CourseForm {
    pub(crate) format: CourseFormat,
    pub(crate) name: String,
    pub(crate) detail: String,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

impl CourseForm {
    pub(crate) fn new(format: CourseFormat) -> Self {
        Self {
            format,
            name: String::new(),
            detail: String::new(),
            active: CourseField::Name,
            error: None,
        }
    }

    /// Swap focus between the name and detail fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CourseField::Name => CourseField::Detail,
            CourseField::Detail => CourseField::Name,
        };
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            CourseField::Name => self.name.push(ch),
            CourseField::Detail => self.detail.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            CourseField::Name => {
                self.name.pop();
            }
            CourseField::Detail => {
                self.detail.pop();
            }
        }
    }

    pub(crate) fn name_label(&self) -> &'static str {
        "Название"
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: CourseField) -> Line<'static> {
        let (label, value) = match field {
            CourseField::Name => (self.name_label(), &self.name),
            CourseField::Detail => (self.format.detail_label(), &self.detail),
        };
        field_line(label, value, self.active == field)
    }

    /// Column at which the cursor sits for the active field.
    pub(crate) fn cursor_offset(&self) -> (usize, u16) {
        match self.active {
            CourseField::Name => (
                prefix_width(self.name_label()) + self.name.chars().count(),
                0,
            ),
            CourseField::Detail => (
                prefix_width(self.format.detail_label()) + self.detail.chars().count(),
                1,
            ),
        }
    }
}

/// Which registry collection a [`PersonForm`] adds to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum PersonRole {
    Teacher,
    Student,
}

impl PersonRole {
    pub(crate) fn title(self) -> &'static str {
        match self {
            PersonRole::Teacher => "Новый преподаватель",
            PersonRole::Student => "Новый студент",
        }
    }
}

/// Single-field form used for both teachers and students.
#[derive(Clone, Debug)]
pub(crate) struct PersonForm {
    pub(crate) role: PersonRole,
    pub(crate) name: String,
    pub(crate) error: Option<String>,
}

impl PersonForm {
    pub(crate) const NAME_LABEL: &'static str = "Имя";

    pub(crate) fn new(role: PersonRole) -> Self {
        Self {
            role,
            name: String::new(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.name.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.name.pop();
    }

    pub(crate) fn build_line(&self) -> Line<'static> {
        field_line(Self::NAME_LABEL, &self.name, true)
    }

    pub(crate) fn cursor_offset(&self) -> usize {
        prefix_width(Self::NAME_LABEL) + self.name.chars().count()
    }
}

/// What a confirmation dialog is about to remove.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum RemovalTarget {
    Course,
    Teacher,
    Student,
}

/// Pending removal awaiting a yes/no answer. `index` is the position in the
/// snapshot shown when the dialog opened.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmRemoval {
    pub(crate) target: RemovalTarget,
    pub(crate) index: usize,
    pub(crate) label: String,
}

impl ConfirmRemoval {
    pub(crate) fn question(&self) -> String {
        match self.target {
            RemovalTarget::Course => format!("Удалить курс '{}'?", self.label),
            RemovalTarget::Teacher => format!("Удалить преподавателя '{}'?", self.label),
            RemovalTarget::Student => format!("Удалить студента '{}'?", self.label),
        }
    }

    /// Explains which associations the removal severs.
    pub(crate) fn consequence(&self) -> &'static str {
        match self.target {
            RemovalTarget::Course => "Все студенты будут отписаны, преподаватель освобожден.",
            RemovalTarget::Teacher => "Курсы преподавателя останутся без преподавателя.",
            RemovalTarget::Student => "Студент будет отписан от всех курсов.",
        }
    }
}

fn prefix_width(label: &str) -> usize {
    label.chars().count() + ": ".len()
}

/// Shared rendering for a `label: value` input line with focus highlighting.
fn field_line(label: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        "<обязательно>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}
