use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, Message, MessageProps, Spinner, SpinnerProps};
use crate::action::Action;
use crate::geo::format_coords;
use crate::state::{FormField, FormState};

pub const PICK_A_POINT_MESSAGE: &str = "Start by clicking somewhere on the map";

/// "Add a city" form for the point picked on the map
pub struct CityForm {
    city_name: TextInput,
    date: TextInput,
    notes: TextInput,
}

pub struct CityFormProps<'a> {
    pub form: &'a FormState,
    pub tick: u32,
    pub is_focused: bool,
}

impl Default for CityForm {
    fn default() -> Self {
        Self {
            city_name: TextInput::new(),
            date: TextInput::new(),
            notes: TextInput::new(),
        }
    }
}

struct FieldBinding<'a> {
    value: &'a str,
    placeholder: &'static str,
    on_change: fn(String) -> Action,
}

fn field_binding(form: &FormState, field: FormField) -> FieldBinding<'_> {
    match field {
        FormField::CityName => FieldBinding {
            value: &form.city_name,
            placeholder: "City name",
            on_change: Action::FormCityNameChange,
        },
        FormField::Date => FieldBinding {
            value: &form.date,
            placeholder: "yyyy/mm/dd",
            on_change: Action::FormDateChange,
        },
        FormField::Notes => FieldBinding {
            value: &form.notes,
            placeholder: "Notes about your trip",
            on_change: Action::FormNotesChange,
        },
    }
}

fn input_style(is_active: bool) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(if is_active {
                Color::Rgb(60, 66, 72)
            } else {
                Color::Rgb(42, 48, 54)
            }),
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl CityForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn input(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::CityName => &mut self.city_name,
            FormField::Date => &mut self.date,
            FormField::Notes => &mut self.notes,
        }
    }

    fn render_fields(&mut self, frame: &mut Frame, area: Rect, props: &CityFormProps<'_>) {
        let form = props.form;
        let place = if form.city_name.trim().is_empty() {
            "this place".to_string()
        } else {
            form.city_name.trim().to_string()
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // Location
            Constraint::Length(1),
            Constraint::Length(1), // City label
            Constraint::Length(1), // City input
            Constraint::Length(1),
            Constraint::Length(1), // Date label
            Constraint::Length(1), // Date input
            Constraint::Length(1),
            Constraint::Length(1), // Notes label
            Constraint::Length(1), // Notes input
            Constraint::Length(1),
            Constraint::Length(1), // Validation / submitting
            Constraint::Min(1),    // Hints
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(format!("{} ", form.emoji)),
                Span::styled(
                    form.country.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_coords(form.position)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            chunks[0],
        );

        let label = Style::default().add_modifier(Modifier::BOLD);
        let rows = [
            (FormField::CityName, "City name".to_string(), chunks[2], chunks[3]),
            (
                FormField::Date,
                format!("When did you go to {place}?"),
                chunks[5],
                chunks[6],
            ),
            (
                FormField::Notes,
                format!("Notes about your trip to {place}"),
                chunks[8],
                chunks[9],
            ),
        ];
        for (field, text, label_area, input_area) in rows {
            frame.render_widget(Paragraph::new(Line::styled(text, label)), label_area);
            let binding = field_binding(form, field);
            let is_active = form.field == field;
            self.input(field).render(
                frame,
                input_area,
                TextInputProps {
                    value: binding.value,
                    placeholder: binding.placeholder,
                    is_focused: props.is_focused && is_active,
                    style: input_style(is_active),
                    on_change: binding.on_change,
                    on_submit: |_| Action::FormSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                },
            );
        }

        if form.submitting {
            Spinner.render(
                frame,
                chunks[11],
                SpinnerProps {
                    tick: props.tick,
                    label: "Saving...",
                },
            );
        } else if let Some(validation) = form.validation.as_deref() {
            frame.render_widget(
                Paragraph::new(Line::styled(validation, Style::default().fg(Color::Red))),
                chunks[11],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::styled(
                "[Enter] Add  [↑/↓] Field  [Esc] Back",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[12],
        );
    }
}

impl Component<Action> for CityForm {
    type Props<'a> = CityFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || !props.form.geocode.is_loaded() {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Up | KeyCode::BackTab => return vec![Action::FormFieldPrev],
            KeyCode::Down => return vec![Action::FormFieldNext],
            _ => {}
        }

        let field = props.form.field;
        let binding = field_binding(props.form, field);
        let input_props = TextInputProps {
            value: binding.value,
            placeholder: binding.placeholder,
            is_focused: true,
            style: input_style(true),
            on_change: binding.on_change,
            on_submit: |_| Action::FormSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input(field)
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // Loading and errors take priority over the fields
        match &props.form.geocode {
            DataResource::Loading => Spinner.render(
                frame,
                area,
                SpinnerProps {
                    tick: props.tick,
                    label: "Looking up the location...",
                },
            ),
            DataResource::Failed(message) => {
                Message.render(frame, area, MessageProps { text: message })
            }
            DataResource::Empty => Message.render(
                frame,
                area,
                MessageProps {
                    text: PICK_A_POINT_MESSAGE,
                },
            ),
            DataResource::Loaded(_) => self.render_fields(frame, area, &props),
        }
    }
}
