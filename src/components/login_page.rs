use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::state::{LoginField, LoginState};

pub const REJECTED_HINT: &str = "Wrong email or password";

/// Email + password form for the demo account
pub struct LoginPage {
    email: TextInput,
    password: TextInput,
}

pub struct LoginPageProps<'a> {
    pub login: &'a LoginState,
    pub is_focused: bool,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            email: TextInput::new(),
            password: TextInput::new(),
        }
    }
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
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
}

fn masked(value: &str) -> String {
    "•".repeat(value.chars().count())
}

impl Component<Action> for LoginPage {
    type Props<'a> = LoginPageProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::NavigateBack],
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                return vec![Action::LoginFieldNext];
            }
            _ => {}
        }

        let login = props.login;
        match login.field {
            LoginField::Email => {
                let input_props = TextInputProps {
                    value: &login.email,
                    placeholder: "Email address",
                    is_focused: true,
                    style: Self::input_style(true),
                    on_change: Action::LoginEmailChange,
                    on_submit: |_| Action::LoginSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.email.handle_event(event, input_props).into_iter().collect()
            }
            LoginField::Password => {
                let input_props = TextInputProps {
                    value: &login.password,
                    placeholder: "Password",
                    is_focused: true,
                    style: Self::input_style(true),
                    on_change: Action::LoginPasswordChange,
                    on_submit: |_| Action::LoginSubmit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.password
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let login = props.login;
        let outer = centered_rect(50, 13, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" 🌍 WorldWise · Login ");
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Email label
            Constraint::Length(1), // Email input
            Constraint::Length(1),
            Constraint::Length(1), // Password label
            Constraint::Length(1), // Password input
            Constraint::Length(1),
            Constraint::Length(1), // Rejected hint
            Constraint::Min(1),    // Key hints
        ])
        .margin(1)
        .split(inner);

        let label = Style::default().add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Line::styled("Email address", label)), chunks[0]);
        frame.render_widget(Paragraph::new(Line::styled("Password", label)), chunks[3]);

        let email_active = login.field == LoginField::Email;
        self.email.render(
            frame,
            chunks[1],
            TextInputProps {
                value: &login.email,
                placeholder: "Email address",
                is_focused: props.is_focused && email_active,
                style: Self::input_style(email_active),
                on_change: Action::LoginEmailChange,
                on_submit: |_| Action::LoginSubmit,
                on_cursor_move: Some(|_| Action::Render),
            },
        );

        let hidden = masked(&login.password);
        self.password.render(
            frame,
            chunks[4],
            TextInputProps {
                value: &hidden,
                placeholder: "Password",
                is_focused: props.is_focused && !email_active,
                style: Self::input_style(!email_active),
                on_change: Action::LoginPasswordChange,
                on_submit: |_| Action::LoginSubmit,
                on_cursor_move: Some(|_| Action::Render),
            },
        );

        if login.rejected {
            frame.render_widget(
                Paragraph::new(Line::styled(REJECTED_HINT, Style::default().fg(Color::Red))),
                chunks[6],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::styled(
                "[Enter] Login  [Tab] Next field  [Esc] Back",
                Style::default().fg(Color::DarkGray),
            )),
            chunks[7],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(login: &LoginState, code: KeyCode) -> Vec<Action> {
        let mut page = LoginPage::new();
        let props = LoginPageProps {
            login,
            is_focused: true,
        };
        page.handle_event(
            &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            props,
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tab_switches_field() {
        press(&LoginState::default(), KeyCode::Tab).assert_first(Action::LoginFieldNext);
    }

    #[test]
    fn test_esc_goes_back() {
        press(&LoginState::default(), KeyCode::Esc).assert_first(Action::NavigateBack);
    }

    #[test]
    fn test_password_is_masked_and_rejection_shown() {
        let login = LoginState {
            rejected: true,
            ..Default::default()
        };
        let mut page = LoginPage::new();
        let mut render = RenderHarness::new(60, 20);

        let output = render.render_to_string_plain(|frame| {
            page.render(
                frame,
                frame.area(),
                LoginPageProps {
                    login: &login,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("jack@example.com"));
        assert!(!output.contains("qwerty"));
        assert!(output.contains(REJECTED_HINT));
    }
}
