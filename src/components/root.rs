use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
};
use tui_dispatch::EventKind;

use super::{
    AppShell, AppShellProps, Component, HomePage, HomePageProps, LoginPage, LoginPageProps,
    Message, MessageProps,
};
use crate::action::Action;
use crate::route::{self, Route};
use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "Page not found 😢  [Enter] Home";

/// Top-level router: picks the page for the current URL
#[derive(Default)]
pub struct Root {
    login: LoginPage,
    shell: AppShell,
}

pub struct RootProps<'a> {
    pub state: &'a AppState,
}

impl Root {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Root {
    type Props<'a> = RootProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if let EventKind::Key(key) = event {
            if key.kind == KeyEventKind::Release {
                return Vec::new();
            }
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return vec![Action::Quit];
            }
        }

        match state.route() {
            Route::Home => HomePage
                .handle_event(
                    event,
                    HomePageProps {
                        is_authenticated: state.auth.is_authenticated(),
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            Route::Login => self
                .login
                .handle_event(
                    event,
                    LoginPageProps {
                        login: &state.login,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            Route::NotFound => match event {
                EventKind::Key(key) => match key.code {
                    KeyCode::Enter | KeyCode::Esc => {
                        vec![Action::Navigate(route::ROOT.to_string())]
                    }
                    KeyCode::Char('q') => vec![Action::Quit],
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            },
            _ => self
                .shell
                .handle_event(
                    event,
                    AppShellProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match state.route() {
            Route::Home => HomePage.render(
                frame,
                area,
                HomePageProps {
                    is_authenticated: state.auth.is_authenticated(),
                    is_focused: true,
                },
            ),
            Route::Login => self.login.render(
                frame,
                area,
                LoginPageProps {
                    login: &state.login,
                    is_focused: true,
                },
            ),
            Route::NotFound => {
                let [line] = Layout::vertical([Constraint::Length(1)])
                    .flex(Flex::Center)
                    .areas(area);
                Message.render(
                    frame,
                    line,
                    MessageProps {
                        text: NOT_FOUND_MESSAGE,
                    },
                );
            }
            _ => self.shell.render(
                frame,
                area,
                AppShellProps {
                    state,
                    is_focused: true,
                },
            ),
        }
    }
}
