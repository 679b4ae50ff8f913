use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::route;

/// Landing page
#[derive(Default)]
pub struct HomePage;

pub struct HomePageProps {
    pub is_authenticated: bool,
    pub is_focused: bool,
}

impl Component<Action> for HomePage {
    type Props<'a> = HomePageProps;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let target = if props.is_authenticated {
                        route::APP
                    } else {
                        route::LOGIN
                    };
                    Some(Action::Navigate(target.to_string()))
                }
                KeyCode::Char('l') => Some(Action::Navigate(route::LOGIN.to_string())),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [content] = Layout::vertical([Constraint::Length(12)])
            .flex(Flex::Center)
            .areas(area);

        let cta = if props.is_authenticated {
            "[Enter] Continue your journey"
        } else {
            "[Enter] Start tracking now"
        };

        let lines = vec![
            Line::from(Span::styled(
                "🌍 WorldWise",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "You travel the world.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "WorldWise keeps track of your adventures.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(
                "A world map that tracks your footsteps into every city you can think of. \
                 Never forget your wonderful experiences, and show your friends how you have wandered the world.",
            ),
            Line::default(),
            Line::from(Span::styled(cta, Style::default().fg(Color::Yellow))),
            Line::from(Span::styled(
                "[l] Login  [q] Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn press(is_authenticated: bool, event: KeyEvent) -> Vec<Action> {
        let props = HomePageProps {
            is_authenticated,
            is_focused: true,
        };
        HomePage
            .handle_event(&EventKind::Key(event), props)
            .into_iter()
            .collect()
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn test_cta_goes_to_login_when_logged_out() {
        press(false, enter()).assert_first(Action::Navigate(route::LOGIN.into()));
    }

    #[test]
    fn test_cta_goes_to_app_when_logged_in() {
        press(true, enter()).assert_first(Action::Navigate(route::APP.into()));
    }

    #[test]
    fn test_quit() {
        press(false, key("q")).assert_first(Action::Quit);
    }
}
