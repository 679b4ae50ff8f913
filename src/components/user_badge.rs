use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::auth::AuthState;

/// Session badge shown over the map
#[derive(Default)]
pub struct UserBadge;

pub struct UserBadgeProps<'a> {
    pub auth: &'a AuthState,
}

impl Component<Action> for UserBadge {
    type Props<'a> = UserBadgeProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = match props.auth.user() {
            Some(user) => Line::from(vec![
                Span::styled("◉ ", Style::default().fg(Color::Green)),
                Span::styled(
                    format!("Welcome, {}", user.name),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("  [L] Logout", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from("Login needed"),
        };

        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().bg(Color::Rgb(42, 48, 54)));
        frame.render_widget(paragraph, area);
    }
}
