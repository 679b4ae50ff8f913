use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;

/// Friendly one-line notice ("👋 ...")
#[derive(Default)]
pub struct Message;

pub struct MessageProps<'a> {
    pub text: &'a str,
}

impl Component<Action> for Message {
    type Props<'a> = MessageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let paragraph = Paragraph::new(format!("👋 {}", props.text))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
