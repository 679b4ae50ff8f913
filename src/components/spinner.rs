use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Tick-driven loading indicator
#[derive(Default)]
pub struct Spinner;

pub struct SpinnerProps<'a> {
    pub tick: u32,
    pub label: &'a str,
}

pub fn spinner_frame(tick: u32) -> &'static str {
    FRAMES[tick as usize % FRAMES.len()]
}

impl Component<Action> for Spinner {
    type Props<'a> = SpinnerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let text = format!("{} {}", spinner_frame(props.tick), props.label);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
