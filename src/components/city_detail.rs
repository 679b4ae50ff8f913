use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Component, Message, MessageProps, Spinner, SpinnerProps};
use crate::action::Action;
use crate::cities::{City, format_visit_date};
use crate::geo::format_coords;

/// Details of the current city
#[derive(Default)]
pub struct CityDetail;

pub struct CityDetailProps<'a> {
    pub city: Option<&'a City>,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub tick: u32,
}

pub fn wikipedia_url(city_name: &str) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        urlencoding::encode(&city_name.replace(' ', "_"))
    )
}

fn heading(text: &str) -> Line<'static> {
    Line::styled(
        text.to_uppercase(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
}

impl Component<Action> for CityDetail {
    type Props<'a> = CityDetailProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if props.is_loading {
            Spinner.render(
                frame,
                area,
                SpinnerProps {
                    tick: props.tick,
                    label: "Loading...",
                },
            );
            return;
        }
        let Some(city) = props.city else {
            let text = props.error.unwrap_or("Pick a city from the list");
            Message.render(frame, area, MessageProps { text });
            return;
        };

        let mut lines = vec![
            heading("City name"),
            Line::from(vec![
                Span::raw(format!("{} ", city.emoji)),
                Span::styled(
                    city.city_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(format_coords(city.position), Style::default().fg(Color::Gray)),
            Line::default(),
            heading(&format!("You went to {} on", city.city_name)),
            Line::from(format_visit_date(&city.date)),
            Line::default(),
        ];

        if !city.notes.trim().is_empty() {
            lines.push(heading("Your notes"));
            lines.push(Line::from(city.notes.clone()));
            lines.push(Line::default());
        }

        lines.push(heading("Learn more"));
        lines.push(Line::styled(
            format!("Check out {} on Wikipedia →", city.city_name),
            Style::default().fg(Color::Yellow),
        ));
        lines.push(Line::styled(
            wikipedia_url(&city.city_name),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        ));
        lines.push(Line::default());
        lines.push(Line::styled(
            "[Esc] Back",
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}
