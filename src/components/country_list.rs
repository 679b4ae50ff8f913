use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::{Component, EMPTY_LIST_MESSAGE, Message, MessageProps, Spinner, SpinnerProps};
use crate::action::Action;
use crate::cities::{CitiesState, unique_countries};

/// Countries derived from the visited cities, one entry each
#[derive(Default)]
pub struct CountryList;

pub struct CountryListProps<'a> {
    pub cities: &'a CitiesState,
    pub tick: u32,
}

impl Component<Action> for CountryList {
    type Props<'a> = CountryListProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let cities = props.cities;
        if cities.is_loading {
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
        if cities.cities.is_empty() {
            Message.render(
                frame,
                area,
                MessageProps {
                    text: EMPTY_LIST_MESSAGE,
                },
            );
            return;
        }

        let mut spans = Vec::new();
        for city in unique_countries(&cities.cities) {
            spans.push(Span::raw(format!("{} ", city.emoji)));
            spans.push(Span::styled(
                city.country.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("   ", Style::default().fg(Color::DarkGray)));
        }

        let paragraph = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::{City, Position};
    use tui_dispatch::testing::*;

    fn city(id: &str, country: &str) -> City {
        City {
            id: id.into(),
            city_name: format!("City {id}"),
            country: country.into(),
            emoji: String::new(),
            date: String::new(),
            notes: String::new(),
            position: Position::new(1.0, 1.0),
        }
    }

    #[test]
    fn test_each_country_rendered_once() {
        let cities = CitiesState {
            cities: vec![city("1", "France"), city("2", "France"), city("3", "Spain")],
            ..Default::default()
        };
        let mut render = RenderHarness::new(60, 4);
        let output = render.render_to_string_plain(|frame| {
            CountryList.render(
                frame,
                frame.area(),
                CountryListProps {
                    cities: &cities,
                    tick: 0,
                },
            );
        });

        assert_eq!(output.matches("France").count(), 1);
        assert!(output.contains("Spain"));
    }
}
