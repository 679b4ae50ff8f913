use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle,
};

use super::{Component, Message, MessageProps, Spinner, SpinnerProps};
use crate::action::Action;
use crate::cities::{CitiesState, City, format_visit_date};
use crate::route;

pub const EMPTY_LIST_MESSAGE: &str = "Add your first city by clicking on a city on the map";

/// Visited cities, newest last; the current city is marked
pub struct CityList {
    list: SelectList,
}

pub struct CityListProps<'a> {
    pub cities: &'a CitiesState,
    pub selected: usize,
    pub tick: u32,
    pub is_focused: bool,
}

impl Default for CityList {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
        }
    }
}

impl CityList {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(cities: &CitiesState) -> Vec<Line<'static>> {
        cities
            .cities
            .iter()
            .map(|city| city_line(city, cities.is_current(&city.id)))
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

fn city_line(city: &City, is_current: bool) -> Line<'static> {
    let marker = if is_current { "▌" } else { " " };
    let name_style = if is_current {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::raw(format!("{} ", city.emoji)),
        Span::styled(city.city_name.clone(), name_style),
        Span::styled(
            format!("  ({})", format_visit_date(&city.date)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

impl Component<Action> for CityList {
    type Props<'a> = CityListProps<'a>;

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
        let Some(city) = props.cities.cities.get(props.selected) else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Enter => vec![Action::Navigate(route::city_url(city))],
            KeyCode::Char('d') | KeyCode::Delete => vec![Action::CityDelete(city.id.clone())],
            _ => {
                let items = Self::items(props.cities);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: Action::CitySelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
        }
    }

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
        if let Some(error) = cities.error.as_deref() {
            Message.render(frame, area, MessageProps { text: error });
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

        let items = Self::items(cities);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected,
            is_focused: props.is_focused,
            style: Self::list_style(),
            behavior: SelectListBehavior::default(),
            on_select: Action::CitySelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, list_props);
    }
}
