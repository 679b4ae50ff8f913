use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    CityDetail, CityDetailProps, CityForm, CityFormProps, CityList, CityListProps, Component,
    CountryList, CountryListProps, MapView, MapViewProps, UserBadge, UserBadgeProps,
};
use crate::action::Action;
use crate::route::{self, Route};
use crate::state::{AppState, Pane};

const BADGE_WIDTH: u16 = 36;

/// The protected layout: sidebar with the nested page, map on the right.
///
/// Renders nothing and ignores input without a session.
#[derive(Default)]
pub struct AppShell {
    city_list: CityList,
    city_form: CityForm,
}

pub struct AppShellProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_sidebar_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        match state.route() {
            Route::Cities => self
                .city_list
                .handle_event(
                    event,
                    CityListProps {
                        cities: &state.cities,
                        selected: state.list_selected,
                        tick: state.tick_count,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            Route::Form => self
                .city_form
                .handle_event(
                    event,
                    CityFormProps {
                        form: &state.form,
                        tick: state.tick_count,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn render_sidebar(&mut self, frame: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Logo
            Constraint::Length(1),
            Constraint::Length(1), // Tabs
            Constraint::Length(1),
            Constraint::Min(1),    // Nested page
            Constraint::Length(1), // Footer
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "🌍 WorldWise",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            chunks[0],
        );

        let route = state.route();
        let tab = |label: &'static str, active: bool| {
            if active {
                Span::styled(
                    label,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(Color::Gray))
            }
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                tab(" [1] Cities ", matches!(route, Route::Cities | Route::City { .. })),
                Span::raw("  "),
                tab(" [2] Countries ", route == Route::Countries),
            ]))
            .centered(),
            chunks[2],
        );

        let page = chunks[4];
        let tick = state.tick_count;
        match route {
            Route::Cities => self.city_list.render(
                frame,
                page,
                CityListProps {
                    cities: &state.cities,
                    selected: state.list_selected,
                    tick,
                    is_focused: focused,
                },
            ),
            Route::City { id } => CityDetail.render(
                frame,
                page,
                CityDetailProps {
                    city: state
                        .cities
                        .current_city
                        .as_ref()
                        .filter(|city| city.id == id),
                    is_loading: state.cities.is_loading,
                    error: state.cities.error.as_deref(),
                    tick,
                },
            ),
            Route::Countries => CountryList.render(
                frame,
                page,
                CountryListProps {
                    cities: &state.cities,
                    tick,
                },
            ),
            Route::Form => self.city_form.render(
                frame,
                page,
                CityFormProps {
                    form: &state.form,
                    tick,
                    is_focused: focused,
                },
            ),
            _ => {}
        }

        let year = state.today.get(..4).unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!("© Copyright {year} by WorldWise Inc."),
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
            chunks[5],
        );
    }

    fn render_status_bar(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = match state.focus {
            Pane::Sidebar => vec![
                StatusBarHint::new("Tab", "map"),
                StatusBarHint::new("1/2", "cities/countries"),
                StatusBarHint::new("r", "refresh"),
                StatusBarHint::new("d", "delete"),
                StatusBarHint::new("Esc", "back"),
                StatusBarHint::new("L", "logout"),
            ],
            Pane::Map => vec![
                StatusBarHint::new("Tab", "sidebar"),
                StatusBarHint::new("←↑↓→", "move"),
                StatusBarHint::new("+/-", "zoom"),
                StatusBarHint::new("Enter", "add city"),
                StatusBarHint::new("L", "logout"),
            ],
        };

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

impl Component<Action> for AppShell {
    type Props<'a> = AppShellProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if !props.is_focused || !state.auth.is_authenticated() {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Tab => return vec![Action::UiFocusNext],
            KeyCode::Esc => return vec![Action::NavigateBack],
            _ => {}
        }

        if state.focus == Pane::Map {
            return match key.code {
                KeyCode::Char('L') => vec![Action::AuthLogout],
                KeyCode::Char('q') => vec![Action::Quit],
                _ => MapView
                    .handle_event(
                        event,
                        MapViewProps {
                            cities: &state.cities.cities,
                            current_id: state.cities.current_city_id(),
                            map: &state.map,
                            is_focused: true,
                        },
                    )
                    .into_iter()
                    .collect(),
            };
        }

        // The form owns every other key while it is open
        if state.route() == Route::Form {
            return self.handle_sidebar_event(event, state);
        }

        match key.code {
            KeyCode::Char('1') => vec![Action::Navigate(route::CITIES.to_string())],
            KeyCode::Char('2') => vec![Action::Navigate(route::COUNTRIES.to_string())],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::CitiesFetch],
            KeyCode::Char('L') => vec![Action::AuthLogout],
            KeyCode::Char('q') => vec![Action::Quit],
            _ => self.handle_sidebar_event(event, state),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        if !state.auth.is_authenticated() {
            return;
        }

        let [main, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let [sidebar, map_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Min(20)]).areas(main);

        let sidebar_focused = props.is_focused && state.focus == Pane::Sidebar;
        self.render_sidebar(frame, sidebar, state, sidebar_focused);

        MapView.render(
            frame,
            map_area,
            MapViewProps {
                cities: &state.cities.cities,
                current_id: state.cities.current_city_id(),
                map: &state.map,
                is_focused: props.is_focused && state.focus == Pane::Map,
            },
        );

        let badge_width = BADGE_WIDTH.min(map_area.width.saturating_sub(2));
        let badge = Rect {
            x: map_area.right().saturating_sub(badge_width + 1),
            y: map_area.y + 1,
            width: badge_width,
            height: 3.min(map_area.height),
        };
        frame.render_widget(Clear, badge);
        UserBadge.render(frame, badge, UserBadgeProps { auth: &state.auth });

        self.render_status_bar(frame, status, state);
    }
}
