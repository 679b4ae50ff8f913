use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::cities::City;
use crate::geo::format_coords;
use crate::state::{MapState, PanDirection};

/// Zoom level from which city names are drawn next to their markers
const LABEL_ZOOM: u8 = 3;

/// World map with the visited cities and a pick cursor
#[derive(Default)]
pub struct MapView;

pub struct MapViewProps<'a> {
    pub cities: &'a [City],
    pub current_id: Option<&'a str>,
    pub map: &'a MapState,
    pub is_focused: bool,
}

impl Component<Action> for MapView {
    type Props<'a> = MapViewProps<'a>;

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
                KeyCode::Up | KeyCode::Char('k') => Some(Action::MapPan(PanDirection::North)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::MapPan(PanDirection::South)),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::MapPan(PanDirection::West)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::MapPan(PanDirection::East)),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::MapZoomIn),
                KeyCode::Char('-') => Some(Action::MapZoomOut),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Action::MapPick),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let map = props.map;
        let ([west, east], [south, north]) = map.bounds();
        let cursor = map.cursor;

        let border = if props.is_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(
            " {} · zoom {}x{} ",
            format_coords(cursor),
            map.zoom,
            if props.is_focused {
                " · [Enter] add city"
            } else {
                ""
            }
        );

        let visited: Vec<(f64, f64)> = props
            .cities
            .iter()
            .filter(|city| Some(city.id.as_str()) != props.current_id)
            .map(|city| (city.position.lng, city.position.lat))
            .collect();
        let current: Vec<(f64, f64)> = props
            .cities
            .iter()
            .filter(|city| Some(city.id.as_str()) == props.current_id)
            .map(|city| (city.position.lng, city.position.lat))
            .collect();

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            )
            .marker(Marker::Braille)
            .x_bounds([west, east])
            .y_bounds([south, north])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::Rgb(70, 110, 90),
                    resolution: MapResolution::High,
                });
                ctx.layer();
                ctx.draw(&Points {
                    coords: &visited,
                    color: Color::Yellow,
                });
                ctx.draw(&Points {
                    coords: &current,
                    color: Color::LightGreen,
                });
                if map.zoom >= LABEL_ZOOM {
                    for city in props.cities {
                        ctx.print(
                            city.position.lng,
                            city.position.lat,
                            Span::styled(
                                format!(" {} {}", city.emoji, city.city_name),
                                Style::default().fg(Color::White),
                            ),
                        );
                    }
                }
                ctx.print(
                    cursor.lng,
                    cursor.lat,
                    Span::styled("✚", Style::default().fg(Color::Red)),
                );
            });

        frame.render_widget(canvas, area);
    }
}
