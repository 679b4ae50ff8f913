//! WorldWise - travel log TUI

use std::cell::RefCell;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventKind, EventOutcome,
    RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};
use worldwise::action::Action;
use worldwise::api::{CitiesClient, GeocodingClient};
use worldwise::components::{Component, Root, RootProps};
use worldwise::config::{Args, Config};
use worldwise::effect::Effect;
use worldwise::reducer::reducer;
use worldwise::state::AppState;

/// Backend collaborators shared by every spawned task
struct Clients {
    cities: CitiesClient,
    geocoder: GeocodingClient,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let (config, debug_args) = Args::parse().into_parts();
    if let Some(path) = config.log_file.as_deref() {
        init_logging(path)?;
    }
    tracing::info!(api = %config.api_url, start = %config.start_url, "starting worldwise");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let start_url = config.start_url.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(start_url))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, &config).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("bye");
    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file
fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    config: &Config,
) -> io::Result<DebugRunOutput<AppState>> {
    let clients = Arc::new(Clients {
        cities: CitiesClient::new(config.api_url.clone()),
        geocoder: GeocodingClient::new(config.geocode_url.clone()),
    });
    let root = Rc::new(RefCell::new(Root::new()));
    let root_events = Rc::clone(&root);
    let tick = config.tick;

    debug
        .run_effect_app(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", tick, || Action::Tick);
            },
            |frame, area, state, _render_ctx: RenderContext| {
                root.borrow_mut().render(frame, area, RootProps { state });
            },
            move |event, state| -> EventOutcome<Action> {
                if let EventKind::Resize(_, _) = event {
                    return EventOutcome::ignored().with_render();
                }
                let actions: Vec<_> = root_events
                    .borrow_mut()
                    .handle_event(event, RootProps { state })
                    .into_iter()
                    .collect();
                EventOutcome::actions(actions)
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, clients.clone()),
        )
        .await
}

/// Handle effects by spawning tasks under [`Effect::task_key`]
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, clients: Arc<Clients>) {
    let key = TaskKey::new(effect.task_key());
    match effect {
        Effect::FetchCities => {
            tracing::debug!("fetching cities");
            ctx.tasks().spawn(key, async move {
                match clients.cities.list_cities().await {
                    Ok(cities) => Action::CitiesDidLoad(cities),
                    Err(err) => {
                        tracing::warn!(error = %err, "fetching cities failed");
                        Action::CitiesDidReject("Error fetching cities".into())
                    }
                }
            });
        }
        Effect::FetchCity { id } => {
            tracing::debug!(%id, "fetching city");
            ctx.tasks().spawn(key, async move {
                match clients.cities.get_city(&id).await {
                    Ok(city) => Action::CityDidLoad(city),
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "fetching city failed");
                        Action::CitiesDidReject("Error fetching city".into())
                    }
                }
            });
        }
        Effect::CreateCity { request, draft } => {
            tracing::debug!(request, city = %draft.city_name, "creating city");
            ctx.tasks().spawn(key, async move {
                match clients.cities.create_city(&draft).await {
                    Ok(city) => Action::CityDidCreate(city),
                    Err(err) => {
                        tracing::warn!(city = %draft.city_name, error = %err, "creating city failed");
                        Action::CitiesDidReject("Error creating city".into())
                    }
                }
            });
        }
        Effect::DeleteCity { id } => {
            tracing::debug!(%id, "deleting city");
            ctx.tasks().spawn(key, async move {
                match clients.cities.delete_city(&id).await {
                    Ok(()) => Action::CityDidDelete(id),
                    Err(err) => {
                        tracing::warn!(%id, error = %err, "deleting city failed");
                        Action::CitiesDidReject("Error deleting city".into())
                    }
                }
            });
        }
        Effect::ReverseGeocode { lat, lng } => {
            tracing::debug!(lat, lng, "reverse geocoding");
            ctx.tasks().spawn(key, async move {
                match clients.geocoder.reverse_geocode(lat, lng).await {
                    Ok(place) => Action::GeocodeDidLoad { lat, lng, place },
                    Err(err) => {
                        tracing::warn!(lat, lng, error = %err, "reverse geocoding failed");
                        Action::GeocodeDidError {
                            lat,
                            lng,
                            message: err.user_message().to_string(),
                        }
                    }
                }
            });
        }
    }
}
