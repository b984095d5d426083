//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core `Action` values, and runs the
//! `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! key press ──► handle_event() ──► update() ──► Effect ──► execute_effect()
//!                                    ▲                          │ tokio::spawn
//!                                    └──── mpsc<Action> ◄───────┘ (API result)
//! ```
//!
//! ## Redraw Strategy
//!
//! While a list is loading the loop redraws every ~80ms to animate the
//! spinner. Otherwise it sleeps up to 250ms and only redraws on input or
//! when a background result arrives.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{Gender, HttpApi, MarketplaceApi, VehicleType};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::interest::InterestEdit;
use crate::core::routes::ImageKind;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CardListState, FilterField, FormEvent, InterestFormState, PickerEvent, PickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands on the card list.
    Browse,
    /// Typing into a filter box. Enter or Esc returns to Browse.
    Filter(FilterField),
}

/// The open selection overlay, if any.
pub enum ActivePicker {
    VehicleType(PickerState<Option<VehicleType>>),
    Gender(PickerState<Gender>),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub mode: InputMode,
    pub route_list: CardListState,
    pub vehicle_list: CardListState,
    pub interest: InterestFormState,
    pub picker: Option<ActivePicker>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            mode: InputMode::Browse,
            route_list: CardListState::new(),
            vehicle_list: CardListState::new(),
            interest: InterestFormState::new(),
            picker: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Lets a bare Esc arrive without waiting on an escape-sequence timeout.
        // Terminals without the protocol ignore it.
        execute!(
            stdout(),
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the HTTP client from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> std::io::Result<Arc<dyn MarketplaceApi>> {
    let api = HttpApi::new(&config.base_url, &config.session, config.timeout)
        .map_err(std::io::Error::other)?;
    info!("Using backend at {}", config.base_url);
    Ok(Arc::new(api))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = build_api(&config)?;
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // First screen fetches on entry, like every later screen switch.
    let effect = update(&mut app, Action::Reload);
    execute_effect(effect, &api, &tx);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_event(&mut app, &mut tui, event);
            if execute_effect(effect, &api, &tx) {
                should_quit = true;
                break;
            }
        }
        if should_quit {
            break;
        }

        // Results from background API calls
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            execute_effect(effect, &api, &tx);
        }
    }

    info!("Safar shutting down");
    ratatui::restore();
    Ok(())
}

/// Translate one terminal event into at most one core action.
///
/// Overlays take priority in stacking order: notice, picker, interest
/// form, image modal. Only when none is open do browse keys apply.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }

    if app.notice.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape => update(app, Action::DismissNotice),
            _ => Effect::None,
        };
    }

    if let Some(picker) = tui.picker.as_mut() {
        let Some(effect) = handle_picker(app, picker, &event) else {
            return Effect::None;
        };
        tui.picker = None;
        return effect;
    }

    if let Some(form) = app.routes.interest.form() {
        let current_gender = form.gender.unwrap_or(Gender::Male);
        let form_event = tui.interest.handle_event(&event, form);
        return match form_event {
            Some(FormEvent::Edit(edit)) => update(app, Action::EditInterest(edit)),
            Some(FormEvent::OpenGenderPicker) => {
                let options = Gender::ALL
                    .iter()
                    .map(|g| (g.label().to_string(), *g))
                    .collect();
                tui.picker = Some(ActivePicker::Gender(PickerState::new(
                    "Passenger gender",
                    options,
                    &current_gender,
                )));
                Effect::None
            }
            Some(FormEvent::Submit) => {
                let effect = update(app, Action::SubmitInterest);
                if let Some(e) = app.routes.interest.form().and_then(|f| f.field_error) {
                    tui.interest.focus = e.field();
                }
                effect
            }
            Some(FormEvent::Dismiss) => update(app, Action::CloseInterest),
            None => Effect::None,
        };
    }

    if app.routes.image.is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::InputChar('p' | 'c' | 'q') => {
                update(app, Action::CloseImage)
            }
            _ => Effect::None,
        };
    }

    if let InputMode::Filter(field) = tui.mode {
        return handle_filter_input(app, tui, field, event);
    }

    handle_browse(app, tui, event)
}

/// Returns the effect once the picker is done (selected or dismissed).
fn handle_picker(app: &mut App, picker: &mut ActivePicker, event: &TuiEvent) -> Option<Effect> {
    match picker {
        ActivePicker::VehicleType(state) => match state.handle_event(event)? {
            PickerEvent::Select(vehicle_type) => Some(update(app, Action::SetVehicleType(vehicle_type))),
            PickerEvent::Dismiss => Some(Effect::None),
        },
        ActivePicker::Gender(state) => match state.handle_event(event)? {
            PickerEvent::Select(gender) => {
                Some(update(app, Action::EditInterest(InterestEdit::Gender(gender))))
            }
            PickerEvent::Dismiss => Some(Effect::None),
        },
    }
}

fn filter_value(app: &App, field: FilterField) -> &str {
    match field {
        FilterField::Departure => &app.routes.filter.departure,
        FilterField::Destination => &app.routes.filter.destination,
        FilterField::City => &app.vehicles.filter.city,
    }
}

fn set_filter(field: FilterField, value: String) -> Action {
    match field {
        FilterField::Departure => Action::SetDepartureFilter(value),
        FilterField::Destination => Action::SetDestinationFilter(value),
        FilterField::City => Action::SetVehicleCity(value),
    }
}

fn handle_filter_input(app: &mut App, tui: &mut TuiState, field: FilterField, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Escape | TuiEvent::Submit => {
            tui.mode = InputMode::Browse;
            Effect::None
        }
        TuiEvent::Tab | TuiEvent::BackTab => {
            tui.mode = InputMode::Filter(field.next());
            Effect::None
        }
        TuiEvent::InputChar(c) => {
            let mut value = filter_value(app, field).to_string();
            value.push(c);
            update(app, set_filter(field, value))
        }
        TuiEvent::Backspace => {
            let mut value = filter_value(app, field).to_string();
            if value.pop().is_none() {
                return Effect::None;
            }
            update(app, set_filter(field, value))
        }
        TuiEvent::CursorUp => update(app, Action::SelectPrev),
        TuiEvent::CursorDown => update(app, Action::SelectNext),
        _ => Effect::None,
    }
}

fn handle_browse(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::InputChar('q') => update(app, Action::Quit),
        TuiEvent::Tab | TuiEvent::BackTab => {
            let next = app.screen.toggle();
            update(app, Action::SwitchScreen(next))
        }
        TuiEvent::CursorUp => update(app, Action::SelectPrev),
        TuiEvent::CursorDown => update(app, Action::SelectNext),
        TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            let list = match app.screen {
                Screen::Routes => &mut tui.route_list,
                Screen::Vehicles => &mut tui.vehicle_list,
            };
            list.handle_event(&event);
            Effect::None
        }
        TuiEvent::InputChar('r') => update(app, Action::Reload),
        TuiEvent::InputChar('x') => update(app, Action::ClearFilters),
        TuiEvent::InputChar('/') => {
            tui.mode = InputMode::Filter(match app.screen {
                Screen::Routes => FilterField::Departure,
                Screen::Vehicles => FilterField::City,
            });
            Effect::None
        }
        TuiEvent::InputChar('t') if app.screen == Screen::Vehicles => {
            let mut options = vec![("All types".to_string(), None)];
            options.extend(
                VehicleType::FILTERABLE
                    .iter()
                    .map(|t| (t.label().to_string(), Some(*t))),
            );
            tui.picker = Some(ActivePicker::VehicleType(PickerState::new(
                "Vehicle type",
                options,
                &app.vehicles.filter.vehicle_type,
            )));
            Effect::None
        }
        _ if app.screen == Screen::Routes => handle_route_command(app, tui, event),
        _ => Effect::None,
    }
}

fn handle_route_command(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let Some(route_id) = app.routes.selected_route().map(|r| r.id.clone()) else {
        return Effect::None;
    };
    match event {
        TuiEvent::InputChar('p') => update(
            app,
            Action::OpenImage {
                route_id,
                kind: ImageKind::Qr,
            },
        ),
        TuiEvent::InputChar('c') => update(
            app,
            Action::OpenImage {
                route_id,
                kind: ImageKind::Chart,
            },
        ),
        TuiEvent::InputChar('f') => update(app, Action::AddFavourite(route_id)),
        TuiEvent::Submit | TuiEvent::InputChar('i') => {
            tui.interest = InterestFormState::new();
            update(app, Action::OpenInterest(route_id))
        }
        _ => Effect::None,
    }
}

/// Run an effect. Returns true when the app should quit.
fn execute_effect(effect: Effect, api: &Arc<dyn MarketplaceApi>, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::FetchRoutes(epoch) => {
            info!("Fetching routes (epoch={})", epoch);
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.daily_routes().await;
                forward(&tx, Action::RoutesLoaded { epoch, result });
            });
        }
        Effect::FetchVehicles { epoch, purpose } => {
            info!("Fetching vehicles for {:?} (epoch={})", purpose, epoch);
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.vehicles_for(purpose).await;
                forward(&tx, Action::VehiclesLoaded { epoch, result });
            });
        }
        Effect::MarkFavourite(route_id) => {
            info!("Adding route {} to favourites", route_id);
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api.add_favourite(&route_id).await;
                forward(&tx, Action::FavouriteDone { route_id, result });
            });
        }
        Effect::SendInterest(submission) => {
            let api = Arc::clone(api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = api
                    .send_ticket_request(&submission.route_id, &submission.request)
                    .await;
                forward(
                    &tx,
                    Action::InterestSubmitted {
                        token: submission.token,
                        result,
                    },
                );
            });
        }
    }
    false
}

fn forward(tx: &mpsc::Sender<Action>, action: Action) {
    debug!("Background task finished, forwarding result");
    if tx.send(action).is_err() {
        warn!("Failed to forward background result: receiver dropped");
    }
}
