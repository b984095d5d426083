use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::{
    Card, CardList, FilterBar, FilterBox, FilterField, ImageModal, InterestFormView,
    NoticeDialog, Picker, RouteCard, TitleBar, VehicleCard,
};
use crate::tui::{ActivePicker, InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, filter_area, list_area, help_area] = layout.areas(frame.area());

    TitleBar::new(
        app.screen.title(),
        app.session.user_name(),
        &app.status_message,
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, title_area);

    draw_filter_bar(frame, filter_area, app, tui.mode);

    match app.screen {
        Screen::Routes => draw_routes(frame, list_area, app, tui),
        Screen::Vehicles => draw_vehicles(frame, list_area, app, tui),
    }

    frame.render_widget(
        Line::styled(help_text(app, tui), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    draw_overlays(frame, app, tui);
}

fn draw_filter_bar(frame: &mut Frame, area: Rect, app: &App, mode: InputMode) {
    let focused = |field| mode == InputMode::Filter(field);
    let boxes = match app.screen {
        Screen::Routes => vec![
            FilterBox {
                label: "From",
                value: &app.routes.filter.departure,
                placeholder: "any city",
                focused: focused(FilterField::Departure),
            },
            FilterBox {
                label: "To",
                value: &app.routes.filter.destination,
                placeholder: "any city",
                focused: focused(FilterField::Destination),
            },
        ],
        Screen::Vehicles => vec![
            FilterBox {
                label: "Type (t)",
                value: app
                    .vehicles
                    .filter
                    .vehicle_type
                    .map_or("", |t| t.label()),
                placeholder: "all types",
                focused: false,
            },
            FilterBox {
                label: "City",
                value: &app.vehicles.filter.city,
                placeholder: "any city",
                focused: focused(FilterField::City),
            },
        ],
    };
    FilterBar::new(boxes).render(frame, area);
}

fn empty_message(loading: bool, fetched: usize, noun: &'static str) -> String {
    if loading {
        format!("Loading {noun}...")
    } else if fetched == 0 {
        format!("No {noun} found")
    } else {
        format!("No {noun} match the filter")
    }
}

fn draw_routes(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let list = &app.routes;
    let can_write = app.session.is_authenticated();
    let cards: Vec<Card> = list
        .visible()
        .into_iter()
        .enumerate()
        .map(|(i, route)| {
            Card::Route(RouteCard::new(
                route,
                i == list.selected,
                can_write,
                list.favourites_in_flight.contains(&route.id),
            ))
        })
        .collect();
    let empty = empty_message(
        list.listing.is_loading(),
        list.listing.items().len(),
        "routes",
    );
    CardList::new(
        &mut tui.route_list,
        cards,
        list.selected,
        list.listing.revision(),
        &empty,
    )
    .render(frame, area);
}

fn draw_vehicles(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let list = &app.vehicles;
    let cards: Vec<Card> = list
        .visible()
        .into_iter()
        .enumerate()
        .map(|(i, vehicle)| Card::Vehicle(VehicleCard::new(vehicle, i == list.selected)))
        .collect();
    let empty = empty_message(
        list.listing.is_loading(),
        list.listing.items().len(),
        "vehicles",
    );
    CardList::new(
        &mut tui.vehicle_list,
        cards,
        list.selected,
        list.listing.revision(),
        &empty,
    )
    .render(frame, area);
}

/// Overlays stack in this order; the notice always ends up on top.
fn draw_overlays(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();

    if app.screen == Screen::Routes
        && let Some(open) = &app.routes.image
        && let Some(route) = app.routes.find(&open.route_id)
    {
        ImageModal::new(route, open.kind).render(frame, area);
    }

    if let Some(form) = app.routes.interest.form() {
        InterestFormView::new(form, tui.interest.focus, app.routes.interest.phase())
            .render(frame, area);
    }

    match &mut tui.picker {
        Some(ActivePicker::VehicleType(state)) => Picker::new(state).render(frame, area),
        Some(ActivePicker::Gender(state)) => Picker::new(state).render(frame, area),
        None => {}
    }

    if let Some(notice) = &app.notice {
        NoticeDialog::new(notice).render(frame, area);
    }
}

fn help_text(app: &App, tui: &TuiState) -> &'static str {
    if app.notice.is_some() {
        return " Enter OK";
    }
    if tui.picker.is_some() || app.routes.interest.form().is_some() || app.routes.image.is_some() {
        return " Esc Close";
    }
    match (tui.mode, app.screen) {
        (InputMode::Filter(_), _) => " Type to filter  Tab Next field  Enter/Esc Done",
        (InputMode::Browse, Screen::Routes) => {
            " ↑↓ Select  / Filter  x Clear  r Reload  Tab Vehicles  q Quit"
        }
        (InputMode::Browse, Screen::Vehicles) => {
            " ↑↓ Select  / City  t Type  x Clear  r Reload  Tab Routes  q Quit"
        }
    }
}
