//! # Actions
//!
//! Everything that can happen in Safar becomes an `Action`.
//! User presses `r`? That's `Action::Reload`.
//! Backend responds? That's `Action::RoutesLoaded { epoch, result }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! adapter should perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every network result comes back through this same function, so the
//! "last applied write wins" rule only has to hold in one place.

use log::{debug, info};

use crate::api::{ApiError, Purpose, Route, Vehicle, VehicleType};
use crate::core::interest::{InterestEdit, Submission, SubmitRejected};
use crate::core::listing::{Epoch, LoadOutcome};
use crate::core::notice::Notice;
use crate::core::routes::{FAVOURITE_ADDED, FAVOURITE_FALLBACK, ImageKind};
use crate::core::state::{App, Screen};

#[derive(Debug)]
pub enum Action {
    Quit,
    SwitchScreen(Screen),
    /// Refetch whatever the front screen shows.
    Reload,

    LoadRoutes,
    RoutesLoaded {
        epoch: Epoch,
        result: Result<Vec<Route>, ApiError>,
    },
    LoadVehicles,
    VehiclesLoaded {
        epoch: Epoch,
        result: Result<Vec<Vehicle>, ApiError>,
    },

    SetDepartureFilter(String),
    SetDestinationFilter(String),
    SetVehicleType(Option<VehicleType>),
    SetVehicleCity(String),
    ClearFilters,
    SelectNext,
    SelectPrev,

    OpenImage { route_id: String, kind: ImageKind },
    CloseImage,

    AddFavourite(String),
    FavouriteDone {
        route_id: String,
        result: Result<(), ApiError>,
    },

    OpenInterest(String),
    EditInterest(InterestEdit),
    SubmitInterest,
    InterestSubmitted {
        token: u64,
        result: Result<(), ApiError>,
    },
    CloseInterest,

    DismissNotice,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchRoutes(Epoch),
    FetchVehicles { epoch: Epoch, purpose: Purpose },
    MarkFavourite(String),
    SendInterest(Submission),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::SwitchScreen(screen) => {
            app.screen = screen;
            app.routes.close_image();
            app.routes.interest.close();
            // Each visit refetches, like remounting the screen.
            match screen {
                Screen::Routes => update(app, Action::LoadRoutes),
                Screen::Vehicles => update(app, Action::LoadVehicles),
            }
        }

        Action::Reload => match app.screen {
            Screen::Routes => update(app, Action::LoadRoutes),
            Screen::Vehicles => update(app, Action::LoadVehicles),
        },

        Action::LoadRoutes => {
            let epoch = app.routes.listing.begin_load();
            app.status_message = "Loading routes...".to_string();
            Effect::FetchRoutes(epoch)
        }

        Action::RoutesLoaded { epoch, result } => {
            let status = match app.routes.listing.finish_load(epoch, result) {
                LoadOutcome::Applied(count) => format!("{count} routes"),
                LoadOutcome::Failed => "Could not load routes (press r to retry)".to_string(),
                LoadOutcome::Stale => return Effect::None,
            };
            app.routes.clamp_selection();
            // A background list must not overwrite the front screen's status.
            if app.screen == Screen::Routes {
                app.status_message = status;
            }
            Effect::None
        }

        Action::LoadVehicles => {
            let epoch = app.vehicles.listing.begin_load();
            app.status_message = "Loading vehicles...".to_string();
            Effect::FetchVehicles {
                epoch,
                purpose: app.vehicles.purpose,
            }
        }

        Action::VehiclesLoaded { epoch, result } => {
            let result = result.map(|vehicles| app.vehicles.accept(vehicles));
            let status = match app.vehicles.listing.finish_load(epoch, result) {
                LoadOutcome::Applied(count) => format!("{count} vehicles"),
                LoadOutcome::Failed => "Could not load vehicles (press r to retry)".to_string(),
                LoadOutcome::Stale => return Effect::None,
            };
            app.vehicles.clamp_selection();
            // A background list must not overwrite the front screen's status.
            if app.screen == Screen::Vehicles {
                app.status_message = status;
            }
            Effect::None
        }

        Action::SetDepartureFilter(text) => {
            app.routes.filter.departure = text;
            app.routes.clamp_selection();
            Effect::None
        }

        Action::SetDestinationFilter(text) => {
            app.routes.filter.destination = text;
            app.routes.clamp_selection();
            Effect::None
        }

        Action::SetVehicleType(vehicle_type) => {
            app.vehicles.filter.vehicle_type = vehicle_type;
            app.vehicles.clamp_selection();
            Effect::None
        }

        Action::SetVehicleCity(text) => {
            app.vehicles.filter.city = text;
            app.vehicles.clamp_selection();
            Effect::None
        }

        Action::ClearFilters => {
            match app.screen {
                Screen::Routes => {
                    app.routes.filter = Default::default();
                    app.routes.clamp_selection();
                }
                Screen::Vehicles => {
                    app.vehicles.filter = Default::default();
                    app.vehicles.clamp_selection();
                }
            }
            Effect::None
        }

        Action::SelectNext => {
            match app.screen {
                Screen::Routes => app.routes.select_next(),
                Screen::Vehicles => app.vehicles.select_next(),
            }
            Effect::None
        }

        Action::SelectPrev => {
            match app.screen {
                Screen::Routes => app.routes.select_prev(),
                Screen::Vehicles => app.vehicles.select_prev(),
            }
            Effect::None
        }

        Action::OpenImage { route_id, kind } => {
            if app.routes.find(&route_id).is_some() {
                app.routes.open_image(&route_id, kind);
            }
            Effect::None
        }

        Action::CloseImage => {
            app.routes.close_image();
            Effect::None
        }

        Action::AddFavourite(route_id) => {
            if !app.session.is_authenticated() {
                app.status_message = "Sign in to add favourites".to_string();
                return Effect::None;
            }
            if !app.routes.favourites_in_flight.insert(route_id.clone()) {
                debug!("Favourite already in flight for route {}", route_id);
                return Effect::None;
            }
            Effect::MarkFavourite(route_id)
        }

        Action::FavouriteDone { route_id, result } => {
            app.routes.favourites_in_flight.remove(&route_id);
            // No local patch or refetch: the list keeps its snapshot.
            app.notice = Some(match result {
                Ok(()) => Notice::success(FAVOURITE_ADDED),
                Err(e) => {
                    info!("Favourite failed for route {}: {}", route_id, e);
                    Notice::error(e.user_message(FAVOURITE_FALLBACK))
                }
            });
            Effect::None
        }

        Action::OpenInterest(route_id) => {
            if !app.session.is_authenticated() {
                app.status_message = "Sign in to send interest".to_string();
                return Effect::None;
            }
            if let Some(route) = app.routes.find(&route_id).cloned() {
                app.routes.close_image();
                app.routes.interest.open(&route, &app.session);
            }
            Effect::None
        }

        Action::EditInterest(edit) => {
            app.routes.interest.edit(edit);
            Effect::None
        }

        Action::SubmitInterest => match app.routes.interest.submit() {
            Ok(submission) => {
                app.status_message = "Sending interest...".to_string();
                Effect::SendInterest(submission)
            }
            Err(SubmitRejected::Invalid(e)) => {
                app.status_message = e.to_string();
                Effect::None
            }
            Err(SubmitRejected::InFlight | SubmitRejected::NotOpen) => Effect::None,
        },

        Action::InterestSubmitted { token, result } => {
            if let Some(notice) = app.routes.interest.finish(token, result) {
                app.notice = Some(notice);
            }
            Effect::None
        }

        Action::CloseInterest => {
            app.routes.interest.close();
            Effect::None
        }

        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Gender;
    use crate::core::interest::{Phase, SENT_MESSAGE};
    use crate::core::notice::NoticeKind;
    use crate::test_support::{sample_route, sample_vehicle, signed_in_app, test_app};

    fn load_routes(app: &mut App, routes: Vec<Route>) {
        let Effect::FetchRoutes(epoch) = update(app, Action::LoadRoutes) else {
            panic!("expected FetchRoutes");
        };
        update(app, Action::RoutesLoaded { epoch, result: Ok(routes) });
    }

    fn open_filled_form(app: &mut App) {
        update(app, Action::OpenInterest("r1".to_string()));
        update(app, Action::EditInterest(InterestEdit::People("2".to_string())));
        update(app, Action::EditInterest(InterestEdit::Date("01/09/2024".to_string())));
        update(app, Action::EditInterest(InterestEdit::Gender(Gender::Male)));
    }

    #[test]
    fn test_load_routes_sets_busy_and_emits_fetch() {
        let mut app = test_app();
        let effect = update(&mut app, Action::LoadRoutes);
        assert_eq!(effect, Effect::FetchRoutes(1));
        assert!(app.is_loading());
    }

    #[test]
    fn test_routes_failure_is_silent() {
        let mut app = test_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);

        let Effect::FetchRoutes(epoch) = update(&mut app, Action::Reload) else {
            panic!("expected FetchRoutes");
        };
        update(
            &mut app,
            Action::RoutesLoaded {
                epoch,
                result: Err(ApiError::Network("offline".to_string())),
            },
        );

        assert!(!app.is_loading());
        assert!(app.notice.is_none());
        assert_eq!(app.routes.listing.items().len(), 1);
        assert!(app.status_message.contains("Could not load routes"));
    }

    #[test]
    fn test_concurrent_reloads_last_issued_wins() {
        let mut app = test_app();
        let Effect::FetchRoutes(first) = update(&mut app, Action::LoadRoutes) else {
            panic!("expected FetchRoutes");
        };
        let Effect::FetchRoutes(second) = update(&mut app, Action::LoadRoutes) else {
            panic!("expected FetchRoutes");
        };

        update(
            &mut app,
            Action::RoutesLoaded {
                epoch: second,
                result: Ok(vec![sample_route("new", "Delhi", "Agra")]),
            },
        );
        update(
            &mut app,
            Action::RoutesLoaded {
                epoch: first,
                result: Ok(vec![sample_route("old", "Delhi", "Agra")]),
            },
        );

        assert!(!app.is_loading());
        assert_eq!(app.routes.listing.items()[0].id, "new");
    }

    #[test]
    fn test_vehicles_loaded_drops_not_for_purpose() {
        let mut app = test_app();
        app.screen = Screen::Vehicles;
        let Effect::FetchVehicles { epoch, purpose } = update(&mut app, Action::LoadVehicles) else {
            panic!("expected FetchVehicles");
        };
        assert_eq!(purpose, Purpose::Rent);

        let mut not_for_rent = sample_vehicle("v2", VehicleType::Car, "Patiala");
        not_for_rent.is_for_rent = false;
        update(
            &mut app,
            Action::VehiclesLoaded {
                epoch,
                result: Ok(vec![sample_vehicle("v1", VehicleType::Bus, "Patiala"), not_for_rent]),
            },
        );
        assert_eq!(app.vehicles.listing.items().len(), 1);
        assert_eq!(app.status_message, "1 vehicles");
    }

    #[test]
    fn test_background_load_keeps_front_status() {
        let mut app = test_app();
        let Effect::FetchRoutes(epoch) = update(&mut app, Action::LoadRoutes) else {
            panic!("expected FetchRoutes");
        };
        update(&mut app, Action::SwitchScreen(Screen::Vehicles));
        assert_eq!(app.status_message, "Loading vehicles...");

        update(
            &mut app,
            Action::RoutesLoaded {
                epoch,
                result: Ok(vec![sample_route("r1", "Delhi", "Jaipur")]),
            },
        );
        assert_eq!(app.routes.listing.items().len(), 1);
        assert_eq!(app.status_message, "Loading vehicles...");
    }

    #[test]
    fn test_switch_screen_refetches() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SwitchScreen(Screen::Vehicles));
        assert!(matches!(effect, Effect::FetchVehicles { .. }));
        assert_eq!(app.screen, Screen::Vehicles);
    }

    #[test]
    fn test_filter_change_reclamps_selection() {
        let mut app = test_app();
        load_routes(
            &mut app,
            vec![
                sample_route("r1", "Delhi", "Jaipur"),
                sample_route("r2", "Mumbai", "Pune"),
            ],
        );
        update(&mut app, Action::SelectNext);
        assert_eq!(app.routes.selected, 1);

        update(&mut app, Action::SetDepartureFilter("del".to_string()));
        assert_eq!(app.routes.selected, 0);
        assert_eq!(app.routes.visible().len(), 1);

        update(&mut app, Action::ClearFilters);
        assert_eq!(app.routes.visible().len(), 2);
    }

    #[test]
    fn test_favourite_requires_sign_in() {
        let mut app = test_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        let effect = update(&mut app, Action::AddFavourite("r1".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_duplicate_favourite_press_is_ignored_while_in_flight() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        assert_eq!(
            update(&mut app, Action::AddFavourite("r1".to_string())),
            Effect::MarkFavourite("r1".to_string())
        );
        assert_eq!(update(&mut app, Action::AddFavourite("r1".to_string())), Effect::None);

        update(
            &mut app,
            Action::FavouriteDone {
                route_id: "r1".to_string(),
                result: Ok(()),
            },
        );
        assert!(matches!(
            update(&mut app, Action::AddFavourite("r1".to_string())),
            Effect::MarkFavourite(_)
        ));
    }

    #[test]
    fn test_favourite_success_does_not_touch_the_list() {
        let mut app = signed_in_app();
        let routes = vec![sample_route("r1", "Delhi", "Jaipur")];
        load_routes(&mut app, routes.clone());

        update(&mut app, Action::AddFavourite("r1".to_string()));
        let effect = update(
            &mut app,
            Action::FavouriteDone {
                route_id: "r1".to_string(),
                result: Ok(()),
            },
        );

        // Known gap: the snapshot is neither patched nor refetched.
        assert_eq!(effect, Effect::None);
        assert_eq!(app.routes.listing.items(), routes.as_slice());
        assert_eq!(app.notice, Some(Notice::success(FAVOURITE_ADDED)));
    }

    #[test]
    fn test_favourite_failure_shows_server_message() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        update(&mut app, Action::AddFavourite("r1".to_string()));
        update(
            &mut app,
            Action::FavouriteDone {
                route_id: "r1".to_string(),
                result: Err(ApiError::Api {
                    status: 400,
                    message: Some("Already a favourite".to_string()),
                }),
            },
        );
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Already a favourite");

        update(&mut app, Action::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_interest_requires_sign_in() {
        let mut app = test_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        update(&mut app, Action::OpenInterest("r1".to_string()));
        assert_eq!(app.routes.interest.phase(), Phase::Idle);
    }

    #[test]
    fn test_incomplete_interest_never_emits_request() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        update(&mut app, Action::OpenInterest("r1".to_string()));
        update(&mut app, Action::EditInterest(InterestEdit::People("2".to_string())));

        let effect = update(&mut app, Action::SubmitInterest);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.routes.interest.phase(), Phase::Editing);
        assert_eq!(app.status_message, "Date of journey is required");
    }

    #[test]
    fn test_interest_round_trip_success() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        open_filled_form(&mut app);

        let Effect::SendInterest(submission) = update(&mut app, Action::SubmitInterest) else {
            panic!("expected SendInterest");
        };
        assert_eq!(submission.route_id, "r1");
        assert_eq!(update(&mut app, Action::SubmitInterest), Effect::None);

        update(
            &mut app,
            Action::InterestSubmitted {
                token: submission.token,
                result: Ok(()),
            },
        );
        assert_eq!(app.routes.interest.phase(), Phase::Idle);
        assert_eq!(app.notice, Some(Notice::success(SENT_MESSAGE)));
    }

    #[test]
    fn test_interest_failure_keeps_form() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        open_filled_form(&mut app);

        let Effect::SendInterest(submission) = update(&mut app, Action::SubmitInterest) else {
            panic!("expected SendInterest");
        };
        update(
            &mut app,
            Action::InterestSubmitted {
                token: submission.token,
                result: Err(ApiError::Network("timeout".to_string())),
            },
        );

        assert_eq!(app.routes.interest.phase(), Phase::Editing);
        let form = app.routes.interest.form().unwrap();
        assert_eq!(form.people, "2");
        assert_eq!(form.gender, Some(Gender::Male));
        assert_eq!(app.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_opening_interest_closes_image_modal() {
        let mut app = signed_in_app();
        load_routes(&mut app, vec![sample_route("r1", "Delhi", "Jaipur")]);
        update(
            &mut app,
            Action::OpenImage {
                route_id: "r1".to_string(),
                kind: ImageKind::Chart,
            },
        );
        assert_eq!(app.routes.image_for("r1"), Some(ImageKind::Chart));

        update(&mut app, Action::OpenInterest("r1".to_string()));
        assert!(app.routes.image.is_none());
        assert!(app.routes.interest.is_open_for("r1"));
    }

    #[test]
    fn test_open_image_for_unknown_route_is_ignored() {
        let mut app = test_app();
        update(
            &mut app,
            Action::OpenImage {
                route_id: "missing".to_string(),
                kind: ImageKind::Qr,
            },
        );
        assert!(app.routes.image.is_none());
    }
}
