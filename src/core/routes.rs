//! # Route List
//!
//! State behind the bus-ticket screen: the fetched routes, the city filter,
//! which card (if any) has an image modal open, the interest form, and the
//! favourite calls currently in flight.

use std::collections::HashSet;

use crate::api::Route;
use crate::core::filter::{self, RouteFilter};
use crate::core::interest::InterestModal;
use crate::core::listing::Listing;

pub const FAVOURITE_ADDED: &str = "This route have been added to the favourites";
pub const FAVOURITE_FALLBACK: &str = "Could not add to favourites";

/// Which image a route card can pop up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Qr,
    Chart,
}

impl ImageKind {
    pub fn title(self) -> &'static str {
        match self {
            ImageKind::Qr => "QR Code",
            ImageKind::Chart => "Here is your chart:",
        }
    }

    /// The route's reference for this image, if it has one.
    pub fn reference(self, route: &Route) -> Option<&str> {
        let reference = match self {
            ImageKind::Qr => route.qr.as_deref(),
            ImageKind::Chart => route.seating_arrangement.as_deref(),
        };
        reference.filter(|r| !r.trim().is_empty())
    }
}

/// The single open image modal, scoped to the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenImage {
    pub route_id: String,
    pub kind: ImageKind,
}

#[derive(Debug, Default)]
pub struct RouteList {
    pub listing: Listing<Route>,
    pub filter: RouteFilter,
    pub image: Option<OpenImage>,
    pub interest: InterestModal,
    pub favourites_in_flight: HashSet<String>,
    pub selected: usize,
}

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes passing the current filter, recomputed on every call.
    pub fn visible(&self) -> Vec<&Route> {
        filter::apply(self.listing.items(), &self.filter)
    }

    pub fn selected_route(&self) -> Option<&Route> {
        self.visible().get(self.selected).copied()
    }

    pub fn find(&self, route_id: &str) -> Option<&Route> {
        self.listing.items().iter().find(|r| r.id == route_id)
    }

    /// Keeps the selection inside the visible range after the view changes.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_image(&mut self, route_id: &str, kind: ImageKind) {
        self.image = Some(OpenImage {
            route_id: route_id.to_string(),
            kind,
        });
    }

    pub fn close_image(&mut self) {
        self.image = None;
    }

    /// The image modal this card should show, if it is the open one.
    pub fn image_for(&self, route_id: &str) -> Option<ImageKind> {
        self.image
            .as_ref()
            .filter(|open| open.route_id == route_id)
            .map(|open| open.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_route;

    fn loaded(routes: Vec<Route>) -> RouteList {
        let mut list = RouteList::new();
        let epoch = list.listing.begin_load();
        list.listing.finish_load(epoch, Ok(routes));
        list
    }

    #[test]
    fn test_qr_modal_only_shows_on_its_own_card() {
        let mut a = sample_route("a", "Delhi", "Jaipur");
        a.qr = Some("https://cdn.example/a-qr.png".to_string());
        let mut b = sample_route("b", "Mumbai", "Pune");
        b.qr = Some("https://cdn.example/b-qr.png".to_string());
        let mut list = loaded(vec![a, b]);

        list.open_image("a", ImageKind::Qr);

        assert_eq!(list.image_for("a"), Some(ImageKind::Qr));
        assert_eq!(list.image_for("b"), None);
        let shown = list.find("a").and_then(|r| ImageKind::Qr.reference(r));
        assert_eq!(shown, Some("https://cdn.example/a-qr.png"));
    }

    #[test]
    fn test_opening_another_image_replaces_the_first() {
        let mut list = loaded(vec![
            sample_route("a", "Delhi", "Jaipur"),
            sample_route("b", "Mumbai", "Pune"),
        ]);
        list.open_image("a", ImageKind::Qr);
        list.open_image("b", ImageKind::Chart);
        assert_eq!(list.image_for("a"), None);
        assert_eq!(list.image_for("b"), Some(ImageKind::Chart));

        list.close_image();
        assert!(list.image.is_none());
    }

    #[test]
    fn test_blank_image_reference_is_none() {
        let mut route = sample_route("a", "Delhi", "Jaipur");
        route.seating_arrangement = Some("  ".to_string());
        assert_eq!(ImageKind::Chart.reference(&route), None);
    }

    #[test]
    fn test_selection_is_clamped_to_visible_routes() {
        let mut list = loaded(vec![
            sample_route("a", "Delhi", "Jaipur"),
            sample_route("b", "Mumbai", "Pune"),
            sample_route("c", "Pune", "Goa"),
        ]);
        list.selected = 2;
        list.filter = RouteFilter::new("delhi", "");
        list.clamp_selection();
        assert_eq!(list.selected, 0);
        assert_eq!(list.selected_route().map(|r| r.id.as_str()), Some("a"));
    }

    #[test]
    fn test_select_next_stops_at_end() {
        let mut list = loaded(vec![sample_route("a", "Delhi", "Jaipur")]);
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, 0);
        list.select_prev();
        assert_eq!(list.selected, 0);
    }
}
