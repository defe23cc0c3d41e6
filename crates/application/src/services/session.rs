//! Route planner session state
//!
//! Holds what the user last asked for and hands out request tokens. A token is
//! current until the next one is issued; results carrying an older token are
//! stale and must not touch the map.

use std::fmt;

use domain::{Coordinate, Place, TravelMode};
use serde::Serialize;

use super::route_planner_service::RouteRequest;

/// Generation number of one route request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw generation value
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable state of one planner session
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutePlannerSession {
    last_start: Option<Place>,
    last_end: Option<Place>,
    end_is_station: bool,
    active_mode: TravelMode,
    user_location: Option<Coordinate>,
    pending: Option<RouteRequest>,
    generation: u64,
}

impl RoutePlannerSession {
    /// Fresh session with no known user location
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh session for a user at `location`
    pub fn with_user_location(location: Coordinate) -> Self {
        Self {
            user_location: Some(location),
            ..Self::default()
        }
    }

    /// Issue the next request token, superseding all earlier ones
    pub fn begin_request(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    /// Whether `token` is the most recently issued one
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Remember the endpoints of a rendered route
    pub fn record_endpoints(&mut self, start: Place, end: Place, end_is_station: bool) {
        self.last_start = Some(start);
        self.last_end = Some(end);
        self.end_is_station = end_is_station;
    }

    /// Endpoints of the last rendered route and its station flag
    pub fn last_endpoints(&self) -> Option<(Place, Place, bool)> {
        match (&self.last_start, &self.last_end) {
            (Some(start), Some(end)) => Some((start.clone(), end.clone(), self.end_is_station)),
            _ => None,
        }
    }

    /// Typed request still being planned, if any
    pub const fn pending_request(&self) -> Option<&RouteRequest> {
        self.pending.as_ref()
    }

    /// Mark `request` as in flight
    pub fn set_pending_request(&mut self, request: RouteRequest) {
        self.pending = Some(request);
    }

    /// Forget the in-flight request once its outcome is committed
    pub fn clear_pending_request(&mut self) {
        self.pending = None;
    }

    /// Mode new requests and redraws are planned in
    pub const fn active_mode(&self) -> TravelMode {
        self.active_mode
    }

    /// Change the mode used by the next plan
    pub fn set_active_mode(&mut self, mode: TravelMode) {
        self.active_mode = mode;
    }

    /// Last known user position
    pub const fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    /// Record the user position reported by the device
    pub fn set_user_location(&mut self, location: Coordinate) {
        self.user_location = Some(location);
    }

    /// Geocode bias: the user location if known, else `fallback`
    pub fn geocode_bias(&self, fallback: Coordinate) -> Coordinate {
        self.user_location.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_monotonic() {
        let mut session = RoutePlannerSession::new();
        let a = session.begin_request();
        assert!(session.is_current(a));

        let b = session.begin_request();
        assert!(b > a);
        assert!(session.is_current(b));
        assert!(!session.is_current(a));
        assert_eq!(b.to_string(), "#2");
    }

    #[test]
    fn endpoints_need_both_sides() {
        let mut session = RoutePlannerSession::new();
        assert!(session.last_endpoints().is_none());

        let start = Place::new(Coordinate::mumbai(), "Home");
        let end = Place::new(Coordinate::new_unchecked(18.5286, 73.8743), "Pune");
        session.record_endpoints(start.clone(), end.clone(), true);
        assert_eq!(session.last_endpoints(), Some((start, end, true)));
    }

    #[test]
    fn pending_request_round_trip() {
        let mut session = RoutePlannerSession::new();
        assert!(session.pending_request().is_none());

        let request = RouteRequest::new("Your Location", "Pune Railway Station");
        session.set_pending_request(request.clone());
        assert_eq!(session.pending_request(), Some(&request));

        session.clear_pending_request();
        assert!(session.pending_request().is_none());
    }

    #[test]
    fn bias_prefers_user_location() {
        let fallback = Coordinate::mumbai();
        let mut session = RoutePlannerSession::new();
        assert_eq!(session.geocode_bias(fallback), fallback);

        let here = Coordinate::new_unchecked(12.9716, 77.5946);
        session.set_user_location(here);
        assert_eq!(session.geocode_bias(fallback), here);
        assert_eq!(
            RoutePlannerSession::with_user_location(here).user_location(),
            Some(here)
        );
    }
}
