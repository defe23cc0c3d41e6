//! Route planner service
//!
//! The single entry point the UI talks to. Each request takes a fresh
//! [`RequestToken`], resolves its endpoints, composes a plan under a timeout and
//! only then draws it, provided no newer request was issued in the meantime.
//! Progress is published on a watch channel instead of blocking dialogs.

use std::time::Duration;

use domain::{Coordinate, Place, TravelMode};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::MapSurfacePort;
use crate::services::layer_manager::LayerManager;
use crate::services::route_composer::{RouteComposer, RoutePlan};
use crate::services::session::{RequestToken, RoutePlannerSession};

/// Start text that means "where the user is"
pub const YOUR_LOCATION: &str = "Your Location";

/// Whether free text names a station
pub fn mentions_station(text: &str) -> bool {
    text.to_lowercase().contains("station")
}

/// A route request as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequest {
    /// Start text, or "Your Location"
    pub start: String,
    /// End text
    pub end: String,
    /// The end point is itself a rail station
    pub end_is_station: bool,
}

impl RouteRequest {
    /// Request with the station flag inferred from the end text
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        let end = end.into();
        Self {
            end_is_station: mentions_station(&end),
            start: start.into(),
            end,
        }
    }

    /// Override the inferred station flag
    #[must_use]
    pub const fn with_end_is_station(mut self, end_is_station: bool) -> Self {
        self.end_is_station = end_is_station;
        self
    }
}

/// What the planner is doing, as seen by the UI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlannerStatus {
    #[default]
    Idle,
    Working {
        request: RequestToken,
    },
    Rendered {
        request: RequestToken,
        headline: String,
    },
    Failed {
        request: RequestToken,
        message: String,
    },
}

/// Result of one planner call
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// The plan is now on the map
    Rendered {
        request: RequestToken,
        plan: Box<RoutePlan>,
    },
    /// A newer request took over; nothing was drawn
    Superseded(RequestToken),
    /// Mode switched with no previous route to redraw
    NothingToDraw,
}

/// Route planner bound to one map surface
pub struct RoutePlannerService<S> {
    composer: RouteComposer,
    layers: Mutex<LayerManager<S>>,
    session: Mutex<RoutePlannerSession>,
    status: watch::Sender<PlannerStatus>,
    request_timeout: Duration,
}

impl<S> std::fmt::Debug for RoutePlannerService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlannerService")
            .field("composer", &self.composer)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl<S: MapSurfacePort> RoutePlannerService<S> {
    /// Create a service drawing on `surface`
    pub fn new(composer: RouteComposer, surface: S, session: RoutePlannerSession) -> Self {
        let request_timeout = Duration::from_secs(composer.config().request_timeout_secs);
        let (status, _) = watch::channel(PlannerStatus::Idle);
        Self {
            composer,
            layers: Mutex::new(LayerManager::new(surface)),
            session: Mutex::new(session),
            status,
            request_timeout,
        }
    }

    /// Override the whole-request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Status updates, starting with the current status
    pub fn subscribe(&self) -> watch::Receiver<PlannerStatus> {
        self.status.subscribe()
    }

    /// Copy of the session state
    pub fn session_snapshot(&self) -> RoutePlannerSession {
        self.session.lock().clone()
    }

    /// Update the user location used for "Your Location" and geocode bias
    pub fn set_user_location(&self, location: Coordinate) {
        self.session.lock().set_user_location(location);
    }

    /// Read the map surface
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(self.layers.lock().surface())
    }

    /// Clear the map
    pub fn clear(&self) {
        self.layers.lock().clear();
    }

    /// Geocode both ends and draw a route in the active mode
    #[instrument(skip(self, request), fields(start = %request.start, end = %request.end))]
    pub async fn find_route(&self, request: RouteRequest) -> Result<RenderOutcome, ApplicationError> {
        let (token, mode, user_location, bias) = {
            let mut session = self.session.lock();
            let token = session.begin_request();
            session.set_pending_request(request.clone());
            (
                token,
                session.active_mode(),
                session.user_location(),
                session.geocode_bias(self.composer.config().default_location),
            )
        };
        self.publish(PlannerStatus::Working { request: token });
        debug!(%token, %mode, "Route request started");

        let result = self
            .bounded(self.plan_request(&request, mode, user_location, bias))
            .await;
        self.finish(token, result, request.end_is_station)
    }

    /// Switch travel mode and redraw in it
    ///
    /// A request still in flight is planned again from its typed endpoints in
    /// the new mode. Otherwise the last rendered route is redrawn, if any.
    #[instrument(skip(self))]
    pub async fn switch_mode(&self, mode: TravelMode) -> Result<RenderOutcome, ApplicationError> {
        let (token, pending, last, user_location, bias) = {
            let mut session = self.session.lock();
            session.set_active_mode(mode);
            (
                session.begin_request(),
                session.pending_request().cloned(),
                session.last_endpoints(),
                session.user_location(),
                session.geocode_bias(self.composer.config().default_location),
            )
        };

        if let Some(request) = pending {
            debug!(%token, end = %request.end, "Re-planning in-flight request");
            self.publish(PlannerStatus::Working { request: token });
            let result = self
                .bounded(self.plan_request(&request, mode, user_location, bias))
                .await;
            return self.finish(token, result, request.end_is_station);
        }

        let Some((start, end, end_is_station)) = last else {
            debug!("No previous route to redraw");
            return Ok(RenderOutcome::NothingToDraw);
        };
        self.publish(PlannerStatus::Working { request: token });

        let result = self
            .bounded(self.composer.compose(mode, &start, &end, end_is_station))
            .await;
        self.finish(token, result, end_is_station)
    }

    async fn plan_request(
        &self,
        request: &RouteRequest,
        mode: TravelMode,
        user_location: Option<Coordinate>,
        bias: Coordinate,
    ) -> Result<RoutePlan, ApplicationError> {
        let start = self.resolve_start(&request.start, user_location, bias).await?;
        let end = self.composer.geocode(&request.end, bias).await?;
        self.composer
            .compose(mode, &start, &end, request.end_is_station)
            .await
    }

    async fn resolve_start(
        &self,
        text: &str,
        user_location: Option<Coordinate>,
        bias: Coordinate,
    ) -> Result<Place, ApplicationError> {
        if text.trim().eq_ignore_ascii_case(YOUR_LOCATION) {
            return user_location
                .map(|location| Place::new(location, YOUR_LOCATION))
                .ok_or_else(|| {
                    warn!("User location unknown");
                    ApplicationError::GeocodeNotFound(YOUR_LOCATION.to_string())
                });
        }
        self.composer.geocode(text, bias).await
    }

    async fn bounded(
        &self,
        work: impl Future<Output = Result<RoutePlan, ApplicationError>>,
    ) -> Result<RoutePlan, ApplicationError> {
        tokio::time::timeout(self.request_timeout, work)
            .await
            .map_err(|_| {
                ApplicationError::NetworkFailure(format!(
                    "route request timed out after {}s",
                    self.request_timeout.as_secs_f64()
                ))
            })?
    }

    /// Draw or report the result if `token` is still current
    ///
    /// Lock order is layers, then session, so the check and the draw cannot be
    /// interleaved with another request's commit.
    fn finish(
        &self,
        token: RequestToken,
        result: Result<RoutePlan, ApplicationError>,
        end_is_station: bool,
    ) -> Result<RenderOutcome, ApplicationError> {
        let mut layers = self.layers.lock();
        let mut session = self.session.lock();
        if !session.is_current(token) {
            warn!(%token, "Discarding result of superseded request");
            return Ok(RenderOutcome::Superseded(token));
        }
        session.clear_pending_request();

        match result {
            Ok(plan) => {
                layers.draw_plan(&plan);
                session.record_endpoints(plan.start.clone(), plan.end.clone(), end_is_station);
                info!(%token, headline = %plan.headline, "Route rendered");
                self.publish(PlannerStatus::Rendered {
                    request: token,
                    headline: plan.headline.clone(),
                });
                Ok(RenderOutcome::Rendered {
                    request: token,
                    plan: Box::new(plan),
                })
            },
            Err(e) => {
                warn!(%token, error = %e, "Route request failed");
                self.publish(PlannerStatus::Failed {
                    request: token,
                    message: e.to_string(),
                });
                Err(e)
            },
        }
    }

    fn publish(&self, status: PlannerStatus) {
        self.status.send_replace(status);
    }
}
