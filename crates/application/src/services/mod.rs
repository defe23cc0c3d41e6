//! Application services - Use case implementations

mod booking_link;
mod layer_manager;
mod route_composer;
mod route_planner_service;
mod session;
mod station_locator;

pub use booking_link::{TRAIN_BOOKING_URL, train_booking_url};
pub use layer_manager::{EMPTY_INFO, LayerManager};
pub use route_composer::{PlannedLayer, RouteComposer, RoutePlan};
pub use route_planner_service::{
    PlannerStatus, RenderOutcome, RouteRequest, RoutePlannerService, YOUR_LOCATION,
    mentions_station,
};
pub use session::{RequestToken, RoutePlannerSession};
pub use station_locator::{StationLocator, pick_nearest};
