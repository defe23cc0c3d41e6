//! Routing service port

use std::fmt;

use async_trait::async_trait;
use domain::{Coordinate, RouteSegment, SegmentKind};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Routing profile requested from the routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteProfile {
    /// Traffic-aware fastest car route
    DrivingWithTraffic,
    /// Walking route
    Pedestrian,
}

impl RouteProfile {
    /// Kind of segment a route with this profile produces
    #[must_use]
    pub const fn segment_kind(&self) -> SegmentKind {
        match self {
            Self::DrivingWithTraffic => SegmentKind::Drive,
            Self::Pedestrian => SegmentKind::Walk,
        }
    }
}

impl fmt::Display for RouteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrivingWithTraffic => write!(f, "driving-with-traffic"),
            Self::Pedestrian => write!(f, "pedestrian"),
        }
    }
}

/// Port for fetching routed paths
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch the best route between two coordinates
    ///
    /// Fails with `ApplicationError::NoRouteFound` when the service returns no route.
    async fn fetch_route(
        &self,
        from: Coordinate,
        to: Coordinate,
        profile: RouteProfile,
    ) -> Result<RouteSegment, ApplicationError>;
}
