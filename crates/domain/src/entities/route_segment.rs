//! Route segments: the polylines a plan is made of

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{BoundingBox, Coordinate, SegmentKind, haversine_km};

/// Summary metrics reported by a routing service for one route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Route length in meters
    pub length_meters: u32,
    /// Travel time in seconds
    pub travel_time_seconds: u32,
}

impl RouteSummary {
    /// Length in kilometers
    #[must_use]
    pub fn length_km(&self) -> f64 {
        f64::from(self.length_meters) / 1000.0
    }

    /// Travel time rounded to whole minutes
    #[must_use]
    pub fn travel_time_minutes(&self) -> u32 {
        (f64::from(self.travel_time_seconds) / 60.0).round() as u32
    }
}

/// An ordered polyline tagged with what it represents
///
/// Always holds at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
    points: Vec<Coordinate>,
    kind: SegmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<RouteSummary>,
}

impl RouteSegment {
    /// Create a routed segment
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if fewer than two points are given.
    pub fn new(
        points: Vec<Coordinate>,
        kind: SegmentKind,
        summary: Option<RouteSummary>,
    ) -> Result<Self, DomainError> {
        if points.len() < 2 {
            return Err(DomainError::ValidationError(format!(
                "{kind} segment needs at least two points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            points,
            kind,
            summary,
        })
    }

    /// A direct two-point rail line with no intermediate geometry
    #[must_use]
    pub fn straight_rail(from: Coordinate, to: Coordinate) -> Self {
        Self {
            points: vec![from, to],
            kind: SegmentKind::Rail,
            summary: None,
        }
    }

    /// Get the points
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Get the segment kind
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Get the routing summary, if the segment came from a routing service
    #[must_use]
    pub const fn summary(&self) -> Option<RouteSummary> {
        self.summary
    }

    /// First point
    #[must_use]
    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    /// Last point
    #[must_use]
    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs, in order
    pub fn spans(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of straight-line distances between consecutive points
    #[must_use]
    pub fn polyline_length_km(&self) -> f64 {
        self.spans().map(|(a, b)| haversine_km(&a, &b)).sum()
    }

    /// Length in km: the service summary when present, else the polyline length
    #[must_use]
    pub fn length_km(&self) -> f64 {
        self.summary
            .map_or_else(|| self.polyline_length_km(), |s| s.length_km())
    }

    /// Bounds of all points
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Coordinate> {
        vec![
            Coordinate::new_unchecked(19.0, 72.8),
            Coordinate::new_unchecked(19.1, 72.9),
            Coordinate::new_unchecked(19.2, 72.9),
        ]
    }

    #[test]
    fn rejects_single_point() {
        let result = RouteSegment::new(vec![Coordinate::mumbai()], SegmentKind::Walk, None);
        assert!(result.is_err());
    }

    #[test]
    fn spans_are_consecutive_pairs() {
        let seg = RouteSegment::new(pts(), SegmentKind::Drive, None).unwrap();
        let spans: Vec<_> = seg.spans().collect();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].1, spans[1].0);
        assert_eq!(seg.start(), pts()[0]);
        assert_eq!(seg.end(), pts()[2]);
    }

    #[test]
    fn straight_rail_has_two_points() {
        let a = Coordinate::mumbai();
        let b = Coordinate::new_unchecked(18.5286, 73.8743);
        let seg = RouteSegment::straight_rail(a, b);
        assert_eq!(seg.points().len(), 2);
        assert_eq!(seg.kind(), SegmentKind::Rail);
        assert!(seg.summary().is_none());
        assert!((seg.length_km() - a.distance_km(&b)).abs() < 1e-9);
    }

    #[test]
    fn summary_length_preferred() {
        let summary = RouteSummary {
            length_meters: 12_345,
            travel_time_seconds: 1_530,
        };
        let seg = RouteSegment::new(pts(), SegmentKind::Drive, Some(summary)).unwrap();
        assert!((seg.length_km() - 12.345).abs() < 1e-9);
        assert_eq!(summary.travel_time_minutes(), 26);
    }

    #[test]
    fn bounds_cover_points() {
        let seg = RouteSegment::new(pts(), SegmentKind::Walk, None).unwrap();
        let b = seg.bounds().unwrap();
        assert!(seg.points().iter().all(|p| b.contains(p)));
    }
}
