//! Axis-aligned lat/lon bounds

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Smallest box containing a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner
    pub south_west: Coordinate,
    /// North-east corner
    pub north_east: Coordinate,
}

impl BoundingBox {
    /// Compute the bounds of a point sequence, `None` if it is empty
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut min_lat, mut min_lon) = (first.lat(), first.lon());
        let (mut max_lat, mut max_lon) = (min_lat, min_lon);

        for p in iter {
            min_lat = min_lat.min(p.lat());
            min_lon = min_lon.min(p.lon());
            max_lat = max_lat.max(p.lat());
            max_lon = max_lon.max(p.lon());
        }

        Some(Self {
            south_west: Coordinate::new_unchecked(min_lat, min_lon),
            north_east: Coordinate::new_unchecked(max_lat, max_lon),
        })
    }

    /// Check whether a coordinate lies inside the box (edges included)
    #[must_use]
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.south_west.lat()..=self.north_east.lat()).contains(&c.lat())
            && (self.south_west.lon()..=self.north_east.lon()).contains(&c.lon())
    }
}
