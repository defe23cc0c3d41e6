//! Overpass QL query construction

/// A radius search for rail stations around a point
#[derive(Debug, Clone, PartialEq)]
pub struct StationQuery {
    /// Center latitude
    pub lat: f64,
    /// Center longitude
    pub lon: f64,
    /// Search radius in meters
    pub radius_meters: u32,
    /// `station=*` values to exclude
    pub excluded_station_types: Vec<String>,
}

impl StationQuery {
    /// Render as Overpass QL
    ///
    /// `out center` makes the server emit coordinates for every element.
    #[must_use]
    pub fn to_overpass_ql(&self) -> String {
        let exclusions: String = self
            .excluded_station_types
            .iter()
            .map(|t| format!("[\"station\"!=\"{t}\"]"))
            .collect();

        format!(
            "[out:json];node[\"railway\"=\"station\"]{exclusions}(around:{},{},{});out center;",
            self.radius_meters, self.lat, self.lon
        )
    }
}
