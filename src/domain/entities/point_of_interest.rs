//! Point of interest entity.

const MAPS_BASE_URL: &str = "https://yandex.ru/maps/";
const MAP_ZOOM: u8 = 16;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Coordinates {
    /// Creates coordinates from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Link showing a pin at this position.
    #[must_use]
    pub fn map_link(&self) -> String {
        format!(
            "{MAPS_BASE_URL}?pt={lon},{lat}&z={MAP_ZOOM}&l=map",
            lon = self.lon,
            lat = self.lat
        )
    }

    /// Link planning a car route to this position from the user's location.
    #[must_use]
    pub fn route_link(&self) -> String {
        format!(
            "{MAPS_BASE_URL}?rtext=~{lat}%2C{lon}&rtt=auto",
            lat = self.lat,
            lon = self.lon
        )
    }
}

/// A catalog entry the user can browse.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    id: String,
    name: String,
    description: String,
    address: String,
    coordinates: Coordinates,
    image_url: String,
}

impl PointOfInterest {
    /// Creates a new entry.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            address: address.into(),
            coordinates,
            image_url: image_url.into(),
        }
    }

    /// Unique identifier, carried in button payloads.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Position on the map.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Photo URL or Bot API file id.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Map link for this entry.
    #[must_use]
    pub fn map_link(&self) -> String {
        self.coordinates.map_link()
    }

    /// Route link for this entry.
    #[must_use]
    pub fn route_link(&self) -> String {
        self.coordinates.route_link()
    }
}
