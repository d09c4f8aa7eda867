//! JSON file catalog source.

use std::fs;
use std::path::PathBuf;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::catalog::Catalog;
use crate::domain::entities::{Coordinates, PointOfInterest};
use crate::domain::errors::CatalogError;
use crate::domain::navigation::NavAction;
use crate::domain::ports::CatalogSource;

/// One attraction record as stored in the catalog file.
///
/// Every field is optional so a missing one is reported against its record
/// rather than failing the whole document.
#[derive(Debug, Deserialize)]
struct AttractionRecord {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    coordinates: Option<CoordinatesRecord>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoordinatesRecord {
    lat: Option<CoordinateValue>,
    lon: Option<CoordinateValue>,
}

/// Coordinates are written either as numbers or as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    fn to_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|value| value.is_finite())
    }
}

impl AttractionRecord {
    fn into_entry(self, index: usize) -> Result<PointOfInterest, CatalogError> {
        let id = required(index, "id", self.id)?;
        if id.len() > NavAction::max_identifier_len() {
            return Err(CatalogError::validation(
                index,
                format!(
                    "identifier '{id}' is longer than {} bytes",
                    NavAction::max_identifier_len()
                ),
            ));
        }

        let coordinates = self
            .coordinates
            .ok_or_else(|| CatalogError::validation(index, "missing field 'coordinates'"))?;

        Ok(PointOfInterest::new(
            id,
            required(index, "name", self.name)?,
            required(index, "description", self.description)?,
            required(index, "address", self.address)?,
            Coordinates::new(
                coordinate(index, "lat", coordinates.lat.as_ref())?,
                coordinate(index, "lon", coordinates.lon.as_ref())?,
            ),
            image_url(index, required(index, "image_url", self.image_url)?)?,
        ))
    }
}

/// Domains reserved for documentation; photos there never resolve.
const PLACEHOLDER_DOMAINS: [&str; 6] = [
    "example.com",
    "example.net",
    "example.org",
    "example",
    "invalid",
    "test",
];

fn image_url(index: usize, value: String) -> Result<String, CatalogError> {
    let url = Url::parse(value.trim()).map_err(|e| {
        CatalogError::validation(index, format!("field 'image_url' is not a URL: {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CatalogError::validation(
            index,
            "field 'image_url' must be an http(s) address",
        ));
    }

    Ok(value)
}

fn is_placeholder_image(image_url: &str) -> bool {
    let Some(host) = Url::parse(image_url.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };
    let host = host.trim_end_matches('.');

    PLACEHOLDER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

fn required(index: usize, field: &str, value: Option<String>) -> Result<String, CatalogError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(CatalogError::validation(
            index,
            format!("field '{field}' is empty"),
        )),
        None => Err(CatalogError::validation(
            index,
            format!("missing field '{field}'"),
        )),
    }
}

fn coordinate(
    index: usize,
    field: &str,
    value: Option<&CoordinateValue>,
) -> Result<f64, CatalogError> {
    let value = value.ok_or_else(|| {
        CatalogError::validation(index, format!("missing field 'coordinates.{field}'"))
    })?;

    value.to_f64().ok_or_else(|| {
        CatalogError::validation(index, format!("field 'coordinates.{field}' is not numeric"))
    })
}

/// Reads the catalog from a JSON array of attraction records.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    /// Creates a source reading the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses a JSON payload into a validated catalog.
    ///
    /// # Errors
    /// Returns `CatalogError::Parse` when the payload is not a JSON array and
    /// `CatalogError::Validation` for any incomplete or mistyped record.
    pub fn parse(payload: &str) -> Result<Catalog, CatalogError> {
        let items: Vec<Value> = serde_json::from_str(payload).map_err(|e| {
            CatalogError::parse(format!("expected a JSON array of attractions: {e}"))
        })?;

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<AttractionRecord>(item)
                    .map_err(|e| CatalogError::validation(index, e.to_string()))?
                    .into_entry(index)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(entries)
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::not_found(&self.path));
        }

        debug!(path = %self.path.display(), "Reading catalog");
        let payload = fs::read_to_string(&self.path)?;
        let catalog = Self::parse(&payload)?;

        info!(
            path = %self.path.display(),
            entries = catalog.len(),
            "Catalog loaded"
        );

        let placeholders: Vec<&str> = catalog
            .all()
            .iter()
            .filter(|entry| is_placeholder_image(entry.image_url()))
            .map(PointOfInterest::id)
            .collect();
        if !placeholders.is_empty() {
            warn!(
                path = %self.path.display(),
                ids = ?placeholders,
                "Catalog photos point at reserved example hosts and will not be delivered"
            );
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use test_case::test_case;

    const KREMLIN: &str = r#"{
        "id": "a",
        "name": "Kremlin",
        "description": "Old fortress",
        "address": "Dzerzhinskogo st., 1",
        "coordinates": {"lat": 57.04, "lon": 34.96},
        "image_url": "https://example.com/kremlin.jpg"
    }"#;

    fn record_with(field: &str, value: &str) -> String {
        let mut record: Value = serde_json::from_str(KREMLIN).unwrap();
        if value.is_empty() {
            record.as_object_mut().unwrap().remove(field);
        } else {
            record[field] = serde_json::from_str(value).unwrap();
        }
        format!("[{record}]")
    }

    #[test]
    fn test_load_preserves_order_and_count() {
        let payload = r#"[
            {"id": "c", "name": "C", "description": "d", "address": "x",
             "coordinates": {"lat": 1, "lon": 2}, "image_url": "https://e.com/c.jpg"},
            {"id": "a", "name": "A", "description": "d", "address": "x",
             "coordinates": {"lat": "57.5", "lon": "34.25"}, "image_url": "https://e.com/a.jpg"},
            {"id": "b", "name": "B", "description": "d", "address": "x",
             "coordinates": {"lat": -3.5, "lon": 0}, "image_url": "https://e.com/b.jpg"}
        ]"#;

        let catalog = JsonCatalogSource::parse(payload).unwrap();

        let ids: Vec<&str> = catalog.all().iter().map(PointOfInterest::id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert_eq!(
            catalog.get("a").unwrap().coordinates(),
            Coordinates::new(57.5, 34.25)
        );
    }

    #[test]
    fn test_get_matches_payload_ids() {
        let catalog = JsonCatalogSource::parse(&format!("[{KREMLIN}]")).unwrap();

        assert_eq!(catalog.get("a").unwrap().name(), "Kremlin");
        assert!(catalog.get("b").is_none());
    }

    #[test]
    fn test_empty_array_is_valid() {
        let catalog = JsonCatalogSource::parse("[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_rejected() {
        for field in ["id", "name", "description", "address", "coordinates", "image_url"] {
            let result = JsonCatalogSource::parse(&record_with(field, ""));
            assert!(
                matches!(result, Err(CatalogError::Validation { index: 0, .. })),
                "missing {field} was accepted"
            );
        }
    }

    #[test]
    fn test_non_numeric_coordinates_are_rejected() {
        let result =
            JsonCatalogSource::parse(&record_with("coordinates", r#"{"lat": "north", "lon": 1}"#));
        assert!(matches!(result, Err(CatalogError::Validation { .. })));

        let result = JsonCatalogSource::parse(&record_with("coordinates", r#"{"lat": 1}"#));
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_blank_and_mistyped_strings_are_rejected() {
        let blank = JsonCatalogSource::parse(&record_with("name", r#""  ""#));
        assert!(matches!(blank, Err(CatalogError::Validation { .. })));

        let mistyped = JsonCatalogSource::parse(&record_with("id", "42"));
        assert!(matches!(mistyped, Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_overlong_identifier_is_rejected() {
        let id = format!("\"{}\"", "x".repeat(NavAction::max_identifier_len() + 1));
        let result = JsonCatalogSource::parse(&record_with("id", &id));
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_duplicates_fail_whole_load() {
        let result = JsonCatalogSource::parse(&format!("[{KREMLIN}, {KREMLIN}]"));
        assert!(matches!(
            result,
            Err(CatalogError::Validation { index: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(
            JsonCatalogSource::parse("{not json"),
            Err(CatalogError::Parse { .. })
        ));
        assert!(matches!(
            JsonCatalogSource::parse(KREMLIN),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let source = JsonCatalogSource::new(dir.path().join("absent.json"));

        assert!(matches!(source.load(), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attractions.json");
        fs::write(&path, format!("[{KREMLIN}]")).unwrap();

        let catalog = JsonCatalogSource::new(&path).load().unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_coordinates_must_be_an_object() {
        let result = JsonCatalogSource::parse(&record_with("coordinates", r#""57.0,34.9""#));
        assert!(matches!(result, Err(CatalogError::Validation { index: 0, .. })));
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        let result = JsonCatalogSource::parse(&record_with(
            "coordinates",
            r#"{"lat": "NaN", "lon": 34.9}"#,
        ));
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }

    #[test_case(r#""kremlin.jpg""# ; "relative_path")]
    #[test_case(r#""ftp://files.example.ru/kremlin.jpg""# ; "ftp_scheme")]
    #[test_case(r#""file:///srv/kremlin.jpg""# ; "local_file")]
    fn test_image_url_must_be_http(value: &str) {
        let result = JsonCatalogSource::parse(&record_with("image_url", value));
        assert!(matches!(result, Err(CatalogError::Validation { index: 0, .. })));
    }

    #[test_case("https://example.com/kremlin.jpg", true ; "example_com")]
    #[test_case("https://img.EXAMPLE.org/a.jpg", true ; "example_subdomain")]
    #[test_case("http://photos.test/a.jpg", true ; "test_tld")]
    #[test_case("https://upload.wikimedia.org/a.jpg", false ; "real_host")]
    #[test_case("https://notexample.com/a.jpg", false ; "lookalike_host")]
    fn test_placeholder_image_detection(url: &str, expected: bool) {
        assert_eq!(is_placeholder_image(url), expected);
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("attractions.json");

        let catalog = JsonCatalogSource::new(path).load().unwrap();
        assert!(!catalog.is_empty());
    }
}
