//! Normalization of the place text-search payload.

use serde::{Deserialize, Serialize, Serializer};
use tracing::error;

use crate::directions::{null_as_default, STATUS_OK};

pub const NOT_RATED: &str = "Not rated";
pub const OPERATIONAL: &str = "OPERATIONAL";
const PLACE_LINK_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

// ============================================================================
// UPSTREAM PAYLOAD
// ============================================================================

/// Raw body returned by the place text-search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    pub error_message: Option<String>,
    pub results: Option<Vec<RawPlace>>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formatted_address: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub opening_hours: Option<RawOpeningHours>,
    pub business_status: Option<String>,
    pub photos: Option<Vec<serde_json::Value>>,
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOpeningHours {
    pub open_now: Option<bool>,
}

// ============================================================================
// NORMALIZED OUTPUT
// ============================================================================

/// Search hits plus the token for the next page, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    pub places: Vec<Place>,
    /// Serialized as `null` when there is no further page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub name: String,
    pub address: String,
    pub rating: Rating,
    pub total_ratings: u64,
    pub is_open: OpenStatus,
    pub is_operational: bool,
    pub has_photos: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Average user rating, or the `"Not rated"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    NotRated,
}

impl Rating {
    /// Zero is treated like a missing rating.
    pub fn from_upstream(rating: Option<f64>) -> Self {
        match rating {
            Some(score) if score != 0.0 && !score.is_nan() => Rating::Score(score),
            _ => Rating::NotRated,
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::NotRated => serializer.serialize_str(NOT_RATED),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpenStatus {
    #[serde(rename = "Hours not available")]
    HoursNotAvailable,
    #[serde(rename = "Open now")]
    OpenNow,
    Closed,
}

impl OpenStatus {
    pub fn from_upstream(hours: Option<&RawOpeningHours>) -> Self {
        match hours {
            None => OpenStatus::HoursNotAvailable,
            Some(RawOpeningHours {
                open_now: Some(true),
            }) => OpenStatus::OpenNow,
            Some(_) => OpenStatus::Closed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpenStatus::HoursNotAvailable => "Hours not available",
            OpenStatus::OpenNow => "Open now",
            OpenStatus::Closed => "Closed",
        }
    }
}

/// Map a text-search payload onto a [`PlaceResult`].
///
/// Returns `None` (and logs why) when the status is not `OK` or the payload
/// has no `results` list. An `OK` payload with an empty list produces an empty
/// result.
pub fn normalize_places(raw: PlacesResponse) -> Option<PlaceResult> {
    if raw.status != STATUS_OK {
        error!(status = %raw.status, "no valid places found in the search payload");
        return None;
    }

    let Some(results) = raw.results else {
        error!("search payload reported OK but contained no results list");
        return None;
    };

    let places = results.into_iter().map(normalize_place).collect();

    Some(PlaceResult {
        places,
        next_page_token: raw.next_page_token.filter(|token| !token.is_empty()),
    })
}

fn normalize_place(place: RawPlace) -> Place {
    Place {
        rating: Rating::from_upstream(place.rating),
        total_ratings: place.user_ratings_total.unwrap_or(0),
        is_open: OpenStatus::from_upstream(place.opening_hours.as_ref()),
        is_operational: place.business_status.as_deref() == Some(OPERATIONAL),
        has_photos: place.photos.is_some_and(|photos| !photos.is_empty()),
        link: place
            .place_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("{}{}", PLACE_LINK_PREFIX, id)),
        name: place.name,
        address: place.formatted_address,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn parse(payload: Value) -> PlacesResponse {
        serde_json::from_value(payload).expect("payload decodes")
    }

    fn single_place(place: Value) -> Place {
        let result = normalize_places(parse(json!({"status": "OK", "results": [place]})))
            .expect("normalizes");
        result.places.into_iter().next().expect("one place")
    }

    #[test]
    fn cafe_scenario_matches_expected_output() {
        let raw = parse(json!({
            "status": "OK",
            "results": [{
                "name": "Cafe X",
                "formatted_address": "1 Main St",
                "rating": 0,
                "business_status": "OPERATIONAL"
            }],
            "next_page_token": ""
        }));

        let result = normalize_places(raw).expect("normalizes");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "places": [{
                    "name": "Cafe X",
                    "address": "1 Main St",
                    "rating": "Not rated",
                    "totalRatings": 0,
                    "isOpen": "Hours not available",
                    "isOperational": true,
                    "hasPhotos": false
                }],
                "nextPageToken": null
            })
        );
    }

    #[test]
    fn zero_results_yields_none() {
        assert!(normalize_places(parse(json!({"status": "ZERO_RESULTS"}))).is_none());
    }

    #[test]
    fn ok_without_results_list_yields_none() {
        assert!(normalize_places(parse(json!({"status": "OK"}))).is_none());
    }

    #[test]
    fn null_text_fields_decode_as_empty() {
        let place = single_place(json!({"name": null, "formatted_address": null, "rating": null}));
        assert_eq!(place.name, "");
        assert_eq!(place.address, "");
        assert_eq!(place.rating, Rating::NotRated);
        assert!(normalize_places(parse(json!({"status": "OK", "results": null}))).is_none());
    }

    #[test]
    fn ok_with_empty_results_yields_empty_list() {
        let result = normalize_places(parse(json!({"status": "OK", "results": []}))).unwrap();
        assert!(result.places.is_empty());
        assert_eq!(result.next_page_token, None);
    }

    #[test]
    fn rating_resolution() {
        assert_eq!(Rating::from_upstream(None), Rating::NotRated);
        assert_eq!(Rating::from_upstream(Some(0.0)), Rating::NotRated);
        assert_eq!(Rating::from_upstream(Some(f64::NAN)), Rating::NotRated);
        assert_eq!(Rating::from_upstream(Some(4.6)), Rating::Score(4.6));

        assert_eq!(serde_json::to_value(Rating::Score(4.5)).unwrap(), json!(4.5));
        assert_eq!(serde_json::to_value(Rating::NotRated).unwrap(), json!("Not rated"));
    }

    #[test]
    fn rated_place_keeps_numeric_rating_and_count() {
        let place = single_place(json!({
            "name": "Bistro",
            "formatted_address": "2 High St",
            "rating": 4.4,
            "user_ratings_total": 1287
        }));
        assert_eq!(place.rating, Rating::Score(4.4));
        assert_eq!(place.total_ratings, 1287);
        assert!(!place.is_operational);
    }

    #[test]
    fn open_status_derivation() {
        let hours = |value: Value| single_place(json!({"name": "P", "opening_hours": value})).is_open;
        assert_eq!(hours(json!({"open_now": true})), OpenStatus::OpenNow);
        assert_eq!(hours(json!({"open_now": false})), OpenStatus::Closed);
        assert_eq!(hours(json!({})), OpenStatus::Closed);
        assert_eq!(
            single_place(json!({"name": "P"})).is_open,
            OpenStatus::HoursNotAvailable
        );
    }

    #[test]
    fn operational_requires_exact_status() {
        let status = |value: &str| {
            single_place(json!({"name": "P", "business_status": value})).is_operational
        };
        assert!(status("OPERATIONAL"));
        assert!(!status("CLOSED_TEMPORARILY"));
        assert!(!status("operational"));
    }

    #[test]
    fn photos_flag_requires_non_empty_list() {
        let with = |photos: Value| single_place(json!({"name": "P", "photos": photos})).has_photos;
        assert!(with(json!([{"photo_reference": "abc", "height": 100, "width": 200}])));
        assert!(!with(json!([])));
        assert!(!with(Value::Null));
    }

    #[test]
    fn link_built_from_place_id() {
        let place = single_place(json!({"name": "P", "place_id": "ChIJN1t_tDeuEmsRUsoyG83frY4"}));
        assert_eq!(
            place.link.as_deref(),
            Some("https://www.google.com/maps/place/?q=place_id:ChIJN1t_tDeuEmsRUsoyG83frY4")
        );

        let place = single_place(json!({"name": "P", "place_id": ""}));
        assert!(place.link.is_none());
    }

    #[test]
    fn next_page_token_passes_through() {
        let result = normalize_places(parse(json!({
            "status": "OK",
            "results": [],
            "next_page_token": "AcYSjRg"
        })))
        .unwrap();
        assert_eq!(result.next_page_token.as_deref(), Some("AcYSjRg"));
    }

    #[test]
    fn order_is_preserved() {
        let result = normalize_places(parse(json!({
            "status": "OK",
            "results": [{"name": "First"}, {"name": "Second"}, {"name": "Third"}]
        })))
        .unwrap();
        let names: Vec<_> = result.places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
