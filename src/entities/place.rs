use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;
use crate::error::Error;
use crate::external::google_maps::extract_coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beach,
    Restaurant,
    Heritage,
    Shopping,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Beach => "beach",
            Self::Restaurant => "restaurant",
            Self::Heritage => "heritage",
            Self::Shopping => "shopping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beach" => Ok(Self::Beach),
            "restaurant" => Ok(Self::Restaurant),
            "heritage" => Ok(Self::Heritage),
            "shopping" => Ok(Self::Shopping),
            _ => Err(Error::invalid_input_error(format!(
                "Invalid category '{s}': expected one of beach, restaurant, heritage, shopping"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub city: String,
    pub rating: f64,
    pub review_count: i64,
    /// Kilometres from the city centre.
    pub distance: f64,
    pub image: String,
    pub description: String,
    pub map_url: Option<String>,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    pub is_saved: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a place that does not exist yet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    pub name: String,
    pub category: Category,
    pub city: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceChanges {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub distance: Option<f64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub map_url: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub tags: Option<Vec<String>>,
}

/// The admin form. Everything is optional on the wire and checked by
/// [`PlaceSubmission::into_draft`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSubmission {
    pub name: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub map_url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaceFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl Place {
    pub fn new(draft: PlaceDraft) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            city: draft.city,
            rating: draft.rating,
            review_count: draft.review_count,
            distance: draft.distance,
            image: draft.image,
            description: draft.description,
            map_url: draft.map_url,
            coordinates: Coordinates {
                lat: draft.lat,
                lng: draft.lng,
            },
            is_saved: false,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: PlaceChanges) {
        let PlaceChanges {
            name,
            category,
            city,
            rating,
            review_count,
            distance,
            image,
            description,
            map_url,
            lat,
            lng,
            tags,
        } = changes;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(city) = city {
            self.city = city;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if let Some(review_count) = review_count {
            self.review_count = review_count;
        }
        if let Some(distance) = distance {
            self.distance = distance;
        }
        if let Some(image) = image {
            self.image = image;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if map_url.is_some() {
            self.map_url = map_url;
        }
        if let Some(lat) = lat {
            self.coordinates.lat = lat;
        }
        if let Some(lng) = lng {
            self.coordinates.lng = lng;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }

        self.updated_at = Utc::now();
    }

    /// Returns whether the flag actually changed.
    pub fn set_saved(&mut self, is_saved: bool) -> bool {
        if self.is_saved == is_saved {
            return false;
        }

        self.is_saved = is_saved;
        self.updated_at = Utc::now();
        true
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PlaceSubmission {
    /// Validates the form and resolves the coordinates from the map link.
    ///
    /// Coordinates outside [-90, 90] / [-180, 180] are refused here; the
    /// extractor itself hands them back untouched.
    #[tracing::instrument]
    pub fn into_draft(self) -> Result<PlaceDraft, Error> {
        let (name, category, city, map_url) = match (
            required(self.name),
            required(self.category),
            required(self.city),
            required(self.map_url),
        ) {
            (Some(name), Some(category), Some(city), Some(map_url)) => {
                (name, category, city, map_url)
            }
            _ => return Err(Error::missing_fields_error()),
        };

        let category: Category = category.parse()?;

        let rating = self.rating.unwrap_or(0.0);
        if !(0.0..=5.0).contains(&rating) {
            return Err(Error::invalid_input_error(format!(
                "Rating must be between 0 and 5, got {rating}"
            )));
        }

        let review_count = self.review_count.unwrap_or(0);
        if review_count < 0 {
            return Err(Error::invalid_input_error(
                "Review count cannot be negative",
            ));
        }
        if rating > 0.0 && review_count == 0 {
            return Err(Error::invalid_input_error(
                "Review count must be > 0 if rating is > 0",
            ));
        }

        if !map_url.starts_with("http") {
            return Err(Error::invalid_input_error("Map URL must be a valid URL"));
        }

        let coordinates = extract_coordinates(&map_url)?;

        if !coordinates.is_within_bounds() {
            return Err(Error::invalid_input_error(format!(
                "Coordinates out of range: lat {} must be within [-90, 90] and lng {} within [-180, 180]",
                coordinates.lat, coordinates.lng
            )));
        }

        Ok(PlaceDraft {
            name,
            category,
            city,
            rating,
            review_count,
            distance: 0.0,
            image: self.image.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            map_url: Some(map_url),
            lat: coordinates.lat,
            lng: coordinates.lng,
            tags: vec![],
        })
    }
}

impl PlaceFilter {
    pub fn matches(&self, place: &Place) -> bool {
        let matches_category = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(category) if category.eq_ignore_ascii_case("all") => true,
            Some(category) => place.category.name().eq_ignore_ascii_case(category),
        };

        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(search) => {
                let search = search.to_lowercase();
                place.name.to_lowercase().contains(&search)
                    || place.category.name().contains(&search)
                    || place.city.to_lowercase().contains(&search)
            }
        };

        matches_category && matches_search
    }
}
