use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub name_arabic: String,
    pub category: String,
    pub category_arabic: String,
    pub description: String,
    pub description_arabic: String,
    pub long_description: String,
    pub long_description_arabic: String,
    pub image_url: String,
    pub location: LandmarkLocation,
    pub details: BTreeMap<String, Value>,
    pub rating: f64,
    pub review_count: i64,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_historical: bool,
    pub tags: Vec<String>,
    pub tags_arabic: Vec<String>,
    pub status: String,
    pub status_arabic: String,
    pub visiting_hours: String,
    pub entry_fee: String,
    pub best_time_to_visit: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LandmarkLocation {
    pub city: String,
    pub city_arabic: String,
    pub governorate: String,
    pub governorate_arabic: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LandmarkLocation {
    // `(0.0, 0.0)` marks coordinates that were never filled in.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }
}

impl Landmark {
    pub fn has_coordinates(&self) -> bool {
        self.location.has_coordinates()
    }

    pub fn badge_text(&self) -> String {
        let unesco = self
            .details
            .get("unescoStatus")
            .map(value_to_text)
            .is_some_and(|s| s.contains("UNESCO"));
        if unesco {
            return "UNESCO WORLD HERITAGE".to_string();
        }
        if self.category.eq_ignore_ascii_case("Archaeological")
            || self.category.eq_ignore_ascii_case("Historical")
        {
            return self.status.to_uppercase();
        }
        String::new()
    }

    pub fn formatted_review_count(&self) -> String {
        if self.review_count >= 1000 {
            format!("{:.1}k reviews", self.review_count as f64 / 1000.0)
        } else if self.review_count > 0 {
            format!("{} reviews", self.review_count)
        } else {
            String::new()
        }
    }

    pub fn detail_text(&self, key: &str) -> String {
        self.details
            .get(key)
            .map(value_to_text)
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn maps_url(&self) -> String {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            self.location.latitude, self.location.longitude
        )
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewLandmark {
    pub name: String,
    pub name_arabic: String,
    pub category: String,
    pub category_arabic: String,
    pub description: String,
    pub description_arabic: String,
    pub long_description: String,
    pub long_description_arabic: String,
    pub image_url: String,
    pub location: LandmarkLocation,
    pub details: BTreeMap<String, Value>,
    pub rating: f64,
    pub review_count: i64,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_historical: bool,
    pub tags: Vec<String>,
    pub tags_arabic: Vec<String>,
    pub status: String,
    pub status_arabic: String,
    pub visiting_hours: String,
    pub entry_fee: String,
    pub best_time_to_visit: String,
}

impl NewLandmark {
    pub fn into_landmark(self, id: String, now_ms: i64) -> Landmark {
        Landmark {
            id,
            name: self.name,
            name_arabic: self.name_arabic,
            category: self.category,
            category_arabic: self.category_arabic,
            description: self.description,
            description_arabic: self.description_arabic,
            long_description: self.long_description,
            long_description_arabic: self.long_description_arabic,
            image_url: self.image_url,
            location: self.location,
            details: self.details,
            rating: self.rating,
            review_count: self.review_count.max(0),
            is_featured: self.is_featured,
            is_trending: self.is_trending,
            is_historical: self.is_historical,
            tags: self.tags,
            tags_arabic: self.tags_arabic,
            status: self.status,
            status_arabic: self.status_arabic,
            visiting_hours: self.visiting_hours,
            entry_fee: self.entry_fee,
            best_time_to_visit: self.best_time_to_visit,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

// Flat row shape of the `landmarks` table; list and map columns hold JSON text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LandmarkRow {
    pub id: String,
    pub name: Option<String>,
    pub name_arabic: Option<String>,
    pub category: Option<String>,
    pub category_arabic: Option<String>,
    pub description: Option<String>,
    pub description_arabic: Option<String>,
    pub long_description: Option<String>,
    pub long_description_arabic: Option<String>,
    pub image_url: Option<String>,
    pub city: Option<String>,
    pub city_arabic: Option<String>,
    pub governorate: Option<String>,
    pub governorate_arabic: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub details: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub is_featured: Option<i64>,
    pub is_trending: Option<i64>,
    pub is_historical: Option<i64>,
    pub tags: Option<String>,
    pub tags_arabic: Option<String>,
    pub status: Option<String>,
    pub status_arabic: Option<String>,
    pub visiting_hours: Option<String>,
    pub entry_fee: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl From<LandmarkRow> for Landmark {
    fn from(row: LandmarkRow) -> Self {
        Landmark {
            id: row.id,
            name: row.name.unwrap_or_default(),
            name_arabic: row.name_arabic.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            category_arabic: row.category_arabic.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            description_arabic: row.description_arabic.unwrap_or_default(),
            long_description: row.long_description.unwrap_or_default(),
            long_description_arabic: row.long_description_arabic.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            location: LandmarkLocation {
                city: row.city.unwrap_or_default(),
                city_arabic: row.city_arabic.unwrap_or_default(),
                governorate: row.governorate.unwrap_or_default(),
                governorate_arabic: row.governorate_arabic.unwrap_or_default(),
                region: row.region.unwrap_or_default(),
                latitude: row.latitude.unwrap_or(0.0),
                longitude: row.longitude.unwrap_or(0.0),
            },
            details: parse_json_or_default(row.details.as_deref()),
            rating: row.rating.unwrap_or(0.0),
            review_count: row.review_count.unwrap_or(0).max(0),
            is_featured: row.is_featured.unwrap_or(0) == 1,
            is_trending: row.is_trending.unwrap_or(0) == 1,
            is_historical: row.is_historical.unwrap_or(0) == 1,
            tags: parse_json_or_default(row.tags.as_deref()),
            tags_arabic: parse_json_or_default(row.tags_arabic.as_deref()),
            status: row.status.unwrap_or_default(),
            status_arabic: row.status_arabic.unwrap_or_default(),
            visiting_hours: row.visiting_hours.unwrap_or_default(),
            entry_fee: row.entry_fee.unwrap_or_default(),
            best_time_to_visit: row.best_time_to_visit.unwrap_or_default(),
            created_at: row.created_at.unwrap_or(0),
            updated_at: row.updated_at.unwrap_or(0),
        }
    }
}

fn parse_json_or_default<T: serde::de::DeserializeOwned + Default>(raw: Option<&str>) -> T {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return T::default();
    };
    serde_json::from_str(raw).unwrap_or_default()
}
