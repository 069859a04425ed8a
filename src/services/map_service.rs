use serde::{Deserialize, Serialize};

use crate::database::LandmarkStore;
use crate::error::AppResult;
use crate::models::Landmark;
use crate::services::filter_service::{self, GeoPoint, MapFilterOptions};
use crate::services::search_service;

// The distance slider tops out here; at the top it means "any distance".
pub const MAX_DISTANCE_SLIDER_KM: f64 = 100.0;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub q: Option<String>,
    pub chip: Option<String>,
    pub categories: Option<String>,
    pub max_distance_km: Option<f64>,
    pub min_rating: Option<f64>,
    pub featured_only: Option<bool>,
    pub trending_only: Option<bool>,
}

impl MapQuery {
    pub fn user_location(&self) -> Option<GeoPoint> {
        self.lat.zip(self.lon).map(|(latitude, longitude)| GeoPoint {
            latitude,
            longitude,
        })
    }

    pub fn filter_options(&self) -> MapFilterOptions {
        MapFilterOptions {
            categories: self
                .categories
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            max_distance_km: self
                .max_distance_km
                .filter(|km| *km >= 0.0 && *km < MAX_DISTANCE_SLIDER_KM),
            min_rating: self.min_rating.unwrap_or(0.0).max(0.0),
            featured_only: self.featured_only.unwrap_or(false),
            trending_only: self.trending_only.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub distance_km: Option<f64>,
    pub distance_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPage {
    pub markers: Vec<MapMarker>,
    pub filter_active: bool,
    pub user_location_known: bool,
}

pub fn distance_label(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{:.1} km away", km),
        None => "Distance unknown".to_string(),
    }
}

fn marker(landmark: Landmark, user: Option<GeoPoint>) -> MapMarker {
    let distance_km = user.map(|u| filter_service::distance_to(u, &landmark));
    MapMarker {
        distance_label: distance_label(distance_km),
        distance_km,
        id: landmark.id,
        name: landmark.name,
        description: landmark.description,
        category: landmark.category,
        image_url: landmark.image_url,
        latitude: landmark.location.latitude,
        longitude: landmark.location.longitude,
        rating: landmark.rating,
    }
}

pub fn map_markers(landmarks: Vec<Landmark>, query: &MapQuery) -> Vec<MapMarker> {
    let user = query.user_location();
    let filter = query.filter_options();

    let mut visible: Vec<Landmark> = landmarks
        .into_iter()
        .filter(|l| l.has_coordinates())
        .filter(|l| filter.passes(l, user))
        .collect();

    if let Some(chip) = query.chip.as_deref().filter(|c| !c.trim().is_empty()) {
        visible = search_service::category_equals(&visible, chip);
    }
    if let Some(q) = query.q.as_deref() {
        visible = search_service::name_or_city_search(&visible, q);
    }

    visible.into_iter().map(|l| marker(l, user)).collect()
}

pub async fn build_map_page(store: &dyn LandmarkStore, query: &MapQuery) -> AppResult<MapPage> {
    let landmarks = store.list_landmarks().await?;
    Ok(MapPage {
        markers: map_markers(landmarks, query),
        filter_active: query.filter_options().is_active(),
        user_location_known: query.user_location().is_some(),
    })
}
