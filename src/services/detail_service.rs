use serde::{Deserialize, Serialize};

use crate::database::{LandmarkStore, SavedLandmarkStore};
use crate::error::{AppError, AppResult};
use crate::models::Landmark;

#[derive(Debug, Deserialize, Default)]
pub struct DetailQuery {
    pub lang: Option<String>,
}

impl DetailQuery {
    pub fn is_arabic(&self) -> bool {
        self.lang
            .as_deref()
            .is_some_and(|l| l.trim().eq_ignore_ascii_case("ar"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPage {
    pub landmark: Landmark,
    pub is_bookmarked: bool,
    pub title: String,
    pub subtitle: String,
    pub category_label: String,
    pub location_label: String,
    pub description: String,
    pub badge_text: String,
    pub review_summary: String,
    pub year_built: String,
    pub elevation: String,
    pub material: String,
    pub maps_url: String,
}

fn short_count(count: i64) -> String {
    if count >= 1000 {
        format!("{:.1}k", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}

pub fn detail_page(landmark: Landmark, is_bookmarked: bool, arabic: bool) -> DetailPage {
    let (title, subtitle, category_label, location_label, description) = if arabic {
        (
            landmark.name_arabic.clone(),
            landmark.name.clone(),
            format!("موقع {}", landmark.category_arabic),
            format!(
                "{}, {}",
                landmark.location.city_arabic, landmark.location.governorate_arabic
            ),
            landmark.long_description_arabic.clone(),
        )
    } else {
        (
            landmark.name.clone(),
            landmark.name_arabic.clone(),
            format!("{} SITE", landmark.category.to_uppercase()),
            format!(
                "{}, {}",
                landmark.location.city, landmark.location.governorate
            ),
            landmark.long_description.clone(),
        )
    };

    DetailPage {
        title,
        subtitle,
        category_label,
        location_label,
        description,
        is_bookmarked,
        badge_text: landmark.badge_text(),
        review_summary: format!("Based on {} reviews", short_count(landmark.review_count)),
        year_built: landmark.detail_text("yearBuilt"),
        elevation: landmark.detail_text("elevation"),
        material: landmark.detail_text("material"),
        maps_url: landmark.maps_url(),
        landmark,
    }
}

pub async fn build_detail_page(
    landmarks: &dyn LandmarkStore,
    saved: &dyn SavedLandmarkStore,
    viewer_id: &str,
    landmark_id: &str,
    query: &DetailQuery,
) -> AppResult<DetailPage> {
    let landmark = landmarks
        .find_landmark(landmark_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("landmark {}", landmark_id)))?;
    let is_bookmarked = saved.is_saved(viewer_id, landmark_id).await?;
    Ok(detail_page(landmark, is_bookmarked, query.is_arabic()))
}
