use serde::Deserialize;

use crate::models::Landmark;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub min_rating: f64,
    pub status_filters: Vec<String>,
    // Only `Some(true)` filters; `Some(false)` and `None` both mean "don't care".
    pub is_featured: Option<bool>,
    pub is_trending: Option<bool>,
}

impl FilterOptions {
    pub fn is_active(&self) -> bool {
        self.min_rating > 0.0
            || !self.status_filters.is_empty()
            || self.is_featured == Some(true)
            || self.is_trending == Some(true)
    }

    pub fn reset(&mut self) {
        *self = FilterOptions::default();
    }

    pub fn passes(&self, landmark: &Landmark) -> bool {
        if self.min_rating > 0.0 && landmark.rating < self.min_rating {
            return false;
        }
        if !self.status_filters.is_empty() && !self.status_filters.contains(&landmark.status) {
            return false;
        }
        if self.is_featured == Some(true) && !landmark.is_featured {
            return false;
        }
        if self.is_trending == Some(true) && !landmark.is_trending {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MapFilterOptions {
    pub categories: Vec<String>,
    pub max_distance_km: Option<f64>,
    pub min_rating: f64,
    pub featured_only: bool,
    pub trending_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl MapFilterOptions {
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || self.max_distance_km.is_some()
            || self.min_rating > 0.0
            || self.featured_only
            || self.trending_only
    }

    pub fn reset(&mut self) {
        *self = MapFilterOptions::default();
    }

    pub fn passes(&self, landmark: &Landmark, user_location: Option<GeoPoint>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&landmark.category) {
            return false;
        }
        if let (Some(max_km), Some(user)) = (self.max_distance_km, user_location) {
            if distance_to(user, landmark) > max_km {
                return false;
            }
        }
        if self.min_rating > 0.0 && landmark.rating < self.min_rating {
            return false;
        }
        if self.featured_only && !landmark.is_featured {
            return false;
        }
        if self.trending_only && !landmark.is_trending {
            return false;
        }
        true
    }
}

pub fn distance_to(from: GeoPoint, landmark: &Landmark) -> f64 {
    haversine_km(
        from.latitude,
        from.longitude,
        landmark.location.latitude,
        landmark.location.longitude,
    )
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let to_rad = |deg: f64| deg.to_radians();
    let dlat = to_rad(lat2 - lat1);
    let dlon = to_rad(lon2 - lon1);
    let a = (dlat / 2.0).sin().powi(2)
        + to_rad(lat1).cos() * to_rad(lat2).cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    6371.0 * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LandmarkLocation;
    use approx::assert_relative_eq;

    fn rated(rating: f64, featured: bool) -> Landmark {
        Landmark {
            rating,
            is_featured: featured,
            ..Landmark::default()
        }
    }

    #[test]
    fn default_filter_accepts_everything() {
        let filter = FilterOptions::default();
        assert!(!filter.is_active());
        assert!(filter.passes(&Landmark::default()));
        assert!(filter.passes(&rated(5.0, true)));
    }

    #[test]
    fn rating_floor_rejects_only_lower_ratings() {
        let filter = FilterOptions {
            min_rating: 4.0,
            ..FilterOptions::default()
        };
        assert!(!filter.passes(&rated(3.99, false)));
        assert!(filter.passes(&rated(4.0, false)));
        assert!(filter.passes(&rated(4.8, false)));
        assert!(!filter.passes(&Landmark::default()));
    }

    #[test]
    fn featured_and_rating_are_conjunctive() {
        let filter = FilterOptions {
            min_rating: 4.5,
            is_featured: Some(true),
            ..FilterOptions::default()
        };
        assert!(filter.passes(&rated(4.7, true)));
        assert!(!filter.passes(&rated(4.7, false)));
    }

    #[test]
    fn explicit_false_never_filters() {
        let filter = FilterOptions {
            is_featured: Some(false),
            is_trending: Some(false),
            ..FilterOptions::default()
        };
        assert!(!filter.is_active());
        assert!(filter.passes(&rated(1.0, true)));
    }

    #[test]
    fn status_set_restricts_when_non_empty() {
        let mut filter = FilterOptions {
            status_filters: vec!["Open".into(), "Restored".into()],
            ..FilterOptions::default()
        };
        let open = Landmark {
            status: "Open".into(),
            ..Landmark::default()
        };
        let ruined = Landmark {
            status: "Ruins".into(),
            ..Landmark::default()
        };
        assert!(filter.passes(&open));
        assert!(!filter.passes(&ruined));

        filter.reset();
        assert_eq!(filter, FilterOptions::default());
        assert!(filter.passes(&ruined));
    }

    fn at(lat: f64, lon: f64, category: &str) -> Landmark {
        Landmark {
            category: category.into(),
            location: LandmarkLocation {
                latitude: lat,
                longitude: lon,
                ..LandmarkLocation::default()
            },
            ..Landmark::default()
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Deir ez-Zor to Raqqa.
        let km = haversine_km(35.3359, 40.1408, 35.9594, 39.0079);
        assert_relative_eq!(km, 123.6, epsilon = 0.5);
        assert_relative_eq!(haversine_km(35.0, 40.0, 35.0, 40.0), 0.0);
    }

    #[test]
    fn map_distance_is_skipped_without_user_location() {
        let filter = MapFilterOptions {
            max_distance_km: Some(10.0),
            ..MapFilterOptions::default()
        };
        let far = at(35.9594, 39.0079, "Historical");
        let user = GeoPoint {
            latitude: 35.3359,
            longitude: 40.1408,
        };
        assert!(filter.passes(&far, None));
        assert!(!filter.passes(&far, Some(user)));

        let wide = MapFilterOptions {
            max_distance_km: Some(200.0),
            ..MapFilterOptions::default()
        };
        assert!(wide.passes(&far, Some(user)));
    }

    #[test]
    fn map_categories_use_exact_membership() {
        let filter = MapFilterOptions {
            categories: vec!["Historical".into()],
            ..MapFilterOptions::default()
        };
        assert!(filter.is_active());
        assert!(filter.passes(&at(1.0, 1.0, "Historical"), None));
        assert!(!filter.passes(&at(1.0, 1.0, "historical"), None));
        assert!(!filter.passes(&at(1.0, 1.0, "Nature"), None));
    }
}
