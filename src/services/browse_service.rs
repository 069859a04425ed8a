use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::database::{LandmarkStore, SavedLandmarkStore};
use crate::error::AppResult;
use crate::models::Landmark;
use crate::services::category_service::{self, BrowseCategory, CategoryCard};
use crate::services::filter_service::FilterOptions;
use crate::services::saved_service;
use crate::services::search_service;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkCard {
    #[serde(flatten)]
    pub landmark: Landmark,
    pub badge_text: String,
    pub review_count_text: String,
    pub is_bookmarked: bool,
}

impl LandmarkCard {
    pub fn new(landmark: Landmark, saved_ids: &HashSet<String>) -> Self {
        Self {
            badge_text: landmark.badge_text(),
            review_count_text: landmark.formatted_review_count(),
            is_bookmarked: saved_ids.contains(&landmark.id),
            landmark,
        }
    }
}

fn to_cards(landmarks: Vec<Landmark>, saved_ids: &HashSet<String>) -> Vec<LandmarkCard> {
    landmarks
        .into_iter()
        .map(|l| LandmarkCard::new(l, saved_ids))
        .collect()
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub q: Option<String>,
    pub min_rating: Option<f64>,
    pub status: Option<String>,
    pub featured: Option<bool>,
    pub trending: Option<bool>,
}

impl CategoryListQuery {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            min_rating: self.min_rating.unwrap_or(0.0).max(0.0),
            status_filters: self
                .status
                .as_deref()
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            is_featured: self.featured.filter(|f| *f),
            is_trending: self.trending.filter(|t| *t),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListPage {
    pub category: CategoryCard,
    pub filter_active: bool,
    pub search_query: String,
    pub items: Vec<LandmarkCard>,
}

pub fn category_list_items(
    landmarks: Vec<Landmark>,
    category: BrowseCategory,
    filter: &FilterOptions,
    query: &str,
) -> Vec<Landmark> {
    let mut in_category: Vec<Landmark> = landmarks
        .into_iter()
        .filter(|l| category.matches(l))
        .collect();
    search_service::sort_by_rating_desc(&mut in_category);

    let filtered: Vec<Landmark> = in_category
        .into_iter()
        .filter(|l| filter.passes(l))
        .collect();
    search_service::category_list_search(&filtered, query)
}

pub async fn build_category_list_page(
    landmarks: &dyn LandmarkStore,
    saved: &dyn SavedLandmarkStore,
    viewer_id: &str,
    category_id: &str,
    query: &CategoryListQuery,
) -> AppResult<CategoryListPage> {
    let category = BrowseCategory::from_id(category_id);
    let filter = query.filter_options();
    let search_query = query.q.clone().unwrap_or_default();

    let all = landmarks.list_landmarks().await?;
    let saved_ids = saved_service::saved_id_set(saved, viewer_id).await?;
    let items = category_list_items(all, category, &filter, &search_query);

    Ok(CategoryListPage {
        category: category.card(),
        filter_active: filter.is_active(),
        search_query,
        items: to_cards(items, &saved_ids),
    })
}

pub fn categories_page() -> Vec<CategoryCard> {
    category_service::category_cards()
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub query: String,
    pub category: String,
    pub results: Vec<LandmarkCard>,
    pub result_count: usize,
}

pub async fn build_search_page(
    landmarks: &dyn LandmarkStore,
    saved: &dyn SavedLandmarkStore,
    viewer_id: &str,
    query: &SearchQuery,
) -> AppResult<SearchPage> {
    let q = query.q.clone().unwrap_or_default();
    let category = query
        .category
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| search_service::ALL_CATEGORIES.to_string());

    // Nothing to show for a blank query, so skip the fetch entirely.
    if q.trim().is_empty() {
        return Ok(SearchPage {
            query: q,
            category,
            results: Vec::new(),
            result_count: 0,
        });
    }

    let all = landmarks.list_landmarks().await?;
    let saved_ids = saved_service::saved_id_set(saved, viewer_id).await?;
    let results = search_service::standalone_search(&all, &q, Some(&category));

    Ok(SearchPage {
        result_count: results.len(),
        results: to_cards(results, &saved_ids),
        query: q,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SqliteStore;

    fn landmark(id: &str, rating: f64, tags: &[&str]) -> Landmark {
        Landmark {
            id: id.to_string(),
            name: id.to_string(),
            rating,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Landmark::default()
        }
    }

    #[test]
    fn category_items_are_classified_sorted_and_filtered() {
        let list = vec![
            landmark("lake-a", 4.2, &["lake"]),
            landmark("souq", 4.9, &["food"]),
            landmark("river-b", 4.9, &["river"]),
            landmark("river-c", 4.9, &["nature"]),
        ];
        let items = category_list_items(
            list.clone(),
            BrowseCategory::NatureRivers,
            &FilterOptions::default(),
            "",
        );
        let ids: Vec<&str> = items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["river-b", "river-c", "lake-a"]);

        let floor = FilterOptions {
            min_rating: 4.5,
            ..FilterOptions::default()
        };
        let items = category_list_items(list.clone(), BrowseCategory::NatureRivers, &floor, "c");
        let ids: Vec<&str> = items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["river-c"]);
    }

    #[test]
    fn query_string_becomes_filter_options() {
        let query = CategoryListQuery {
            q: None,
            min_rating: Some(4.0),
            status: Some("Open, Restored,,".into()),
            featured: Some(false),
            trending: Some(true),
        };
        let filter = query.filter_options();
        assert_eq!(filter.min_rating, 4.0);
        assert_eq!(filter.status_filters, vec!["Open", "Restored"]);
        assert_eq!(filter.is_featured, None);
        assert_eq!(filter.is_trending, Some(true));
        assert!(!CategoryListQuery::default().filter_options().is_active());
    }

    #[tokio::test]
    async fn category_page_marks_bookmarks_per_viewer() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_landmark(&landmark("museum-1", 4.0, &["museum"])).await.unwrap();
        store.insert_landmark(&landmark("museum-2", 3.0, &["museum"])).await.unwrap();
        store.add_saved("u1", "museum-2", 10).await.unwrap();

        let page = build_category_list_page(
            &store,
            &store,
            "u1",
            "museums",
            &CategoryListQuery::default(),
        )
        .await
        .unwrap();
        assert_eq!(page.category.id, "museums");
        let flags: Vec<(&str, bool)> = page
            .items
            .iter()
            .map(|c| (c.landmark.id.as_str(), c.is_bookmarked))
            .collect();
        assert_eq!(flags, vec![("museum-1", false), ("museum-2", true)]);

        let other = build_category_list_page(
            &store,
            &store,
            "u2",
            "museums",
            &CategoryListQuery::default(),
        )
        .await
        .unwrap();
        assert!(other.items.iter().all(|c| !c.is_bookmarked));
    }

    #[tokio::test]
    async fn search_page_is_empty_for_blank_query() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_landmark(&landmark("castle", 4.0, &[])).await.unwrap();

        let blank = build_search_page(&store, &store, "u1", &SearchQuery::default())
            .await
            .unwrap();
        assert!(blank.results.is_empty());
        assert_eq!(blank.category, "All");

        let hit = build_search_page(
            &store,
            &store,
            "u1",
            &SearchQuery {
                q: Some("CAST".into()),
                category: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(hit.result_count, 1);
    }
}
