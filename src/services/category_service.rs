use serde::Serialize;

use crate::models::Landmark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCategory {
    HistoricalSites,
    NatureRivers,
    LocalCulture,
    Museums,
    Cuisine,
    Handicrafts,
    Unknown,
}

pub const BROWSE_CATEGORIES: [BrowseCategory; 6] = [
    BrowseCategory::HistoricalSites,
    BrowseCategory::NatureRivers,
    BrowseCategory::LocalCulture,
    BrowseCategory::Museums,
    BrowseCategory::Cuisine,
    BrowseCategory::Handicrafts,
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCard {
    pub id: &'static str,
    pub name: &'static str,
    pub name_arabic: &'static str,
}

impl BrowseCategory {
    pub fn from_id(id: &str) -> BrowseCategory {
        match id.trim() {
            "historical_sites" => BrowseCategory::HistoricalSites,
            "nature_rivers" => BrowseCategory::NatureRivers,
            "local_culture" => BrowseCategory::LocalCulture,
            "museums" => BrowseCategory::Museums,
            "cuisine" => BrowseCategory::Cuisine,
            "handicrafts" => BrowseCategory::Handicrafts,
            _ => BrowseCategory::Unknown,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            BrowseCategory::HistoricalSites => "historical_sites",
            BrowseCategory::NatureRivers => "nature_rivers",
            BrowseCategory::LocalCulture => "local_culture",
            BrowseCategory::Museums => "museums",
            BrowseCategory::Cuisine => "cuisine",
            BrowseCategory::Handicrafts => "handicrafts",
            BrowseCategory::Unknown => "unknown",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BrowseCategory::HistoricalSites => "Historical Sites",
            BrowseCategory::NatureRivers => "Nature & Rivers",
            BrowseCategory::LocalCulture => "Local Culture",
            BrowseCategory::Museums => "Museums",
            BrowseCategory::Cuisine => "Cuisine",
            BrowseCategory::Handicrafts => "Handicrafts",
            BrowseCategory::Unknown => "All Landmarks",
        }
    }

    pub fn display_name_arabic(self) -> &'static str {
        match self {
            BrowseCategory::HistoricalSites => "المواقع التاريخية",
            BrowseCategory::NatureRivers => "الطبيعة والأنهار",
            BrowseCategory::LocalCulture => "الثقافة المحلية",
            BrowseCategory::Museums => "المتاحف",
            BrowseCategory::Cuisine => "المطبخ",
            BrowseCategory::Handicrafts => "الحرف اليدوية",
            BrowseCategory::Unknown => "جميع المعالم",
        }
    }

    // Case-insensitive substring heuristics over category, tags, name and the
    // historical flag. Substring hits such as "agriculture" for "culture" count.
    pub fn matches(self, landmark: &Landmark) -> bool {
        let name = landmark.name.to_lowercase();
        let tags: Vec<String> = landmark.tags.iter().map(|t| t.to_lowercase()).collect();
        let any_tag = |needles: &[&str]| {
            tags.iter()
                .any(|tag| needles.iter().any(|needle| tag.contains(needle)))
        };

        match self {
            BrowseCategory::HistoricalSites => {
                landmark.category.eq_ignore_ascii_case("Historical")
                    || landmark.category.eq_ignore_ascii_case("Archaeological")
                    || landmark.is_historical
            }
            BrowseCategory::NatureRivers => {
                any_tag(&["river", "lake", "nature"])
                    || name.contains("river")
                    || name.contains("lake")
            }
            BrowseCategory::LocalCulture => any_tag(&["culture", "traditional", "local"]),
            BrowseCategory::Museums => any_tag(&["museum"]) || name.contains("museum"),
            BrowseCategory::Cuisine => any_tag(&["food", "cuisine", "dish"]),
            BrowseCategory::Handicrafts => any_tag(&["craft", "artisan", "traditional art"]),
            BrowseCategory::Unknown => true,
        }
    }

    pub fn card(self) -> CategoryCard {
        CategoryCard {
            id: self.id(),
            name: self.display_name(),
            name_arabic: self.display_name_arabic(),
        }
    }
}

pub fn classify(landmark: &Landmark, category_id: &str) -> bool {
    BrowseCategory::from_id(category_id).matches(landmark)
}

pub fn category_cards() -> Vec<CategoryCard> {
    BROWSE_CATEGORIES.iter().map(|c| c.card()).collect()
}
