use crate::models::Landmark;

pub const ALL_CATEGORIES: &str = "All";

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn category_list_search(landmarks: &[Landmark], query: &str) -> Vec<Landmark> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return landmarks.to_vec();
    }

    landmarks
        .iter()
        .filter(|l| {
            contains_ci(&l.name, &q)
                || contains_ci(&l.description, &q)
                || contains_ci(&l.location.city, &q)
                || contains_ci(&l.location.governorate, &q)
                || l.tags.iter().any(|t| contains_ci(t, &q))
        })
        .cloned()
        .collect()
}

pub fn matches_standalone_query(landmark: &Landmark, query_lower: &str) -> bool {
    contains_ci(&landmark.name, query_lower)
        || contains_ci(&landmark.name_arabic, query_lower)
        || contains_ci(&landmark.location.city, query_lower)
        || contains_ci(&landmark.location.governorate, query_lower)
        || contains_ci(&landmark.description, query_lower)
        || landmark.tags.iter().any(|t| contains_ci(t, query_lower))
}

pub fn standalone_search(
    landmarks: &[Landmark],
    query: &str,
    category: Option<&str>,
) -> Vec<Landmark> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));

    landmarks
        .iter()
        .filter(|l| matches_standalone_query(l, &q))
        .filter(|l| category.map_or(true, |c| l.category.eq_ignore_ascii_case(c)))
        .cloned()
        .collect()
}

// Highest rating first. `sort_by` is stable, so equal ratings keep fetch order.
pub fn sort_by_rating_desc(landmarks: &mut [Landmark]) {
    landmarks.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

pub fn name_or_city_search(landmarks: &[Landmark], query: &str) -> Vec<Landmark> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return landmarks.to_vec();
    }
    landmarks
        .iter()
        .filter(|l| contains_ci(&l.name, &q) || contains_ci(&l.location.city, &q))
        .cloned()
        .collect()
}

pub fn category_equals(landmarks: &[Landmark], category: &str) -> Vec<Landmark> {
    landmarks
        .iter()
        .filter(|l| l.category.eq_ignore_ascii_case(category.trim()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LandmarkLocation;

    fn landmark(id: &str, name: &str, rating: f64) -> Landmark {
        Landmark {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            ..Landmark::default()
        }
    }

    fn ids(list: &[Landmark]) -> Vec<&str> {
        list.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn empty_query_differs_per_screen() {
        let list = vec![landmark("a", "Rasafa", 4.0), landmark("b", "Halabiye", 3.0)];
        assert_eq!(ids(&category_list_search(&list, "")), vec!["a", "b"]);
        assert_eq!(ids(&category_list_search(&list, "   ")), vec!["a", "b"]);
        assert!(standalone_search(&list, "", None).is_empty());
        assert!(standalone_search(&list, "  ", Some("All")).is_empty());
    }

    #[test]
    fn query_matches_tag_substring() {
        let mut euphrates = landmark("e", "Euphrates", 4.5);
        euphrates.tags = vec!["Euphrates".into(), "river bank".into()];
        let list = vec![euphrates, landmark("x", "Citadel", 4.0)];

        assert_eq!(ids(&category_list_search(&list, "river")), vec!["e"]);
        assert_eq!(ids(&standalone_search(&list, "RIVER", None)), vec!["e"]);
    }

    #[test]
    fn standalone_search_covers_arabic_name_and_location() {
        let mut jabar = landmark("j", "Qal'at Ja'bar", 4.6);
        jabar.name_arabic = "قلعة جعبر".into();
        jabar.location = LandmarkLocation {
            city: "Tabqa".into(),
            governorate: "Raqqa".into(),
            ..LandmarkLocation::default()
        };
        let list = vec![jabar];

        assert_eq!(ids(&standalone_search(&list, "جعبر", None)), vec!["j"]);
        assert_eq!(ids(&standalone_search(&list, "tabqa", None)), vec!["j"]);
        assert_eq!(ids(&standalone_search(&list, "raqqa", None)), vec!["j"]);
        assert!(standalone_search(&list, "palmyra", None).is_empty());
    }

    #[test]
    fn category_chip_is_equality_not_substring() {
        let mut castle = landmark("c", "Castle", 4.0);
        castle.category = "Historical".into();
        let mut lake = landmark("l", "Castle Lake", 4.0);
        lake.category = "Historical Nature".into();
        let list = vec![castle, lake];

        assert_eq!(
            ids(&standalone_search(&list, "castle", Some("historical"))),
            vec!["c"]
        );
        assert_eq!(ids(&standalone_search(&list, "castle", Some("All"))), vec!["c", "l"]);
        assert_eq!(ids(&standalone_search(&list, "castle", None)), vec!["c", "l"]);
    }

    #[test]
    fn rating_sort_is_stable() {
        let mut list = vec![
            landmark("low", "A", 4.2),
            landmark("first", "B", 4.9),
            landmark("second", "C", 4.9),
        ];
        sort_by_rating_desc(&mut list);
        assert_eq!(ids(&list), vec!["first", "second", "low"]);
    }

    #[test]
    fn name_or_city_search_and_category_chip() {
        let mut a = landmark("a", "Mari", 4.0);
        a.location.city = "Abu Kamal".into();
        a.category = "Archaeological".into();
        let mut b = landmark("b", "Dura-Europos", 4.0);
        b.location.city = "Salhiyah".into();
        b.category = "Historical".into();
        let list = vec![a, b];

        assert_eq!(ids(&name_or_city_search(&list, "kamal")), vec!["a"]);
        assert_eq!(ids(&name_or_city_search(&list, "europos")), vec!["b"]);
        assert_eq!(ids(&name_or_city_search(&list, "")), vec!["a", "b"]);
        assert_eq!(ids(&category_equals(&list, "historical")), vec!["b"]);
    }
}
