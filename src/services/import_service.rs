use tracing::{info, warn};
use uuid::Uuid;

use crate::database::LandmarkStore;
use crate::error::AppResult;
use crate::models::Landmark;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub fn parse_landmarks(raw: &str) -> Result<Vec<Landmark>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub async fn import_landmarks(
    store: &dyn LandmarkStore,
    landmarks: Vec<Landmark>,
    now_ms: i64,
) -> AppResult<ImportReport> {
    let mut report = ImportReport::default();

    for mut landmark in landmarks {
        if landmark.name.trim().is_empty() {
            warn!("Skipping landmark without a name (id={:?})", landmark.id);
            report.skipped += 1;
            continue;
        }
        if landmark.id.trim().is_empty() {
            landmark.id = Uuid::new_v4().to_string();
        }
        landmark.review_count = landmark.review_count.max(0);
        landmark.updated_at = now_ms;

        let existing = store.find_landmark(&landmark.id).await?;
        let result = match existing {
            Some(current) => {
                landmark.created_at = current.created_at;
                store.update_landmark(&landmark).await.map(|_| true)
            }
            None => {
                if landmark.created_at == 0 {
                    landmark.created_at = now_ms;
                }
                store.insert_landmark(&landmark).await.map(|_| false)
            }
        };

        match result {
            Ok(true) => report.updated += 1,
            Ok(false) => report.inserted += 1,
            Err(e) => {
                warn!("Import of landmark {} failed: {}", landmark.id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Landmark import: inserted={}, updated={}, skipped={}, failed={}",
        report.inserted, report.updated, report.skipped, report.failed
    );
    Ok(report)
}
