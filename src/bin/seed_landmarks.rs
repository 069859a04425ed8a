use dotenvy::dotenv;
use std::env;
use std::fs;

use eastsyria::database::SqliteStore;
use eastsyria::services::{import_service, now_ms};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: seed_landmarks <landmarks.json>");
        std::process::exit(2);
    };
    let Ok(db_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL must be set (in the environment or .env)");
        std::process::exit(2);
    };

    let landmarks = match fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|raw| import_service::parse_landmarks(&raw).map_err(|e| e.to_string()))
    {
        Ok(list) => list,
        Err(e) => {
            eprintln!("could not read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let store = match SqliteStore::connect(&db_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("could not open {}: {}", db_url, e);
            std::process::exit(1);
        }
    };

    match import_service::import_landmarks(&store, landmarks, now_ms()).await {
        Ok(report) => {
            println!(
                "landmark seed: inserted={}, updated={}, skipped={}, failed={}",
                report.inserted, report.updated, report.skipped, report.failed
            );
        }
        Err(e) => {
            eprintln!("landmark seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
