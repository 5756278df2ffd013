//! Mealscan
//!
//! Command line front end for the capture history and backend submission.
//! Capture itself happens in the camera layer; this binary lists persisted
//! captures and submits pending ones.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use mealscan::backend::NutritionEstimationClient;
use mealscan::db;
use mealscan::result::{weight_string, EntitySelection, RecognitionResultModel};
use mealscan::session::EstimateSession;
use mealscan::store::CaptureStore;

/// Get the data directory from environment or use default
fn get_data_dir() -> PathBuf {
    std::env::var("MEALSCAN_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path
        })
}

fn print_usage() {
    eprintln!("Usage: mealscan <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  history              List the capture history");
    eprintln!("  submit <session_id>  Submit a pending capture for estimation");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mealscan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    mealscan::build_info::print_startup_banner();

    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join("mealscan.db");
    eprintln!("Database path: {}", db_path.display());

    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let store = CaptureStore::open(data_dir.join("captures"), database)?;
    let client = match std::env::var("MEALSCAN_BACKEND_URL") {
        Ok(url) => NutritionEstimationClient::with_endpoint(url),
        Err(_) => NutritionEstimationClient::new(),
    };
    let token = std::env::var("MEALSCAN_TOKEN").unwrap_or_default();
    let session = EstimateSession::new(store, client, token);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("history") => {
            let captures = session.store().get_all_captures()?;
            if captures.is_empty() {
                println!("No captures recorded.");
            }
            for capture in captures {
                println!(
                    "{}  {}  {}  initial weight {}",
                    capture.session_id,
                    capture.timestamp.to_rfc3339(),
                    if capture.is_submitted {
                        "submitted"
                    } else {
                        "pending"
                    },
                    weight_string(capture.initial_weight),
                );
            }
        }
        Some("submit") => {
            let session_id: Uuid = args
                .get(2)
                .ok_or("submit requires a session id")?
                .parse()?;
            let capture = session
                .store()
                .get_capture(session_id)?
                .ok_or("no capture with that session id")?;

            let result = session.submit(&capture).await?;
            let model = RecognitionResultModel::new(result);
            if let Some(totals) = model.summary(EntitySelection::AllItems) {
                println!(
                    "{} item(s) recognized, total {} / {} carbs",
                    model.entity_count(),
                    weight_string(totals.weight),
                    weight_string(totals.carbs),
                );
            }
            for index in 0..model.entity_count() {
                if let Some(summary) = model.summary(EntitySelection::Entity(index)) {
                    println!(
                        "  {}: {}  {}  {} carbs",
                        index + 1,
                        summary.name,
                        summary.size.label(),
                        weight_string(summary.carbs),
                    );
                }
            }
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}
