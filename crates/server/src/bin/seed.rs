//! Demo-data seeder entry point.
//!
//! Drops and recreates the schema, then inserts the deterministic demo
//! dataset. Destroys all existing data; dev and demo use only.
//!
//! Run:
//!   cargo run --bin seed

use std::sync::Arc;

use anyhow::Context;
use carelink_common::Config;
use carelink_core::SeedService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carelink=info".into()),
        )
        .init();

    let config = Config::load().context("failed to load configuration")?;

    let db = carelink_db::init(&config)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    let summary = SeedService::new(Arc::new(db))
        .run()
        .await
        .context("seed run failed")?;

    println!("Database reset complete.");
    println!("Demo users:");
    println!("  - admin@test.com / 1234 (UserAdmin)");
    println!("  - csr@test.com   / 1234 (CSRRep)");
    println!("  - pin@test.com   / 1234 (PersonInNeed)");
    println!("  - pm@test.com    / 1234 (PlatformManager)");
    println!("Extra users:");
    println!("  - 10 CSR users   (csr+01@test.com .. csr+10@test.com)");
    println!("  - 10 PIN users   (pin+01@test.com .. pin+10@test.com)");
    println!("Categories: Transportation, Medical Aid, Food Support");
    println!(
        "Requests created: {} ({} open / {} closed)",
        summary.requests, summary.open_requests, summary.closed_requests
    );
    println!("Shortlists created: {}", summary.shortlists);
    println!("MatchRecords created: {}", summary.match_records);
    println!("Reports created: {}", summary.reports);

    Ok(())
}
