// src/bin/seed_demo_data.rs

use std::env;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use multicloud_backend::error::TelemetryError;
use multicloud_backend::jobs::demo_seed::seed_window;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--days N] [--start-date ISO8601] [--end-date ISO8601]",
        program
    );
    eprintln!("Example: {} --days 14", program);
    eprintln!("Example: {} --start-date 2026-08-01T00:00:00Z --end-date 2026-08-15T00:00:00Z", program);
    std::process::exit(1);
}

/// Accepts RFC 3339 ("2026-08-01T00:00:00Z") or an offset-less
/// "2026-08-01T00:00:00", which is read as UTC.
fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,multicloud_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let mut days: i64 = 30;
    let mut start_arg: Option<String> = None;
    let mut end_arg: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| usage(&args[0]));
                days = value.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --days value '{}'. Must be a number.", value);
                    std::process::exit(1);
                });
            }
            "--start-date" => {
                i += 1;
                start_arg = Some(args.get(i).unwrap_or_else(|| usage(&args[0])).clone());
            }
            "--end-date" => {
                i += 1;
                end_arg = Some(args.get(i).unwrap_or_else(|| usage(&args[0])).clone());
            }
            _ => usage(&args[0]),
        }
        i += 1;
    }

    // Explicit dates win; otherwise seed the trailing `days` ending now.
    let (start, end) = match start_arg {
        Some(raw_start) => {
            let start = parse_iso8601(&raw_start).unwrap_or_else(|| {
                eprintln!("Invalid --start-date '{}'.", raw_start);
                std::process::exit(1);
            });
            let end = match end_arg {
                Some(raw_end) => parse_iso8601(&raw_end).unwrap_or_else(|| {
                    eprintln!("Invalid --end-date '{}'.", raw_end);
                    std::process::exit(1);
                }),
                None => Utc::now(),
            };
            (start, end)
        }
        None => {
            let end = Utc::now();
            (end - Duration::days(days), end)
        }
    };

    if start > end {
        return Err(TelemetryError::InvalidWindow { start, end }.into());
    }

    // Connect to database
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://multicloud.db?mode=rwc".to_string());
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let report = seed_window(&db, start, end).await?;

    println!("\nSeed complete!");
    println!("  Window: {} -> {}", start, end);
    println!(
        "  Cost records: purged {}, inserted {}",
        report.cost_purged, report.cost_inserted
    );
    println!(
        "  Performance records: purged {}, inserted {}",
        report.performance_purged, report.performance_inserted
    );
    println!("  Cloud accounts created: {}", report.accounts_created);

    Ok(())
}
