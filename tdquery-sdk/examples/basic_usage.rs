//! Basic usage example for the tdquery SDK
//!
//! This example demonstrates the core features of the SDK:
//! - Connecting with an API key
//! - Running a Presto query
//! - Query builder API with a Hive job
//! - Triggering a saved query
//! - Typed result deserialization
//!
//! Run with: TD_API_KEY=... TD_DATABASE=... cargo run --example basic_usage

use serde::Deserialize;
use std::time::Duration;
use tdquery_sdk::{Error, NamedQueryOptions, ServiceConfig, TreasureData};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TableCount {
    total: u64,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    println!("=== tdquery SDK Basic Usage Example ===\n");

    let api_key = std::env::var("TD_API_KEY")
        .map_err(|_| Error::InvalidOperation("TD_API_KEY is not set".to_string()))?;
    let database = std::env::var("TD_DATABASE").unwrap_or_else(|_| "sample_datasets".to_string());

    // 1. Connect
    println!("1. Connecting...");
    let config = ServiceConfig::new(api_key)
        .with_poll_interval(Duration::from_secs(2))
        .with_max_wait(Duration::from_secs(600));
    let td = TreasureData::connect(config)?;
    println!("   ✓ Using endpoint {}\n", td.service().config().endpoint);

    // 2. Presto query
    println!("2. Running a Presto query...");
    let result = td
        .query(&database, "SELECT COUNT(1) AS total FROM www_access")
        .await?;
    let count: TableCount = result.first()?;
    println!("   ✓ {} rows in www_access\n", count.total);

    // 3. Query builder with Hive
    println!("3. Running a Hive query with the builder...");
    let result = td
        .query_builder()
        .database(&database)
        .sql("SELECT method, COUNT(1) AS hits FROM www_access GROUP BY method")
        .hive()
        .priority(0)
        .execute()
        .await?;
    println!("   Columns: {:?}", result.column_names());
    for record in result.records() {
        println!("   - {:?} => {:?}", record.get("method"), record.get("hits"));
    }
    println!();

    // 4. Saved query
    if let Ok(name) = std::env::var("TD_SAVED_QUERY") {
        println!("4. Running saved query '{}'...", name);
        let result = td
            .named_query_with(&name, &NamedQueryOptions::default())
            .await?;
        println!("   ✓ {} rows\n", result.row_count());
    }

    println!("=== Example completed successfully ===");
    Ok(())
}
