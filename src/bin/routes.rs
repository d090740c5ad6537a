//! Routes binary - prints the localized route table without starting a server
//!
//! Usage:
//!   cargo run --bin routes
//!
//! Required environment variables:
//! - ROUTE_DEFAULT_LOCALE
//!
//! Optional:
//! - ROUTE_TRANSLATIONS_FILE (defaults to config/routes.json)
//! - ROUTE_LIST_FILE (defaults to config/route_list.json)
//! - any other ROUTE_* setting read by TranslatorConfig::from_env

use anyhow::{Context, Result};
use route_translator::{Catalog, MemoryRouteTable, Route, RouteTranslator, TranslatorConfig};
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::info;

/// One declared route in the route list file
#[derive(Debug, Deserialize)]
struct RouteEntry {
    #[serde(default)]
    name: Option<String>,
    path: String,
    #[serde(default = "default_method")]
    method: String,
    to: String,
}

fn default_method() -> String {
    "GET".to_string()
}

fn load_route_entries(path: &str) -> Result<Vec<RouteEntry>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read route list {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse route list {}", path))
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("route_translator=warn".parse()?),
        )
        .init();

    let config = TranslatorConfig::from_env()?;
    let catalog_path = std::env::var("ROUTE_TRANSLATIONS_FILE")
        .unwrap_or_else(|_| "config/routes.json".to_string());
    let list_path = std::env::var("ROUTE_LIST_FILE")
        .unwrap_or_else(|_| "config/route_list.json".to_string());

    let catalog = Catalog::from_file(&catalog_path)?;
    let entries = load_route_entries(&list_path)?;
    info!("Expanding {} routes", entries.len());

    let key = config.locale_param_key.clone();
    let mut translator = RouteTranslator::new(config, Arc::new(catalog))?;
    let mut table = MemoryRouteTable::new();

    for entry in entries {
        let mut route = Route::new(entry.to, &entry.path)?.with_method(&entry.method);
        if let Some(name) = entry.name.as_deref() {
            route = route.named(name);
        }
        translator.add_localized_route(&mut table, route)?;
    }

    println!("{:<24} {:<7} {:<36} {:<10} TO", "NAME", "VERB", "PATH", "LOCALE");
    for route in table.routes() {
        println!(
            "{:<24} {:<7} {:<36} {:<10} {}",
            route.name.as_deref().unwrap_or(""),
            route.conditions.request_method.join("|"),
            route.path(),
            route.requirements.get(&key).map(String::as_str).unwrap_or("-"),
            route.app
        );
    }

    let report = translator.metrics().report();
    println!(
        "\n{} routes, {} locales skipped, {} name collisions",
        table.len(),
        report.locales_skipped,
        report.name_collisions
    );
    Ok(())
}
