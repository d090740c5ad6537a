use anyhow::{Context, Result};
use axum::routing::get;
use axum::Extension;
use route_translator::{
    AxumRouteTable, Catalog, Locale, Route, RouteParams, RouteTranslator, TranslatorConfig,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("route_translator=info".parse()?),
        )
        .init();

    info!("Starting route translator demo server");

    let config = TranslatorConfig::from_env()?;
    let catalog_path = std::env::var("ROUTE_TRANSLATIONS_FILE")
        .unwrap_or_else(|_| "config/routes.json".to_string());
    let catalog = Catalog::from_file(&catalog_path)?;
    info!("Loaded translations for {:?}", catalog.locales());

    let mut translator = RouteTranslator::new(config, Arc::new(catalog))?;
    let mut table = AxumRouteTable::new();

    translator.add_localized_route(&mut table, Route::new(get(home), "/")?.named("root"))?;
    translator.add_localized_route(&mut table, Route::new(get(about), "/about")?.named("about"))?;
    translator.add_localized_route(
        &mut table,
        Route::new(get(user), "/users/:id")?.named("user"),
    )?;

    let report = translator.metrics().report();
    info!("Route expansion finished: {}", serde_json::to_string(&report)?);

    let default_locale = translator.config().default_locale.clone();
    if let Some(path) = translator
        .helpers()
        .path_for("about", None, &default_locale, translator.config())
    {
        info!("about_path resolves to {}", path);
    }

    let router = table
        .into_router()
        .context("Failed to build router")?
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Listening on port {}", port);
    axum::serve(listener, router).await?;
    Ok(())
}

fn locale_of(params: &RouteParams) -> Locale {
    Locale::new(params.get("locale").unwrap_or_default())
}

async fn home(Extension(params): Extension<RouteParams>) -> String {
    format!("home ({})", locale_of(&params))
}

async fn about(Extension(params): Extension<RouteParams>) -> String {
    format!(
        "about ({}) via {}",
        locale_of(&params),
        params.name.as_deref().unwrap_or("unnamed route")
    )
}

async fn user(
    Extension(params): Extension<RouteParams>,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> String {
    format!("user {} ({})", id, locale_of(&params))
}
