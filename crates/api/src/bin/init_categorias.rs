//! One-shot seeder for the default categories.
//!
//! Connects to the database, applies migrations, and idempotently inserts
//! the default category names. Safe to run any number of times; existing
//! names are left untouched.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://… init-categorias
//! ```

use tareas_core::categories::DEFAULT_CATEGORY_NAMES;
use tareas_db::repositories::CategoryRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "init_categorias=info,tareas_db=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL is not set");

    let pool = tareas_db::create_pool(&database_url)
        .await
        .expect("Could not open the database pool");

    tareas_db::health_check(&pool)
        .await
        .expect("Database did not answer the health probe");

    tareas_db::run_migrations(&pool)
        .await
        .expect("Migration run failed");

    tracing::info!(
        names = ?DEFAULT_CATEGORY_NAMES,
        "Seeding default categories"
    );

    let report = CategoryRepo::seed_defaults(&pool)
        .await
        .expect("Seeding failed");

    tracing::info!(
        created = report.created,
        already_existing = report.existing,
        "Default category seed complete"
    );
}
