use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use translatable::{
    Attributes, Config, HasTranslations, PgTranslationStore, Translatable, TranslationMetrics,
};

/// Minimal host record used to exercise the translation table.
#[derive(Debug, Default)]
struct Post {
    id: i64,
    attributes: Attributes,
}

impl Translatable for Post {
    const MODEL_TYPE: &'static str = "post";
    const TABLE: &'static str = "posts";
    const TRANSLATABLE: &'static [&'static str] = &["title", "body"];

    fn id(&self) -> i64 {
        self.id
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatable=info".parse()?),
        )
        .init();

    let config = Arc::new(Config::from_env().context("Invalid translatable configuration")?);
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let post_id: i64 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()
        .context("Post id must be an integer")?
        .unwrap_or(1);

    info!("Connecting to database");
    let store = PgTranslationStore::connect(&database_url, &config)
        .await
        .context("Failed to connect to database")?;
    store
        .ensure_schema()
        .await
        .context("Failed to create translation table")?;

    let post = Post {
        id: post_id,
        ..Post::default()
    };
    let mut post = HasTranslations::new(post, store, Arc::clone(&config));

    info!("Translations for post #{} (locale {})", post_id, post.locale());
    for (key, locales) in post.all_translations().await? {
        for (locale, value) in locales {
            info!("  {} [{}] = {}", key, locale, value.as_deref().unwrap_or("<null>"));
        }
    }

    let report = TranslationMetrics::global().report();
    info!("Metrics: {}", serde_json::to_string(&report)?);
    Ok(())
}
