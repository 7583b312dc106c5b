//! Parse every canonical module file into the JSON data directory.

use std::sync::Arc;

use study_notes_backend::config::Config;
use study_notes_backend::services::ingest::ingest_directory;
use study_notes_backend::services::store::{ContentCache, ContentStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    study_notes_backend::init_tracing();

    let config = Config::from_env()?;
    let store = ContentStore::new(&config.data_dir, Arc::new(ContentCache::new()));

    let report = ingest_directory(&config.modules_dir, &store).await?;
    for module in &report.modules {
        let types: Vec<String> = module
            .question_types
            .iter()
            .map(|(question_type, count)| format!("{}: {}", question_type, count))
            .collect();
        tracing::info!(
            "Module {:02}: \"{}\" ({} sections, {} questions) [{}]",
            module.number,
            module.title,
            module.sections,
            module.questions,
            types.join(", ")
        );
    }
    tracing::info!(
        "Total: {} modules, {} sections, {} questions",
        report.total_modules,
        report.total_sections,
        report.total_questions
    );

    Ok(())
}
