//! Ingestion of canonical module files and pasted notes.

use std::path::{Path, PathBuf};

use study_core::{Extractor, Module, Question, RandomIds};

use crate::error::{ApiError, Result};
use crate::models::{IngestReport, ModuleReport};
use crate::services::store::{ContentStore, StoreError};

/// Parse one canonical module file and extract its questions.
pub async fn ingest_file(path: &Path) -> std::result::Result<(Module, Vec<Question>), StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    let module = study_core::parse(&content, &filename);
    let questions = Extractor::new(&RandomIds).extract(&module);
    Ok((module, questions))
}

/// Parse, extract and save every `*.md` file of `dir`, in file name order.
pub async fn ingest_directory(dir: &Path, store: &ContentStore) -> Result<IngestReport> {
    let files = markdown_files(dir).await?;
    if files.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No markdown files found in {}",
            dir.display()
        )));
    }

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let (module, questions) = ingest_file(&path).await.map_err(|err| match err {
            StoreError::Io(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                ApiError::Internal(format!("{} is not valid UTF-8", path.display()))
            }
            other => ApiError::from(other),
        })?;
        store.save_module(&module).await?;
        store.save_questions(&module.id, &questions).await?;

        let report = ModuleReport {
            id: module.id.clone(),
            number: module.number,
            title: module.title.clone(),
            source: module.source.clone(),
            sections: module.sections.len(),
            questions: questions.len(),
            question_types: study_core::type_counts(&questions),
        };
        tracing::info!(
            module = %report.id,
            title = %report.title,
            sections = report.sections,
            questions = report.questions,
            "ingested module"
        );
        reports.push(report);
    }

    let report = IngestReport::new(reports);
    tracing::info!(
        modules = report.total_modules,
        sections = report.total_sections,
        questions = report.total_questions,
        "ingestion complete"
    );
    Ok(report)
}

/// Segment pasted notes and extract questions without saving anything.
pub fn preview_import(content: &str, title: &str) -> (Module, Vec<Question>) {
    let module = study_core::segment(content, title);
    let questions = Extractor::new(&RandomIds).extract(&module);
    (module, questions)
}

/// Sorted `*.md` files directly inside `dir`.
async fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::NotFound(format!("Modules directory {} does not exist", dir.display()))
        } else {
            ApiError::from(StoreError::from(e))
        }
    })?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(StoreError::from)?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
