//! File-backed JSON persistence for modules and questions.
//!
//! Layout under the data directory:
//! - `modules/<module_id>.json`: one pretty-printed module
//! - `questions/<module_id>.json`: the module's questions as an array
//!
//! Reads go through an injected [`ContentCache`]; writes update it.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use study_core::{Module, Question};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Question {question_id} not found in module {module_id}")]
    QuestionNotFound {
        module_id: String,
        question_id: String,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory copies of loaded modules and question lists.
///
/// Owned by whoever builds the store, so tests and tools can share or
/// isolate caches as they need.
#[derive(Debug, Default)]
pub struct ContentCache {
    modules: RwLock<HashMap<String, Module>>,
    questions: RwLock<HashMap<String, Vec<Question>>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn module(&self, id: &str) -> Option<Module> {
        self.modules.read().await.get(id).cloned()
    }

    pub async fn put_module(&self, module: Module) {
        self.modules.write().await.insert(module.id.clone(), module);
    }

    pub async fn questions(&self, module_id: &str) -> Option<Vec<Question>> {
        self.questions.read().await.get(module_id).cloned()
    }

    pub async fn put_questions(&self, module_id: &str, questions: Vec<Question>) {
        self.questions
            .write()
            .await
            .insert(module_id.to_string(), questions);
    }

    pub async fn clear(&self) {
        self.modules.write().await.clear();
        self.questions.write().await.clear();
    }
}

/// JSON content store rooted at a data directory.
pub struct ContentStore {
    root: PathBuf,
    cache: Arc<ContentCache>,
    /// Held by every writer, across the whole read-modify-write of a file.
    write_lock: Mutex<()>,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>, cache: Arc<ContentCache>) -> Self {
        Self {
            root: root.into(),
            cache,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    fn questions_dir(&self) -> PathBuf {
        self.root.join("questions")
    }

    pub async fn save_module(&self, module: &Module) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = json_path(&self.modules_dir(), &module.id)?;
        write_json(&path, module).await?;
        self.cache.put_module(module.clone()).await;
        tracing::debug!(module = %module.id, "saved module");
        Ok(())
    }

    /// Load a module, or `None` when it was never saved.
    pub async fn load_module(&self, id: &str) -> Result<Option<Module>> {
        if let Some(module) = self.cache.module(id).await {
            return Ok(Some(module));
        }
        let path = json_path(&self.modules_dir(), id)?;
        let module: Option<Module> = read_json(&path).await?;
        if let Some(module) = &module {
            self.cache.put_module(module.clone()).await;
        }
        Ok(module)
    }

    /// All saved modules, ordered by file name.
    pub async fn list_modules(&self) -> Result<Vec<Module>> {
        let mut modules = Vec::new();
        for id in json_stems(&self.modules_dir()).await? {
            if let Some(module) = self.load_module(&id).await? {
                modules.push(module);
            }
        }
        Ok(modules)
    }

    /// Replace all questions of a module.
    pub async fn save_questions(&self, module_id: &str, questions: &[Question]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_questions(module_id, questions).await
    }

    /// Caller holds `write_lock`.
    async fn write_questions(&self, module_id: &str, questions: &[Question]) -> Result<()> {
        let path = json_path(&self.questions_dir(), module_id)?;
        write_json(&path, questions).await?;
        self.cache
            .put_questions(module_id, questions.to_vec())
            .await;
        tracing::debug!(module = %module_id, count = questions.len(), "saved questions");
        Ok(())
    }

    /// Questions of a module; empty when none were saved.
    pub async fn load_questions(&self, module_id: &str) -> Result<Vec<Question>> {
        if let Some(questions) = self.cache.questions(module_id).await {
            return Ok(questions);
        }
        let path = json_path(&self.questions_dir(), module_id)?;
        let questions: Vec<Question> = read_json(&path).await?.unwrap_or_default();
        self.cache
            .put_questions(module_id, questions.clone())
            .await;
        Ok(questions)
    }

    /// Questions of every module, in file name order.
    pub async fn load_all_questions(&self) -> Result<Vec<Question>> {
        let mut all = Vec::new();
        for module_id in json_stems(&self.questions_dir()).await? {
            all.extend(self.load_questions(&module_id).await?);
        }
        Ok(all)
    }

    pub async fn add_question(&self, question: Question) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let module_id = question.module_id.clone();
        let mut questions = self.load_questions(&module_id).await?;
        questions.push(question);
        self.write_questions(&module_id, &questions).await
    }

    /// Apply `update` to one question and persist it.
    pub async fn update_question<F>(
        &self,
        module_id: &str,
        question_id: &str,
        update: F,
    ) -> Result<Question>
    where
        F: FnOnce(&mut Question),
    {
        let _guard = self.write_lock.lock().await;
        let mut questions = self.load_questions(module_id).await?;
        let question = questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| not_found(module_id, question_id))?;
        update(question);
        let updated = question.clone();
        self.write_questions(module_id, &questions).await?;
        Ok(updated)
    }

    pub async fn delete_question(&self, module_id: &str, question_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut questions = self.load_questions(module_id).await?;
        let before = questions.len();
        questions.retain(|q| q.id != question_id);
        if questions.len() == before {
            return Err(not_found(module_id, question_id));
        }
        self.write_questions(module_id, &questions).await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }
}

fn not_found(module_id: &str, question_id: &str) -> StoreError {
    StoreError::QuestionNotFound {
        module_id: module_id.to_string(),
        question_id: question_id.to_string(),
    }
}

/// `<dir>/<id>.json`, rejecting ids that would escape `dir`.
fn json_path(dir: &Path, id: &str) -> Result<PathBuf> {
    let valid = !id.is_empty()
        && id != "."
        && !id.contains("..")
        && !id.contains(['/', '\\']);
    if !valid {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(dir.join(format!("{}.json", id)))
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Sorted file stems of the `*.json` files in `dir`; empty when it is missing.
async fn json_stems(dir: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut stems = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}
