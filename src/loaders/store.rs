//! In-memory resume store backing the route loaders.

use std::sync::Arc;

use dashmap::DashMap;

pub use crate::config::schema::ResumeConfig as Resume;

/// A thread-safe resume store, cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ResumeStore {
    by_id: Arc<DashMap<String, Resume>>,
    /// (username, slug) -> id
    by_slug: Arc<DashMap<(String, String), String>>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_resumes(resumes: impl IntoIterator<Item = Resume>) -> Self {
        let store = Self::new();
        for resume in resumes {
            store.insert(resume);
        }
        tracing::debug!(count = store.len(), "Resume store seeded");
        store
    }

    /// Insert or replace a resume.
    pub fn insert(&self, resume: Resume) {
        if let Some(previous) = self.by_id.get(&resume.id) {
            self.by_slug
                .remove(&(previous.username.clone(), previous.slug.clone()));
        }
        self.by_slug.insert(
            (resume.username.clone(), resume.slug.clone()),
            resume.id.clone(),
        );
        self.by_id.insert(resume.id.clone(), resume);
    }

    pub fn by_id(&self, id: &str) -> Option<Resume> {
        self.by_id.get(id).map(|r| r.value().clone())
    }

    pub fn by_slug(&self, username: &str, slug: &str) -> Option<Resume> {
        let id = self
            .by_slug
            .get(&(username.to_string(), slug.to_string()))
            .map(|r| r.value().clone())?;
        self.by_id(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
