//! Builder and public resume loaders.

use crate::loaders::store::{Resume, ResumeStore};
use crate::loaders::{LoadFuture, LoaderData, LoaderError, Loader};
use crate::routing::params::Params;

fn required(params: &Params, name: &str) -> Result<String, LoaderError> {
    params
        .get(name)
        .map(str::to_owned)
        .ok_or_else(|| LoaderError::MissingParam(name.to_string()))
}

fn to_data(resume: &Resume) -> Result<LoaderData, LoaderError> {
    serde_json::to_value(resume).map_err(|e| LoaderError::Failed(e.to_string()))
}

/// Loads a resume for editing, keyed by `id`.
#[derive(Debug, Clone)]
pub struct BuilderLoader {
    store: ResumeStore,
}

impl BuilderLoader {
    pub fn new(store: ResumeStore) -> Self {
        Self { store }
    }
}

impl Loader for BuilderLoader {
    fn load(&self, params: &Params) -> LoadFuture {
        let store = self.store.clone();
        let id = required(params, "id");

        Box::pin(async move {
            let id = id?;
            let resume = store
                .by_id(&id)
                .ok_or_else(|| LoaderError::NotFound(id.clone()))?;
            to_data(&resume)
        })
    }
}

/// Loads a published resume, keyed by `username` and `slug`.
///
/// Private resumes are reported as [`LoaderError::NotPublic`].
#[derive(Debug, Clone)]
pub struct PublicLoader {
    store: ResumeStore,
}

impl PublicLoader {
    pub fn new(store: ResumeStore) -> Self {
        Self { store }
    }
}

impl Loader for PublicLoader {
    fn load(&self, params: &Params) -> LoadFuture {
        let store = self.store.clone();
        let key = required(params, "username").and_then(|u| Ok((u, required(params, "slug")?)));

        Box::pin(async move {
            let (username, slug) = key?;
            let resume = store
                .by_slug(&username, &slug)
                .ok_or_else(|| LoaderError::NotFound(format!("{username}/{slug}")))?;
            if !resume.public {
                return Err(LoaderError::NotPublic(format!("{username}/{slug}")));
            }
            to_data(&resume)
        })
    }
}
