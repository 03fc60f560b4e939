//! Application state: engine config, loader, instance-id allocator and open pages.
//!
//! This module owns:
//!   - the engine config (from TOML or defaults)
//!   - the filesystem loader for quizzes and locales
//!   - the one process-wide `InstanceIdAllocator`
//!   - the in-memory page store (by page id, bounded by `max_pages`)

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_engine_config_from_env, EngineConfig};
use crate::error::ApiError;
use crate::ids::InstanceIdAllocator;
use crate::loader::FsLoader;
use crate::page::Page;
use crate::styles::{StyleHook, ThemeStyles};

/// Open pages in insertion order. Holds at most `capacity` pages.
pub struct PageStore {
    pages: HashMap<String, Page>,
    order: VecDeque<String>,
    capacity: usize,
}

impl PageStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            pages: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Store `page`, evicting the oldest pages beyond capacity. Returns the evicted ids.
    pub fn insert(&mut self, id: String, page: Page) -> Vec<String> {
        if self.pages.insert(id.clone(), page).is_none() {
            self.order.push_back(id);
        }
        let mut evicted = Vec::new();
        while self.pages.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else { break };
            self.pages.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Page> {
        let page = self.pages.remove(id)?;
        self.order.retain(|o| o != id);
        Some(page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EngineConfig>,
    pub loader: FsLoader,
    pub allocator: Arc<InstanceIdAllocator>,
    pub styles: Arc<dyn StyleHook>,
    pub pages: Arc<RwLock<PageStore>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Build state from env: QUIZ_CONFIG_PATH if set, defaults otherwise.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_engine_config_from_env().unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: EngineConfig) -> Self {
        info!(
            target: "quiz_engine",
            quiz_root = %config.quiz_root.display(),
            locales = %config.locales_path.display(),
            languages = ?config.supported_languages,
            default_language = %config.default_language,
            max_pages = config.max_pages,
            "Engine configured"
        );
        Self {
            loader: FsLoader::from_config(&config),
            styles: Arc::new(ThemeStyles::new(config.styles.clone())),
            pages: Arc::new(RwLock::new(PageStore::new(config.max_pages))),
            config: Arc::new(config),
            allocator: Arc::new(InstanceIdAllocator::new()),
        }
    }

    /// Fresh, empty page in `lang` using the configured container class and styles.
    pub fn new_page(&self, lang: &str) -> Page {
        Page::new(
            lang,
            &self.config.default_language,
            &self.config.container_class,
            self.styles.clone(),
        )
    }

    /// Store a page and return its new id.
    #[instrument(level = "debug", skip(self, page))]
    pub async fn insert_page(&self, page: Page) -> String {
        let id = Uuid::new_v4().to_string();
        let evicted = self.pages.write().await.insert(id.clone(), page);
        if !evicted.is_empty() {
            info!(target: "quiz_engine", count = evicted.len(), oldest = %evicted[0], "Evicted pages over capacity");
        }
        id
    }

    /// Drop a stored page.
    pub async fn remove_page(&self, page_id: &str) -> Result<(), ApiError> {
        self.pages
            .write()
            .await
            .remove(page_id)
            .map(|_| ())
            .ok_or_else(|| ApiError::PageNotFound(page_id.to_string()))
    }

    /// Run `f` on a stored page under the write lock.
    pub async fn with_page<R>(
        &self,
        page_id: &str,
        f: impl FnOnce(&mut Page) -> R,
    ) -> Result<R, ApiError> {
        let mut pages = self.pages.write().await;
        let page = pages
            .get_mut(page_id)
            .ok_or_else(|| ApiError::PageNotFound(page_id.to_string()))?;
        Ok(f(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::Unstyled;

    fn page() -> Page {
        Page::new("en", "en", "quiz-container", Arc::new(Unstyled))
    }

    #[test]
    fn store_evicts_oldest_beyond_capacity() {
        let mut store = PageStore::new(2);
        assert!(store.insert("a".into(), page()).is_empty());
        assert!(store.insert("b".into(), page()).is_empty());
        assert_eq!(store.insert("c".into(), page()), vec!["a".to_string()]);
        assert_eq!(store.len(), 2);
        assert!(store.get_mut("a").is_none());
        assert!(store.get_mut("c").is_some());
    }

    #[test]
    fn removed_pages_do_not_count_towards_eviction() {
        let mut store = PageStore::new(2);
        store.insert("a".into(), page());
        store.insert("b".into(), page());
        assert!(store.remove("a").is_some());
        assert!(store.insert("c".into(), page()).is_empty());
        assert!(store.remove("a").is_none());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn open_pages_stay_bounded() {
        let state = AppState::with_config(EngineConfig { max_pages: 3, ..EngineConfig::default() });
        let mut ids = Vec::new();
        for _ in 0..10 {
            ids.push(state.insert_page(page()).await);
        }
        assert_eq!(state.pages.read().await.len(), 3);
        assert!(state.with_page(&ids[9], |_| ()).await.is_ok());
        assert!(matches!(state.with_page(&ids[0], |_| ()).await, Err(ApiError::PageNotFound(_))));

        state.remove_page(&ids[9]).await.unwrap();
        assert!(state.remove_page(&ids[9]).await.is_err());
        assert_eq!(state.pages.read().await.len(), 2);
    }
}
