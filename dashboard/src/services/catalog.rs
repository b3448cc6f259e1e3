//! Product catalog
//!
//! Owns the current product list. The list is fetched once per explicit
//! reload and replaced wholesale; a failed load discards whatever was there
//! before so that no partial or stale data is ever served next to an error.
//!
//! Loads are serialized by `load_lock`. The state lock is only taken to read
//! or swap the state, never across a data-source request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use shared::{ClassificationMode, ClassifiedProduct, Component, component_error, component_info};

use crate::core::classifier::Classifier;
use crate::error::DataSourceError;
use crate::traits::ProductSource;

/// Load state of the catalog
#[derive(Debug, Clone)]
pub enum CatalogState {
    NotLoaded,
    Ready {
        products: Arc<Vec<ClassifiedProduct>>,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        error: DataSourceError,
        failed_at: DateTime<Utc>,
    },
}

/// Serializable summary of the catalog state for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    NotLoaded,
    Ready {
        product_count: usize,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        message: String,
        failed_at: DateTime<Utc>,
    },
}

pub struct ProductCatalog<P: ProductSource> {
    source: Arc<P>,
    classifier: Classifier,
    state: RwLock<CatalogState>,
    load_lock: Mutex<()>,
}

impl<P: ProductSource> ProductCatalog<P> {
    pub fn new(source: Arc<P>, mode: ClassificationMode) -> Self {
        Self {
            source,
            classifier: Classifier::new(mode),
            state: RwLock::new(CatalogState::NotLoaded),
            load_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &Arc<P> {
        &self.source
    }

    pub fn classification_mode(&self) -> ClassificationMode {
        self.classifier.mode()
    }

    /// Fetch the product list again, replacing the current state
    pub async fn reload(&self) -> Result<Arc<Vec<ClassifiedProduct>>, DataSourceError> {
        let _load = self.load_lock.lock().await;
        self.load().await
    }

    /// Current products, loading them first if nothing was loaded yet
    ///
    /// A previous failure is reported as-is; only `reload` retries.
    pub async fn ensure_loaded(&self) -> Result<Arc<Vec<ClassifiedProduct>>, DataSourceError> {
        if let Some(result) = Self::settled(&*self.state.read().await) {
            return result;
        }

        let _load = self.load_lock.lock().await;
        // Another request may have finished loading while we waited
        if let Some(result) = Self::settled(&*self.state.read().await) {
            return result;
        }

        self.load().await
    }

    pub async fn state(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> CatalogStatus {
        match &*self.state.read().await {
            CatalogState::NotLoaded => CatalogStatus::NotLoaded,
            CatalogState::Ready { products, loaded_at } => CatalogStatus::Ready {
                product_count: products.len(),
                loaded_at: *loaded_at,
            },
            CatalogState::Failed { error, failed_at } => CatalogStatus::Failed {
                message: error.to_string(),
                failed_at: *failed_at,
            },
        }
    }

    /// Timestamp of the last successful load, if the catalog is ready
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match &*self.state.read().await {
            CatalogState::Ready { loaded_at, .. } => Some(*loaded_at),
            _ => None,
        }
    }

    async fn fetch(&self) -> Result<Arc<Vec<ClassifiedProduct>>, DataSourceError> {
        match self.source.fetch_products().await {
            Ok(records) => {
                let products = Arc::new(self.classifier.classify_all(records));
                component_info!(
                    Component::Catalog,
                    "📦 Loaded {} products ({} classification)",
                    products.len(),
                    self.classifier.mode()
                );
                Ok(products)
            }
            Err(error) => {
                component_error!(Component::Catalog, "❌ Product load failed: {}", error);
                Err(error)
            }
        }
    }

    /// Fetch without holding the state lock, then swap the result in
    async fn load(&self) -> Result<Arc<Vec<ClassifiedProduct>>, DataSourceError> {
        let outcome = self.fetch().await;
        *self.state.write().await = Self::state_from(&outcome);
        outcome
    }

    fn settled(state: &CatalogState) -> Option<Result<Arc<Vec<ClassifiedProduct>>, DataSourceError>> {
        match state {
            CatalogState::NotLoaded => None,
            CatalogState::Ready { products, .. } => Some(Ok(products.clone())),
            CatalogState::Failed { error, .. } => Some(Err(error.clone())),
        }
    }

    fn state_from(outcome: &Result<Arc<Vec<ClassifiedProduct>>, DataSourceError>) -> CatalogState {
        match outcome {
            Ok(products) => CatalogState::Ready {
                products: products.clone(),
                loaded_at: Utc::now(),
            },
            Err(error) => CatalogState::Failed {
                error: error.clone(),
                failed_at: Utc::now(),
            },
        }
    }
}
