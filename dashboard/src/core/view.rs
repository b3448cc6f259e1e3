//! Filtered dashboard view
//!
//! Holds the loaded product list together with the current filter selection
//! and keeps the visible list and its KPI summary in lock-step: every setter
//! recomputes both before returning, so a reader can never observe a summary
//! computed over a previous selection.
//!
//! `subscribe` is the push interface for code embedding the library next to a
//! rendering layer. The HTTP handlers are pull based: each request builds a
//! view for its own selection and returns `snapshot()`, without listeners.

use std::sync::Arc;

use shared::{ClassifiedProduct, KpiSummary, StockState};

use super::aggregator::summarize;
use super::filter::{FilterCriteria, SortDirective, distinct_states, filter_products, sort_products};
use crate::types::DashboardSnapshot;

type VisibleListener = Box<dyn FnMut(&[ClassifiedProduct]) + Send>;

pub struct DashboardView {
    products: Arc<Vec<ClassifiedProduct>>,
    criteria: FilterCriteria,
    sort: SortDirective,
    visible: Vec<ClassifiedProduct>,
    summary: KpiSummary,
    listeners: Vec<VisibleListener>,
}

impl DashboardView {
    pub fn new(products: Arc<Vec<ClassifiedProduct>>) -> Self {
        let mut view = Self {
            products,
            criteria: FilterCriteria::default(),
            sort: SortDirective::default(),
            visible: Vec::new(),
            summary: KpiSummary::default(),
            listeners: Vec::new(),
        };
        view.recompute();
        view
    }

    /// Register a callback fired with the new visible list whenever it changes
    ///
    /// Not fired for the initial list passed to `new`.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&[ClassifiedProduct]) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the product list (explicit reload), keeping the selection
    pub fn set_products(&mut self, products: Arc<Vec<ClassifiedProduct>>) {
        self.products = products;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.recompute();
    }

    pub fn set_state(&mut self, state: Option<StockState>) {
        self.criteria.state = state;
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortDirective) {
        self.sort = sort;
        self.recompute();
    }

    /// Apply a whole selection with a single recomputation
    pub fn apply(&mut self, criteria: FilterCriteria, sort: SortDirective) {
        self.criteria = criteria;
        self.sort = sort;
        self.recompute();
    }

    pub fn visible(&self) -> &[ClassifiedProduct] {
        &self.visible
    }

    pub fn summary(&self) -> &KpiSummary {
        &self.summary
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortDirective {
        self.sort
    }

    pub fn total_count(&self) -> usize {
        self.products.len()
    }

    /// States offered by a state selector: those present in the full list
    pub fn available_states(&self) -> Vec<StockState> {
        distinct_states(&self.products)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            query: self.criteria.query.clone(),
            state: self.criteria.state,
            sort: self.sort,
            total_products: self.total_count(),
            visible_products: self.visible.len(),
            states: self.available_states(),
            summary: self.summary.clone(),
            products: self.visible.clone(),
        }
    }

    fn recompute(&mut self) {
        let mut visible = filter_products(&self.products, &self.criteria);
        sort_products(&mut visible, self.sort);

        self.summary = summarize(&visible);
        let changed = visible != self.visible;
        self.visible = visible;

        if changed {
            for listener in self.listeners.iter_mut() {
                listener(&self.visible);
            }
        }
    }
}
