//! Product list and dashboard endpoints
//!
//! All routes here require a session. Catalog failures surface as
//! `DashboardError::DataSource` and never carry product or KPI data.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use chrono::Utc;

use shared::{ApiEnvelope, ClassifiedProduct, Component, component_debug, component_info};

use crate::core::view::DashboardView;
use crate::error::DashboardResult;
use crate::state::DashboardState;
use crate::traits::{CredentialStore, ProductSource};
use crate::types::{DashboardQuery, DashboardSnapshot, ReloadOutcome};

/// Classified products in source order - /api/products
pub async fn list_products<P, C>(
    State(state): State<DashboardState<P, C>>,
    headers: HeaderMap,
) -> DashboardResult<Json<ApiEnvelope<Vec<ClassifiedProduct>>>>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    state.require_auth(&headers).await?;

    let products = state.catalog.ensure_loaded().await?;
    let total = products.len();

    Ok(Json(ApiEnvelope::ok(products.as_ref().clone()).with_total(total)))
}

/// Fetch the product list again - /api/products/reload
pub async fn reload_products<P, C>(
    State(state): State<DashboardState<P, C>>,
    headers: HeaderMap,
) -> DashboardResult<Json<ApiEnvelope<ReloadOutcome>>>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    let context = state.require_auth(&headers).await?;
    component_info!(
        Component::Catalog,
        "🔄 Reload requested by {}",
        context.current_username().unwrap_or_default()
    );

    let products = state.catalog.reload().await?;
    let loaded_at = state.catalog.loaded_at().await.unwrap_or_else(Utc::now);

    Ok(Json(ApiEnvelope::ok(ReloadOutcome {
        product_count: products.len(),
        loaded_at,
    })))
}

/// Filtered, sorted view plus KPIs over the visible rows - /api/dashboard
pub async fn dashboard<P, C>(
    State(state): State<DashboardState<P, C>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> DashboardResult<Json<ApiEnvelope<DashboardSnapshot>>>
where
    P: ProductSource + 'static,
    C: CredentialStore + 'static,
{
    state.require_auth(&headers).await?;
    let (criteria, sort) = query.into_selection()?;

    let products = state.catalog.ensure_loaded().await?;
    let mut view = DashboardView::new(products);
    view.apply(criteria, sort);

    let snapshot = view.snapshot();
    component_debug!(
        Component::Pipeline,
        "📊 Dashboard view: {}/{} products visible",
        snapshot.visible_products,
        snapshot.total_products
    );

    Ok(Json(ApiEnvelope::ok(snapshot)))
}
