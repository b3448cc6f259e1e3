//! KPI aggregation over a classified product set

use shared::{ClassifiedProduct, KpiSummary, StockState};

/// Compute the KPI summary for the given products
///
/// An empty slice yields the all-zero summary with no latest date.
pub fn summarize(products: &[ClassifiedProduct]) -> KpiSummary {
    let mut summary = KpiSummary {
        total: products.len(),
        ..KpiSummary::default()
    };

    if products.is_empty() {
        return summary;
    }

    let total = products.len() as f64;
    let mut stock_sum = 0.0;
    let mut with_dispatches = 0usize;

    for product in products {
        if let Some(state) = product.state {
            summary.breakdown_mut(state).count += 1;
        }

        stock_sum += product.record.current_stock;

        if product.record.pending_dispatches > 0.0 {
            with_dispatches += 1;
        }

        if let Some(date) = product.record.last_cable_movement_date {
            if summary.latest_cable_movement.is_none_or(|latest| date > latest) {
                summary.latest_cable_movement = Some(date);
            }
        }
    }

    for state in StockState::ALL {
        let breakdown = summary.breakdown_mut(state);
        breakdown.percentage = percentage(breakdown.count, total);
    }

    summary.mean_stock = stock_sum / total;
    summary.dispatch_percentage = percentage(with_dispatches, total);

    summary
}

fn percentage(count: usize, total: f64) -> f64 {
    count as f64 / total * 100.0
}
