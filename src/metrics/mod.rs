// Private module declaration
mod server;

use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::metrics_handler;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Covers:
// - Orders placed and rejected, and their totals
// - Order store operations (outcome, latency)
// - Bulk removals
//
// Registered metrics are served in text format on /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Order Metrics
    pub orders_placed: IntCounter,
    pub order_rejections: IntCounterVec,
    pub order_total_amount: Histogram,

    // Store Metrics
    pub store_operations: IntCounterVec,
    pub store_operation_duration: HistogramVec,
    pub orders_removed: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed = IntCounter::new("orders_placed_total", "Total orders accepted and stored")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let order_rejections = IntCounterVec::new(
            Opts::new("order_rejections_total", "Total order submissions rejected"),
            &["reason"],
        )?;
        registry.register(Box::new(order_rejections.clone()))?;

        let order_total_amount = Histogram::with_opts(
            HistogramOpts::new("order_total_amount", "Order totals in menu currency")
                .buckets(vec![5.0, 10.0, 20.0, 40.0, 80.0, 160.0]),
        )?;
        registry.register(Box::new(order_total_amount.clone()))?;

        let store_operations = IntCounterVec::new(
            Opts::new("store_operations_total", "Order store operations by outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(store_operations.clone()))?;

        let store_operation_duration = HistogramVec::new(
            HistogramOpts::new("store_operation_duration_seconds", "Order store operation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["operation"],
        )?;
        registry.register(Box::new(store_operation_duration.clone()))?;

        let orders_removed = IntCounter::new("orders_removed_total", "Total orders removed by admin clears")?;
        registry.register(Box::new(orders_removed.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            order_rejections,
            order_total_amount,
            store_operations,
            store_operation_duration,
            orders_removed,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self, total: f64) {
        self.orders_placed.inc();
        self.order_total_amount.observe(total);
    }

    pub fn record_order_rejected(&self, reason: &str) {
        self.order_rejections.with_label_values(&[reason]).inc();
    }

    pub fn record_store_operation(&self, operation: &str, duration_secs: f64, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.store_operations.with_label_values(&[operation, outcome]).inc();
        self.store_operation_duration
            .with_label_values(&[operation])
            .observe(duration_secs);
    }

    pub fn record_orders_removed(&self, count: u64) {
        self.orders_removed.inc_by(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry.gather().is_empty());
    }

    #[test]
    fn test_record_order_placed() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_placed(19.5);
        metrics.record_order_placed(3.0);

        let gathered = metrics.registry.gather();
        let placed = gathered.iter().find(|m| m.name() == "orders_placed_total").unwrap();
        assert_eq!(placed.metric[0].counter.value, Some(2.0));
    }

    #[test]
    fn test_record_store_operation_labels() {
        let metrics = Metrics::new().unwrap();
        metrics.record_store_operation("insert", 0.01, true);
        metrics.record_store_operation("insert", 0.02, false);

        let gathered = metrics.registry.gather();
        let operations = gathered.iter().find(|m| m.name() == "store_operations_total").unwrap();
        assert_eq!(operations.metric.len(), 2); // success and failure
    }

    #[test]
    fn test_record_orders_removed() {
        let metrics = Metrics::new().unwrap();
        metrics.record_orders_removed(3);
        metrics.record_orders_removed(0);

        let gathered = metrics.registry.gather();
        let removed = gathered.iter().find(|m| m.name() == "orders_removed_total").unwrap();
        assert_eq!(removed.metric[0].counter.value, Some(3.0));
    }
}
