use opentelemetry::{
    global,
    metrics::{Counter, Histogram, MeterProvider},
    KeyValue,
};
use prometheus::Registry;
use std::collections::HashSet;

pub struct Metrics {
    classification_counter: Counter<u64>,
    prediction_duration: Histogram<u64>,
    calorie_lookup_counter: Counter<u64>,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();
        let exporter = opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()?;

        let provider = opentelemetry_sdk::metrics::SdkMeterProvider::builder()
            .with_reader(exporter)
            .build();

        let meter = provider.meter("fruit_classifier");
        global::set_meter_provider(provider);

        let classification_counter = meter
            .u64_counter("classifications_total")
            .with_description("Images classified, by label and category")
            .build();

        let boundaries = generate_boundaries((5, 25, 45, 245, 1245));

        let prediction_duration = meter
            .u64_histogram("prediction_duration_ms")
            .with_boundaries(boundaries)
            .with_description("Duration of classification in milliseconds")
            .build();

        let calorie_lookup_counter = meter
            .u64_counter("calorie_lookups_total")
            .with_description("Calorie lookups, by outcome")
            .build();

        Ok(Metrics {
            classification_counter,
            prediction_duration,
            calorie_lookup_counter,
            registry,
        })
    }

    pub fn record_classification(&self, label: &str, category: &str) {
        let attributes = [
            KeyValue::new("label", label.to_string()),
            KeyValue::new("category", category.to_string()),
        ];
        self.classification_counter.add(1, &attributes);
    }

    pub fn record_prediction_duration(&self, duration_ms: u64, route: &str) {
        let attributes = [KeyValue::new("route", route.to_string())];
        self.prediction_duration.record(duration_ms, &attributes);
    }

    pub fn record_calorie_lookup(&self, outcome: &str) {
        let attributes = [KeyValue::new("outcome", outcome.to_string())];
        self.calorie_lookup_counter.add(1, &attributes);
    }
}

/// Histogram buckets: fine-grained around typical CPU inference latency,
/// coarser towards the tail.
fn generate_boundaries(parts: (i32, i32, i32, i32, i32)) -> Vec<f64> {
    let first_step: usize = 10;
    let middle_step: usize = 5;
    let end_step: usize = 50;
    let tail_step: usize = 250;
    let first_part = (parts.0..=parts.1).step_by(first_step);
    let middle_part = (parts.1..=parts.2).step_by(middle_step);
    let end_part = (parts.2..=parts.3).step_by(end_step);
    let tail_part = (parts.3..=parts.4).step_by(tail_step);

    let mut seen = HashSet::new();
    first_part
        .chain(middle_part)
        .chain(end_part)
        .chain(tail_part)
        .filter(|&x| seen.insert(x))
        .map(|x| x as f64)
        .collect()
}
