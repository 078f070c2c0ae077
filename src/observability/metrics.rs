use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub directory_queries_total: IntCounterVec,
    pub restaurants_registered: IntGauge,
    pub query_latency_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let directory_queries_total = IntCounterVec::new(
            Opts::new("directory_queries_total", "Total list queries by sort mode"),
            &["sort"],
        )
        .expect("valid directory_queries_total metric");

        let restaurants_registered =
            IntGauge::new("restaurants_registered", "Restaurants currently registered")
                .expect("valid restaurants_registered metric");

        let query_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "query_latency_seconds",
                "Latency of directory queries in seconds",
            ),
            &["endpoint"],
        )
        .expect("valid query_latency_seconds metric");

        registry
            .register(Box::new(directory_queries_total.clone()))
            .expect("register directory_queries_total");
        registry
            .register(Box::new(restaurants_registered.clone()))
            .expect("register restaurants_registered");
        registry
            .register(Box::new(query_latency_seconds.clone()))
            .expect("register query_latency_seconds");

        Self {
            registry,
            directory_queries_total,
            restaurants_registered,
            query_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
