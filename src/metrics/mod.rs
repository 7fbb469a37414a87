//! Prometheus metrics for the API server

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: Gauge,
    pub analyses_total: IntCounterVec,
    pub indicator_unavailable_total: IntCounterVec,
    pub provider_failures_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = Gauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let analyses_total = IntCounterVec::new(
            Opts::new("analyses_total", "Completed asset analyses"),
            &["symbol"],
        )?;
        let indicator_unavailable_total = IntCounterVec::new(
            Opts::new(
                "indicator_unavailable_total",
                "Indicator results that could not be computed",
            ),
            &["indicator"],
        )?;
        let provider_failures_total = IntCounterVec::new(
            Opts::new(
                "provider_failures_total",
                "Upstream data fetches that failed after retries",
            ),
            &["provider"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(analyses_total.clone()))?;
        registry.register(Box::new(indicator_unavailable_total.clone()))?;
        registry.register(Box::new(provider_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            analyses_total,
            indicator_unavailable_total,
            provider_failures_total,
        })
    }

    /// Record one finished analysis and every indicator it could not compute.
    pub fn record_analysis(&self, report: &crate::models::AnalysisReport) {
        self.analyses_total
            .with_label_values(&[report.symbol.as_str()])
            .inc();
        for result in report.all_indicators().filter(|r| !r.is_available()) {
            self.indicator_unavailable_total
                .with_label_values(&[result.kind.key()])
                .inc();
        }
    }

    /// Text exposition format for the `/metrics` endpoint.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
