//! Logging setup and per-request tracing.

use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::Router;
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize console logging, filtered by `RUST_LOG`.
///
/// With the `otel` feature, traces and logs are also exported when
/// `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    #[cfg(feature = "otel")]
    if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        match otel::providers(&endpoint) {
            Ok((tracer, log_provider)) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(tracing_opentelemetry::layer().with_tracer(tracer))
                    .with(
                        opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge::new(
                            &log_provider,
                        ),
                    )
                    .init();
                tracing::info!("OpenTelemetry enabled, exporting to {}", endpoint);
            }
            Err(e) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .init();
                tracing::warn!(
                    "OpenTelemetry exporter for {} failed to start ({}), using console logging only",
                    endpoint,
                    e
                );
            }
        }
        return;
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(feature = "otel")]
mod otel {
    use opentelemetry::trace::TracerProvider;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::logs::SdkLoggerProvider;
    use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};

    pub(super) fn providers(endpoint: &str) -> anyhow::Result<(SdkTracer, SdkLoggerProvider)> {
        let service_name = std::env::var("OTEL_SERVICE_NAME")
            .unwrap_or_else(|_| "recipe-lab-server".to_string());

        let resource = opentelemetry_sdk::Resource::builder()
            .with_service_name(service_name)
            .build();

        let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;

        let trace_provider = SdkTracerProvider::builder()
            .with_batch_exporter(trace_exporter)
            .with_resource(resource.clone())
            .build();

        let tracer = trace_provider.tracer("recipe-lab-server");
        opentelemetry::global::set_tracer_provider(trace_provider);

        let log_exporter = opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;

        let log_provider = SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build();

        Ok((tracer, log_provider))
    }
}

/// Wrap the router in an `http_request` span per request that logs status
/// and latency when the response is produced.
pub fn trace_requests(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(|response: &Response<_>, latency: Duration, _span: &Span| {
                let status = response.status().as_u16();
                if status >= 500 {
                    tracing::error!(
                        status = %status,
                        latency_ms = %latency.as_millis(),
                        "request failed with server error"
                    );
                } else {
                    tracing::info!(
                        status = %status,
                        latency_ms = %latency.as_millis(),
                        "request completed"
                    );
                }
            })
            .on_failure(
                |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    )
}
