use actix_web::{get, web, HttpRequest, HttpResponse};
use vnpay::client_ip::resolve_with_source;
use vnpay::invalid_ip;
use vnpay::security::constant_time_eq;

use crate::config::ServerConfig;
use crate::metrics::{metrics_output, record_resolution, REQUESTS};

const SERVICE_NAME: &str = "vnpay-server";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(echo_ip).service(metrics_endpoint);
}

fn record(req: &HttpRequest, status: &str) {
    // Matched pattern, not raw path, keeps label cardinality bounded
    let endpoint = req.match_pattern().unwrap_or_else(|| "unknown".to_string());
    REQUESTS.with_label_values(&[endpoint.as_str(), status]).inc();
}

/// Liveness plus the gateway identity this instance signs for.
///
/// A loaded `ServerConfig` always carries a non-empty hash secret, so there
/// is no degraded state to report here; bad configuration stops the process
/// at startup instead.
#[get("/health")]
pub async fn health(req: HttpRequest, config: web::Data<ServerConfig>) -> HttpResponse {
    let gateway = &config.gateway;
    record(&req, "200");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "environment": gateway.environment().as_str(),
        "merchant_code": gateway.merchant_code(),
    }))
}

#[get("/echo-ip")]
pub async fn echo_ip(req: HttpRequest) -> HttpResponse {
    let outcome = resolve_with_source(&req);
    record_resolution(&outcome);

    let ip = match outcome {
        Ok(resolved) => resolved.addr,
        Err(e) => {
            tracing::warn!(error = %e, "echo-ip: could not resolve client address");
            invalid_ip(&e)
        }
    };

    record(&req, "200");
    HttpResponse::Ok().json(serde_json::json!({ "ip": ip }))
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, config: web::Data<ServerConfig>) -> HttpResponse {
    match &config.metrics_token {
        Some(expected) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None => {
            if !config.public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "forbidden",
                    "message": "Set METRICS_TOKEN or VNPAY_PUBLIC_METRICS=true to access /metrics"
                }));
            }
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics_output())
}
