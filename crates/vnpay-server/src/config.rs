use std::fmt;
use vnpay::{ConfigError, GatewayConfig};

const DEFAULT_PORT: u16 = 4030;

/// Everything the service needs at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Bearer token required for /metrics (None = see `public_metrics`)
    pub metrics_token: Option<String>,
    /// Serve /metrics without a token when none is configured
    pub public_metrics: bool,
    pub gateway: GatewayConfig,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("port", &self.port)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_metrics", &self.public_metrics)
            .field("gateway", &self.gateway)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = GatewayConfig::from_lookup(&lookup)?;

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let metrics_token = lookup("METRICS_TOKEN").filter(|s| !s.is_empty());

        let public_metrics = lookup("VNPAY_PUBLIC_METRICS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        if metrics_token.is_none() && public_metrics {
            tracing::warn!("VNPAY_PUBLIC_METRICS=true: /metrics is publicly accessible");
        }

        Ok(Self {
            port,
            metrics_token,
            public_metrics,
            gateway,
        })
    }
}
