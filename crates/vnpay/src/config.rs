use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::constants::{
    MIN_SECRET_LEN, PRODUCTION_API_URL, PRODUCTION_PAY_URL, SANDBOX_API_URL, SANDBOX_HOST,
    SANDBOX_PAY_URL,
};
use crate::error::ConfigError;
use crate::hmac::{hmac_sha512, verify_hmac_sha512};

pub const ENV_VAR: &str = "VNPAY_ENV";
pub const PAY_URL_VAR: &str = "VNPAY_PAY_URL";
pub const RETURN_URL_VAR: &str = "VNPAY_RETURN_URL";
pub const TMN_CODE_VAR: &str = "VNPAY_TMN_CODE";
pub const HASH_SECRET_VAR: &str = "VNPAY_HASH_SECRET";
pub const API_URL_VAR: &str = "VNPAY_API_URL";

/// Which VNPay deployment the merchant talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    pub fn default_pay_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_PAY_URL,
            Environment::Production => PRODUCTION_PAY_URL,
        }
    }

    pub fn default_api_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

/// Endpoints and merchant credentials for one gateway environment.
///
/// Immutable once built. Values come from the deployment (see
/// [`GatewayConfig::from_env`]); nothing here is a source constant except the
/// public per-environment endpoint defaults.
#[derive(Clone)]
pub struct GatewayConfig {
    environment: Environment,
    payment_url: String,
    return_url: String,
    merchant_code: String,
    hash_secret: String,
    transaction_query_url: String,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("environment", &self.environment)
            .field("payment_url", &self.payment_url)
            .field("return_url", &self.return_url)
            .field("merchant_code", &self.merchant_code)
            .field("hash_secret", &"[REDACTED]")
            .field("transaction_query_url", &self.transaction_query_url)
            .finish()
    }
}

impl GatewayConfig {
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Load from `VNPAY_*` environment variables.
    ///
    /// Required: `VNPAY_RETURN_URL`, `VNPAY_TMN_CODE`, `VNPAY_HASH_SECRET`.
    /// Optional: `VNPAY_ENV` (sandbox), `VNPAY_PAY_URL`, `VNPAY_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = match var(ENV_VAR) {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };

        GatewayConfigBuilder {
            environment,
            payment_url: var(PAY_URL_VAR),
            return_url: var(RETURN_URL_VAR),
            merchant_code: var(TMN_CODE_VAR),
            hash_secret: var(HASH_SECRET_VAR),
            transaction_query_url: var(API_URL_VAR),
        }
        .build()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn payment_url(&self) -> &str {
        &self.payment_url
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn hash_secret(&self) -> &str {
        &self.hash_secret
    }

    pub fn transaction_query_url(&self) -> &str {
        &self.transaction_query_url
    }

    /// Sign `data` with the merchant hash secret. Empty string on failure.
    pub fn sign(&self, data: &str) -> String {
        hmac_sha512(Some(self.hash_secret.as_str()), Some(data))
    }

    /// Check a hex signature produced with the merchant hash secret.
    pub fn verify(&self, data: &str, signature: &str) -> bool {
        verify_hmac_sha512(self.hash_secret.as_bytes(), data.as_bytes(), signature)
    }
}

/// Programmatic construction with the same validation as `from_env`.
#[derive(Default)]
pub struct GatewayConfigBuilder {
    environment: Environment,
    payment_url: Option<String>,
    return_url: Option<String>,
    merchant_code: Option<String>,
    hash_secret: Option<String>,
    transaction_query_url: Option<String>,
}

impl GatewayConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn payment_url(mut self, url: impl Into<String>) -> Self {
        self.payment_url = Some(url.into());
        self
    }

    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn merchant_code(mut self, code: impl Into<String>) -> Self {
        self.merchant_code = Some(code.into());
        self
    }

    pub fn hash_secret(mut self, secret: impl Into<String>) -> Self {
        self.hash_secret = Some(secret.into());
        self
    }

    pub fn transaction_query_url(mut self, url: impl Into<String>) -> Self {
        self.transaction_query_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<GatewayConfig, ConfigError> {
        let environment = self.environment;

        let return_url = required(self.return_url, RETURN_URL_VAR)?;
        let merchant_code = required(self.merchant_code, TMN_CODE_VAR)?;
        let hash_secret = required(self.hash_secret, HASH_SECRET_VAR)?;

        let payment_url = self
            .payment_url
            .unwrap_or_else(|| environment.default_pay_url().to_string());
        let transaction_query_url = self
            .transaction_query_url
            .unwrap_or_else(|| environment.default_api_url().to_string());

        let payment = validate_url(PAY_URL_VAR, &payment_url)?;
        validate_url(RETURN_URL_VAR, &return_url)?;
        let api = validate_url(API_URL_VAR, &transaction_query_url)?;

        if hash_secret.len() < MIN_SECRET_LEN {
            tracing::warn!(
                len = hash_secret.len(),
                min = MIN_SECRET_LEN,
                "VNPAY_HASH_SECRET is shorter than a gateway-issued secret"
            );
        }

        if environment == Environment::Production
            && [&payment, &api]
                .iter()
                .any(|u| u.host_str() == Some(SANDBOX_HOST))
        {
            tracing::warn!(
                %payment_url,
                %transaction_query_url,
                "production environment is pointing at the VNPay sandbox"
            );
        }

        Ok(GatewayConfig {
            environment,
            payment_url,
            return_url,
            merchant_code,
            hash_secret,
            transaction_query_url,
        })
    }
}

fn required(value: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingRequired(var))
}

fn validate_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|_| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
    })
}
