//! Helpers for integrating with the VNPay payment gateway.
//!
//! Three independent pieces, none of which hold shared mutable state:
//!
//! - **Configuration** ([`GatewayConfig`]) — endpoint URLs and merchant
//!   credentials, loaded from the environment instead of source constants
//! - **Signer** ([`hmac_sha512`]) — HMAC-SHA512 over a UTF-8 payload,
//!   rendered as 128 lowercase hex characters
//! - **Client IP resolver** ([`resolve_client_ip`]) — best-effort originating
//!   address from `X-FORWARDED-FOR` or the connection peer
//!
//! The two public boundaries are fail-soft: signing failures become `""` and
//! resolver failures become `"Invalid IP:<reason>"`. Callers that want the
//! typed failure use [`try_hmac_sha512`] and [`try_resolve_client_ip`].
//!
//! # Quick example
//!
//! ```
//! use vnpay::{hmac_sha512, GatewayConfig};
//!
//! let config = GatewayConfig::builder()
//!     .return_url("https://shop.example.com/vnpay-return")
//!     .merchant_code("DEMO0001")
//!     .hash_secret("an-environment-supplied-secret")
//!     .build()
//!     .unwrap();
//!
//! let signature = config.sign("vnp_Amount=1000000&vnp_Command=pay");
//! assert_eq!(signature.len(), 128);
//! assert_eq!(signature, hmac_sha512(Some(config.hash_secret()), Some("vnp_Amount=1000000&vnp_Command=pay")));
//! ```

pub mod client_ip;
pub mod config;
pub mod constants;
pub mod error;
pub mod hmac;
pub mod security;

pub use client_ip::{
    invalid_ip, resolve_client_ip, resolve_with_source, try_resolve_client_ip, ClientRequest,
    IpSource, ResolvedIp,
};
pub use config::{Environment, GatewayConfig, GatewayConfigBuilder};
pub use constants::*;
pub use error::{ClientIpError, ConfigError, SignatureError};
pub use crate::hmac::{hmac_sha512, try_hmac_sha512, verify_hmac_sha512};
