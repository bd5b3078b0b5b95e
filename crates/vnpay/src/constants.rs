/// Payment page on the VNPay sandbox.
pub const SANDBOX_PAY_URL: &str = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html";

/// Merchant transaction query/refund API on the VNPay sandbox.
pub const SANDBOX_API_URL: &str = "https://sandbox.vnpayment.vn/merchant_webapi/api/transaction";

/// Payment page in production.
pub const PRODUCTION_PAY_URL: &str = "https://pay.vnpay.vn/vpcpay.html";

/// Merchant transaction query/refund API in production.
pub const PRODUCTION_API_URL: &str = "https://merchant.vnpay.vn/merchant_webapi/api/transaction";

/// Host used by every sandbox endpoint.
pub const SANDBOX_HOST: &str = "sandbox.vnpayment.vn";

/// Reverse-proxy forwarding header consulted first by the resolver.
pub const FORWARDED_FOR_HEADER: &str = "X-FORWARDED-FOR";

/// Placeholder some proxies put in the forwarding header. Compared case-insensitively.
pub const UNKNOWN_ADDR: &str = "unknown";

/// IPv6 loopback as servlet containers spell it.
pub const IPV6_LOOPBACK_LONG: &str = "0:0:0:0:0:0:0:1";

pub const IPV4_LOOPBACK: &str = "127.0.0.1";

/// Prefix of the resolver's in-band failure sentinel.
pub const INVALID_IP_PREFIX: &str = "Invalid IP:";

/// HMAC-SHA512 output size in bytes.
pub const SIGNATURE_BYTES: usize = 64;

/// HMAC-SHA512 output size once hex encoded.
pub const SIGNATURE_HEX_LEN: usize = SIGNATURE_BYTES * 2;

/// Shortest hash secret accepted without a warning.
pub const MIN_SECRET_LEN: usize = 32;
