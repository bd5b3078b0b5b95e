//! Best-effort originating client address for gateway requests.
//!
//! `X-FORWARDED-FOR` is trusted as-is: any client can set it unless a proxy
//! the deployment controls overwrites it. Do not feed the result into fraud
//! checks or rate limiting without that guarantee.

use std::net::Ipv6Addr;

use crate::constants::{
    FORWARDED_FOR_HEADER, INVALID_IP_PREFIX, IPV4_LOOPBACK, IPV6_LOOPBACK_LONG, UNKNOWN_ADDR,
};
use crate::error::ClientIpError;

/// The parts of an inbound request the resolver reads.
pub trait ClientRequest {
    /// Value of header `name`, `None` when absent.
    fn header(&self, name: &str) -> Result<Option<String>, ClientIpError>;

    /// Address of the directly connected peer, without port.
    fn remote_addr(&self) -> Result<String, ClientIpError>;
}

/// Where a resolved address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpSource {
    Forwarded,
    Remote,
}

impl IpSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpSource::Forwarded => "forwarded",
            IpSource::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIp {
    pub addr: String,
    pub source: IpSource,
}

/// Resolve the client address and report which input it came from.
pub fn resolve_with_source<R>(req: &R) -> Result<ResolvedIp, ClientIpError>
where
    R: ClientRequest + ?Sized,
{
    let (addr, source) = match req.header(FORWARDED_FOR_HEADER)? {
        Some(forwarded)
            if !forwarded.is_empty() && !forwarded.eq_ignore_ascii_case(UNKNOWN_ADDR) =>
        {
            (forwarded, IpSource::Forwarded)
        }
        _ => (req.remote_addr()?, IpSource::Remote),
    };

    Ok(ResolvedIp {
        addr: normalize_loopback(addr),
        source,
    })
}

/// Typed resolution: forwarded header first, then the peer address.
pub fn try_resolve_client_ip<R>(req: &R) -> Result<String, ClientIpError>
where
    R: ClientRequest + ?Sized,
{
    resolve_with_source(req).map(|r| r.addr)
}

/// Fail-soft resolution. Errors become `"Invalid IP:<reason>"`.
pub fn resolve_client_ip<R>(req: &R) -> String
where
    R: ClientRequest + ?Sized,
{
    match try_resolve_client_ip(req) {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!(error = %e, "client ip resolution failed");
            invalid_ip(&e)
        }
    }
}

/// The in-band sentinel for a failed resolution.
pub fn invalid_ip(error: &ClientIpError) -> String {
    format!("{INVALID_IP_PREFIX}{error}")
}

/// Rewrite the IPv6 loopback, in any spelling, to `127.0.0.1`.
fn normalize_loopback(addr: String) -> String {
    let is_v6_loopback = addr == IPV6_LOOPBACK_LONG
        || addr
            .parse::<Ipv6Addr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false);

    if is_v6_loopback {
        IPV4_LOOPBACK.to_string()
    } else {
        addr
    }
}

/// Header bytes as ISO-8859-1 text, the way servlet containers expose them.
#[cfg(feature = "actix")]
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(feature = "actix")]
impl ClientRequest for actix_web::HttpRequest {
    fn header(&self, name: &str) -> Result<Option<String>, ClientIpError> {
        Ok(self
            .headers()
            .get(name)
            .map(|value| latin1(value.as_bytes())))
    }

    fn remote_addr(&self) -> Result<String, ClientIpError> {
        self.peer_addr()
            .map(|addr| addr.ip().to_string())
            .ok_or(ClientIpError::MissingPeerAddr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeRequest {
        forwarded: Option<&'static str>,
        remote: Result<&'static str, ClientIpError>,
    }

    impl FakeRequest {
        fn new(forwarded: Option<&'static str>, remote: &'static str) -> Self {
            Self {
                forwarded,
                remote: Ok(remote),
            }
        }
    }

    impl ClientRequest for FakeRequest {
        fn header(&self, name: &str) -> Result<Option<String>, ClientIpError> {
            assert_eq!(name, FORWARDED_FOR_HEADER);
            Ok(self.forwarded.map(String::from))
        }

        fn remote_addr(&self) -> Result<String, ClientIpError> {
            self.remote.clone().map(String::from)
        }
    }

    struct BrokenRequest;

    impl ClientRequest for BrokenRequest {
        fn header(&self, _name: &str) -> Result<Option<String>, ClientIpError> {
            Err(ClientIpError::Unreadable("request already consumed".to_string()))
        }

        fn remote_addr(&self) -> Result<String, ClientIpError> {
            Err(ClientIpError::MissingPeerAddr)
        }
    }

    #[test]
    fn test_forwarded_header_wins() {
        let req = FakeRequest::new(Some("203.0.113.7"), "10.0.0.1");
        assert_eq!(resolve_client_ip(&req), "203.0.113.7");
        assert_eq!(resolve_with_source(&req).unwrap().source, IpSource::Forwarded);
    }

    #[test]
    fn test_falls_back_to_remote() {
        let req = FakeRequest::new(None, "198.51.100.5");
        assert_eq!(resolve_client_ip(&req), "198.51.100.5");
        assert_eq!(resolve_with_source(&req).unwrap().source, IpSource::Remote);
    }

    #[test]
    fn test_empty_header_falls_back() {
        let req = FakeRequest::new(Some(""), "198.51.100.5");
        assert_eq!(resolve_client_ip(&req), "198.51.100.5");
    }

    #[test]
    fn test_unknown_header_any_case_falls_back() {
        for marker in ["unknown", "UNKNOWN", "Unknown"] {
            let req = FakeRequest::new(Some(marker), "198.51.100.5");
            assert_eq!(resolve_client_ip(&req), "198.51.100.5");
        }
    }

    #[test]
    fn test_header_list_passes_through_verbatim() {
        let req = FakeRequest::new(Some("203.0.113.7, 10.0.0.2"), "10.0.0.1");
        assert_eq!(resolve_client_ip(&req), "203.0.113.7, 10.0.0.2");
    }

    #[test]
    fn test_long_ipv6_loopback_normalized() {
        let req = FakeRequest::new(None, "0:0:0:0:0:0:0:1");
        assert_eq!(resolve_client_ip(&req), "127.0.0.1");

        let req = FakeRequest::new(Some("0:0:0:0:0:0:0:1"), "10.0.0.1");
        assert_eq!(resolve_client_ip(&req), "127.0.0.1");
    }

    #[test]
    fn test_short_ipv6_loopback_normalized() {
        let req = FakeRequest::new(None, "::1");
        assert_eq!(resolve_client_ip(&req), "127.0.0.1");
    }

    #[test]
    fn test_other_ipv6_untouched() {
        let req = FakeRequest::new(None, "2001:db8::1");
        assert_eq!(resolve_client_ip(&req), "2001:db8::1");
    }

    #[test]
    fn test_remote_failure_becomes_sentinel() {
        let req = FakeRequest {
            forwarded: None,
            remote: Err(ClientIpError::MissingPeerAddr),
        };
        let ip = resolve_client_ip(&req);
        assert_eq!(ip, "Invalid IP:no peer address on connection");
    }

    #[test]
    fn test_unreadable_request_becomes_sentinel() {
        let ip = resolve_client_ip(&BrokenRequest);
        assert!(ip.starts_with(INVALID_IP_PREFIX));
        assert!(ip.ends_with("request already consumed"));
        assert!(try_resolve_client_ip(&BrokenRequest).is_err());
    }

    #[cfg(feature = "actix")]
    mod actix {
        use super::super::*;
        use actix_web::http::header::HeaderValue;
        use actix_web::test::TestRequest;

        #[test]
        fn test_actix_forwarded_header() {
            let req = TestRequest::default()
                .insert_header(("X-Forwarded-For", "203.0.113.7"))
                .peer_addr("10.0.0.1:5000".parse().unwrap())
                .to_http_request();
            assert_eq!(resolve_client_ip(&req), "203.0.113.7");
        }

        #[test]
        fn test_actix_peer_addr_strips_port() {
            let req = TestRequest::default()
                .peer_addr("198.51.100.5:43210".parse().unwrap())
                .to_http_request();
            assert_eq!(resolve_client_ip(&req), "198.51.100.5");
        }

        #[test]
        fn test_actix_ipv6_loopback_peer() {
            let req = TestRequest::default()
                .peer_addr("[::1]:8080".parse().unwrap())
                .to_http_request();
            assert_eq!(resolve_client_ip(&req), "127.0.0.1");
        }

        #[test]
        fn test_actix_missing_peer() {
            let req = TestRequest::default().to_http_request();
            assert!(resolve_client_ip(&req).starts_with(INVALID_IP_PREFIX));
        }

        #[test]
        fn test_latin1_maps_each_byte_to_one_char() {
            assert_eq!(latin1(b"198.51.100.5"), "198.51.100.5");
            assert_eq!(latin1(b"\xe9\xff"), "\u{e9}\u{ff}");
        }

        #[test]
        fn test_actix_non_ascii_header_decoded_as_latin1() {
            let value = HeaderValue::from_bytes(b"203.0.113.7 caf\xe9").unwrap();
            let req = TestRequest::default()
                .insert_header(("X-Forwarded-For", value))
                .peer_addr("10.0.0.1:5000".parse().unwrap())
                .to_http_request();
            assert_eq!(resolve_client_ip(&req), "203.0.113.7 caf\u{e9}");
            assert_eq!(
                resolve_with_source(&req).unwrap().source,
                IpSource::Forwarded
            );
        }
    }
}
