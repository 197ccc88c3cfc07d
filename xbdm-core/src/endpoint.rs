use crate::error::{XbdmError, XbdmResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well-known XBDM control port
pub const DEFAULT_PORT: u16 = 730;

/// Target device address
///
/// An endpoint identifies the control service of one console. It is
/// immutable; connections are bound to the endpoint they were opened for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create an endpoint on the default control port
    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_PORT)
    }

    /// Build an endpoint from separately entered host and port fields
    ///
    /// Both fields are trimmed. An empty port field selects [`DEFAULT_PORT`];
    /// anything else must be a valid decimal port number.
    pub fn from_fields(host: &str, port: &str) -> XbdmResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(XbdmError::InvalidInput("Host must not be empty".to_string()));
        }
        let port = port.trim();
        if port.is_empty() {
            return Ok(Self::with_default_port(host));
        }
        Ok(Self::new(host, Self::parse_port(port)?))
    }

    fn parse_port(s: &str) -> XbdmResult<u16> {
        s.parse::<u16>()
            .map_err(|_| XbdmError::InvalidInput(format!("Invalid port: {}", s)))
    }

    /// Host name or IP address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for Endpoint {
    type Err = XbdmError;

    /// Parse `"host"`, `"host:port"`, a bare IPv6 address or `"[addr]:port"`
    fn from_str(s: &str) -> XbdmResult<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('[') {
            let invalid = || XbdmError::InvalidInput(format!("Invalid endpoint: {}", s));
            let (host, tail) = rest.split_once(']').ok_or_else(invalid)?;
            if tail.is_empty() {
                return Self::from_fields(host, "");
            }
            let port = tail.strip_prefix(':').ok_or_else(invalid)?;
            return Self::from_fields(host, port);
        }

        match s.split_once(':') {
            // More than one colon without brackets is an IPv6 literal
            Some((_, rest)) if rest.contains(':') => Self::from_fields(s, ""),
            Some((host, port)) => Self::from_fields(host, port),
            None => Self::from_fields(s, ""),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_default_port() {
        let endpoint = Endpoint::with_default_port("10.0.0.17");
        assert_eq!(endpoint.port(), 730);
        assert_eq!(endpoint.to_string(), "10.0.0.17:730");
    }

    #[test]
    fn test_endpoint_from_str() {
        let endpoint: Endpoint = "192.168.1.20:731".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("192.168.1.20", 731));

        let endpoint: Endpoint = " console ".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("console", DEFAULT_PORT));
    }

    #[test]
    fn test_endpoint_ipv6() {
        let endpoint: Endpoint = "::1".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("::1", DEFAULT_PORT));
        assert_eq!(endpoint.to_string(), "[::1]:730");

        let endpoint: Endpoint = "[fe80::1]:731".parse().unwrap();
        assert_eq!(endpoint, Endpoint::new("fe80::1", 731));
        assert_eq!(endpoint.to_string().parse::<Endpoint>().unwrap(), endpoint);

        let endpoint: Endpoint = "[::1]".parse().unwrap();
        assert_eq!(endpoint.port(), DEFAULT_PORT);

        assert!("[::1".parse::<Endpoint>().is_err());
        assert!("[::1]731".parse::<Endpoint>().is_err());
        assert!("[]:730".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_endpoint_rejects_bad_port() {
        assert!(matches!(
            Endpoint::from_fields("10.0.0.17", "73O"),
            Err(XbdmError::InvalidInput(_))
        ));
        assert!(Endpoint::from_fields("10.0.0.17", "70000").is_err());
        assert!(Endpoint::from_fields("  ", "730").is_err());
    }
}
