//! RPC endpoint validation
//!
//! Only HTTP(S) endpoints are accepted since the connection handle uses
//! alloy's HTTP transport. Provider URLs often carry an API key in the path
//! or query, so anything written to logs goes through [`endpoint_label`].

use crate::{Error, Result};
use url::Url;

/// Parse and validate a node endpoint URL
pub fn parse_rpc_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::MalformedUrl(format!(
            "{} is empty",
            super::RPC_URL_ENV
        )));
    }

    let url: Url = raw
        .parse()
        .map_err(|e| Error::MalformedUrl(format!("{}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::MalformedUrl(format!(
                "unsupported scheme '{}', expected http or https",
                other
            )));
        }
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::MalformedUrl("missing host".to_string()));
    }

    Ok(url)
}

/// `scheme://host[:port]`, with path, query and credentials dropped
pub fn endpoint_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_local_node() {
        let url = parse_rpc_url("http://localhost:8545").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8545));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let url = parse_rpc_url("  https://mainnet.base.org\n").unwrap();
        assert_eq!(url.as_str(), "https://mainnet.base.org/");
    }

    #[test]
    fn rejects_empty() {
        let err = parse_rpc_url("").unwrap_err();
        assert!(matches!(err, Error::MalformedUrl(_)));
        assert!(err.to_string().contains("RPC_URL is empty"));
    }

    #[test]
    fn rejects_relative_and_garbage() {
        assert!(matches!(
            parse_rpc_url("localhost:8545/rpc"),
            Err(Error::MalformedUrl(_))
        ));
        assert!(matches!(
            parse_rpc_url("not a url"),
            Err(Error::MalformedUrl(_))
        ));
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = parse_rpc_url("wss://eth.llamarpc.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'wss'"));
    }

    #[test]
    fn label_drops_path_and_credentials() {
        let url = parse_rpc_url("https://user:pw@eth-mainnet.g.alchemy.com/v2/KEY?x=1").unwrap();
        assert_eq!(endpoint_label(&url), "https://eth-mainnet.g.alchemy.com");

        let url = parse_rpc_url("http://127.0.0.1:8545").unwrap();
        assert_eq!(endpoint_label(&url), "http://127.0.0.1:8545");
    }
}
