use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::PathseamError;

/// An HTTP client that only talks to approved hosts.
///
/// Pathseam only ever needs the KEGG REST service; loopback hosts are
/// allowed so that a local KEGG mirror can be used for offline work.
#[derive(Debug, Clone)]
pub struct AllowlistClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl AllowlistClient {
    /// Builds a client with the default allowlist and the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, PathseamError> {
        let allowlist = [
            "rest.kegg.jp", // KEGG REST
            "localhost",
            "127.0.0.1",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("pathseam/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PathseamError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current allowlist.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    /// GET request builder for an allowed URL.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, PathseamError> {
        if !self.is_allowed(url) {
            return Err(PathseamError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AllowlistClient {
        AllowlistClient::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_kegg_host_allowed() {
        let c = client();
        assert!(c.is_allowed("https://rest.kegg.jp/find/dme/hmgcr"));
        assert!(c.is_allowed("http://localhost:8080/get/dme00010/kgml"));
    }

    #[test]
    fn test_foreign_host_rejected() {
        let c = client();
        assert!(!c.is_allowed("https://example.com/get/dme00010"));
        assert!(!c.is_allowed("not a url"));
        assert!(matches!(
            c.get("https://evil.kegg.jp.example.com/"),
            Err(PathseamError::Security(_))
        ));
    }

    #[test]
    fn test_allow_domain_extends_list() {
        let mut c = client();
        assert!(!c.is_allowed("https://kegg.mirror.internal/get/x"));
        c.allow_domain("kegg.mirror.internal");
        assert!(c.is_allowed("https://kegg.mirror.internal/get/x"));
    }
}
