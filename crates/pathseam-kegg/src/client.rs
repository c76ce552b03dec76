//! KEGG REST API client.
//!
//! Endpoints used:
//!   find: https://rest.kegg.jp/find/{org}/{gene}
//!   get:  https://rest.kegg.jp/get/{org}:{gene}
//!   kgml: https://rest.kegg.jp/get/{path_id}/kgml
//!
//! No retry or backoff: a failed request fails the call.

use std::collections::BTreeMap;

use async_trait::async_trait;
use pathseam_common::config::KeggConfig;
use pathseam_common::http::AllowlistClient;
use pathseam_common::{PathseamError, Result};
use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use crate::flatfile::{parse_find_aliases, parse_pathway_section};
use crate::kgml::{parse_kgml, PathwayRecord};
use crate::PathwayDatabase;

pub struct KeggClient {
    client: AllowlistClient,
    base_url: Url,
}

impl KeggClient {
    pub fn new(config: &KeggConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PathseamError::Config(format!("invalid kegg.base_url {:?}: {}", config.base_url, e)))?;

        let mut client = AllowlistClient::new(config.timeout())?;
        if let Some(host) = base_url.host_str() {
            client.allow_domain(host);
        }

        Ok(Self { client, base_url })
    }

    /// Build `{base_url}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PathseamError::Config(format!("kegg.base_url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a text resource. `None` for 404 or an empty body, which is how
    /// KEGG reports "no such entry".
    async fn get_text(&self, url: &Url) -> Result<Option<String>> {
        debug!(%url, "KEGG request");
        let resp = self.client.get(url.as_str())?.send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = resp.error_for_status()?.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl PathwayDatabase for KeggClient {
    #[instrument(skip(self))]
    async fn find_aliases(&self, org: &str, gene: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["find", org, gene])?;
        let aliases = self
            .get_text(&url)
            .await?
            .map(|body| parse_find_aliases(&body))
            .unwrap_or_default();

        if aliases.is_empty() {
            return Err(PathseamError::GeneNotFound {
                gene: gene.to_string(),
                org: org.to_string(),
            });
        }
        debug!(?aliases, "KEGG find returned aliases");
        Ok(aliases)
    }

    #[instrument(skip(self))]
    async fn find_pathways_by_alias(
        &self,
        alias: &str,
        org: &str,
    ) -> Result<BTreeMap<String, String>> {
        let entry = format!("{org}:{alias}");
        let url = self.endpoint(&["get", entry.as_str()])?;

        let pathways = self
            .get_text(&url)
            .await?
            .map(|body| parse_pathway_section(&body))
            .unwrap_or_default();

        debug!(n = pathways.len(), "KEGG get returned pathways");
        Ok(pathways)
    }

    #[instrument(skip(self))]
    async fn fetch_pathway(&self, path_id: &str) -> Result<PathwayRecord> {
        let url = self.endpoint(&["get", path_id, "kgml"])?;
        let xml = self
            .get_text(&url)
            .await?
            .ok_or_else(|| PathseamError::PathwayNotFound(path_id.to_string()))?;
        parse_kgml(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> KeggClient {
        KeggClient::new(&KeggConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("https://rest.kegg.jp");
        let url = c.endpoint(&["get", "dme00010", "kgml"]).unwrap();
        assert_eq!(url.as_str(), "https://rest.kegg.jp/get/dme00010/kgml");
    }

    #[test]
    fn test_endpoint_keeps_mirror_prefix() {
        let c = client("http://localhost:8080/kegg/");
        let url = c.endpoint(&["find", "dme", "hmgcr"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/kegg/find/dme/hmgcr");
    }

    #[test]
    fn test_endpoint_encodes_alias() {
        let c = client("https://rest.kegg.jp");
        let url = c.endpoint(&["get", "dme:Dmel\\CG10367"]).unwrap();
        assert!(!url.path().contains('\\'));
        assert!(url.path().starts_with("/get/dme:Dmel"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = KeggClient::new(&KeggConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(PathseamError::Config(_))));
    }
}
