//! In-memory pathway database for pipeline tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pathseam_common::{PathseamError, Result};
use pathseam_kegg::{parse_kgml, PathwayDatabase, PathwayRecord};

#[derive(Default)]
pub struct FakeKegg {
    /// (org, gene) → aliases
    aliases: HashMap<(String, String), Vec<String>>,
    /// (org, alias) → path_id → path_name
    pathways: HashMap<(String, String), BTreeMap<String, String>>,
    /// path_id → KGML document
    kgml: HashMap<String, String>,
    pub kgml_fetches: AtomicUsize,
}

impl FakeKegg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gene(mut self, org: &str, gene: &str, aliases: &[&str]) -> Self {
        self.aliases.insert(
            (org.to_string(), gene.to_string()),
            aliases.iter().map(|a| a.to_string()).collect(),
        );
        self
    }

    pub fn alias_pathways(mut self, org: &str, alias: &str, pathways: &[(&str, &str)]) -> Self {
        self.pathways.insert(
            (org.to_string(), alias.to_string()),
            pathways.iter().map(|(id, name)| (id.to_string(), name.to_string())).collect(),
        );
        self
    }

    pub fn pathway(mut self, path_id: &str, kgml: String) -> Self {
        self.kgml.insert(path_id.to_string(), kgml);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.kgml_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PathwayDatabase for FakeKegg {
    async fn find_aliases(&self, org: &str, gene: &str) -> Result<Vec<String>> {
        self.aliases
            .get(&(org.to_string(), gene.to_string()))
            .cloned()
            .ok_or_else(|| PathseamError::GeneNotFound {
                gene: gene.to_string(),
                org: org.to_string(),
            })
    }

    async fn find_pathways_by_alias(
        &self,
        alias: &str,
        org: &str,
    ) -> Result<BTreeMap<String, String>> {
        Ok(self
            .pathways
            .get(&(org.to_string(), alias.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_pathway(&self, path_id: &str) -> Result<PathwayRecord> {
        self.kgml_fetches.fetch_add(1, Ordering::SeqCst);
        let xml = self
            .kgml
            .get(path_id)
            .ok_or_else(|| PathseamError::PathwayNotFound(path_id.to_string()))?;
        parse_kgml(xml)
    }
}

/// A minimal KGML document whose entries are `(id, name list)` genes laid
/// out on a row, with one ECrel between consecutive entries.
pub fn kgml(path_id: &str, entries: &[(u32, &str)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0"?>
<pathway name="path:{path_id}" org="dme" number="{}" title="Pathway {path_id}">
"#,
        path_id.trim_start_matches(char::is_alphabetic)
    );
    for (i, (id, names)) in entries.iter().enumerate() {
        xml.push_str(&format!(
            r#"  <entry id="{id}" name="{names}" type="gene" link="https://www.kegg.jp/dbget-bin/www_bget?{id}">
    <graphics name="{names}" type="rectangle" x="{}" y="100" width="46" height="17"/>
  </entry>
"#,
            (i + 1) * 50
        ));
    }
    for pair in entries.windows(2) {
        xml.push_str(&format!(
            r#"  <relation entry1="{}" entry2="{}" type="ECrel">
    <subtype name="compound" value="{}"/>
  </relation>
"#,
            pair[0].0, pair[1].0, pair[1].0
        ));
    }
    xml.push_str("</pathway>\n");
    xml
}
