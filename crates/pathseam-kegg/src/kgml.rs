//! KGML (KEGG Markup Language) parser.
//!
//! Handles the `<pathway>` document structure:
//! ```text
//! <pathway name="path:dme00010" org="dme" number="00010" title="...">
//!   <entry id="1" name="dme:Dmel_CG1 dme:Dmel_CG2" type="gene" link="...">
//!     <graphics name="..." x="10" y="20" type="rectangle" .../>
//!   </entry>
//!   <relation entry1="1" entry2="2" type="ECrel">
//!     <subtype name="compound" value="95"/>
//!   </relation>
//! </pathway>
//! ```
//! Reactions are not read.

use std::collections::HashMap;

use pathseam_common::{PathseamError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One parsed KGML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathwayRecord {
    /// e.g. "path:dme00010"
    pub name: String,
    pub org: String,
    pub number: String,
    pub title: String,
    /// Entries in document order; a repeated id replaces the earlier entry.
    pub entries: Vec<RawEntry>,
    pub relations: Vec<RawRelation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub id: u32,
    /// The whitespace-separated `name` attribute, e.g. ["dme:Dmel_CG1", "dme:Dmel_CG2"].
    pub names: Vec<String>,
    pub kind: String,
    pub link: Option<String>,
    pub graphics: Vec<Graphics>,
}

/// Visual layout of an entry. Every attribute is optional in KGML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graphics {
    pub name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub coords: Option<String>,
    pub kind: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fgcolor: Option<String>,
    pub bgcolor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRelation {
    pub entry1: u32,
    pub entry2: u32,
    pub kind: String,
    pub subtypes: Vec<Subtype>,
}

/// A typed relation label such as `compound`/`95` or `activation`/`-->`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtype {
    pub name: String,
    pub value: String,
}

#[derive(Default)]
struct EntryTable {
    entries: Vec<RawEntry>,
    index: HashMap<u32, usize>,
}

impl EntryTable {
    fn push(&mut self, entry: RawEntry) {
        match self.index.get(&entry.id) {
            Some(&pos) => {
                debug!(id = entry.id, "Duplicate KGML entry id, keeping the later one");
                self.entries[pos] = entry;
            }
            None => {
                self.index.insert(entry.id, self.entries.len());
                self.entries.push(entry);
            }
        }
    }
}

/// Parse a KGML document into a `PathwayRecord`.
pub fn parse_kgml(xml: &str) -> Result<PathwayRecord> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut record = PathwayRecord::default();
    let mut entries = EntryTable::default();
    let mut current_entry: Option<RawEntry> = None;
    let mut current_relation: Option<RawRelation> = None;
    let mut seen_pathway = false;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| PathseamError::Xml(format!("at byte {}: {}", reader.buffer_position(), e)))?;

        let (start, self_closing) = match &event {
            Event::Start(e) => (Some(e), false),
            Event::Empty(e) => (Some(e), true),
            _ => (None, false),
        };

        if let Some(e) = start {
            match e.name().as_ref() {
                b"pathway" => {
                    let attrs = attributes(e)?;
                    record.name = attrs.get("name").cloned().unwrap_or_default();
                    record.org = attrs.get("org").cloned().unwrap_or_default();
                    record.number = attrs.get("number").cloned().unwrap_or_default();
                    record.title = attrs.get("title").cloned().unwrap_or_default();
                    seen_pathway = true;
                }
                b"entry" => {
                    let entry = parse_entry(e)?;
                    if self_closing {
                        entries.push(entry);
                    } else {
                        current_entry = Some(entry);
                    }
                }
                b"graphics" => {
                    if let Some(entry) = current_entry.as_mut() {
                        entry.graphics.push(parse_graphics(e)?);
                    }
                }
                b"relation" => {
                    let relation = parse_relation(e)?;
                    if self_closing {
                        record.relations.push(relation);
                    } else {
                        current_relation = Some(relation);
                    }
                }
                b"subtype" => {
                    if let Some(relation) = current_relation.as_mut() {
                        let attrs = attributes(e)?;
                        relation.subtypes.push(Subtype {
                            name: attrs.get("name").cloned().unwrap_or_default(),
                            value: attrs.get("value").cloned().unwrap_or_default(),
                        });
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::End(e) => match e.name().as_ref() {
                b"entry" => {
                    if let Some(entry) = current_entry.take() {
                        entries.push(entry);
                    }
                }
                b"relation" => {
                    if let Some(relation) = current_relation.take() {
                        record.relations.push(relation);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_pathway {
        return Err(PathseamError::Xml("document has no <pathway> element".into()));
    }

    record.entries = entries.entries;
    debug!(
        pathway = %record.name,
        entries = record.entries.len(),
        relations = record.relations.len(),
        "Parsed KGML"
    );
    Ok(record)
}

fn attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| PathseamError::Xml(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| PathseamError::Xml(err.to_string()))?
            .into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

fn required<'a>(attrs: &'a HashMap<String, String>, element: &str, key: &str) -> Result<&'a str> {
    attrs
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| PathseamError::Xml(format!("<{element}> is missing the `{key}` attribute")))
}

fn parse_id(element: &str, key: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .map_err(|_| PathseamError::Xml(format!("<{element}> has a non-integer `{key}`: {raw:?}")))
}

fn parse_number(key: &str, raw: Option<&String>) -> Result<Option<f64>> {
    raw.map(|v| {
        v.trim()
            .parse()
            .map_err(|_| PathseamError::Xml(format!("<graphics> has a non-numeric `{key}`: {v:?}")))
    })
    .transpose()
}

fn parse_entry(e: &BytesStart) -> Result<RawEntry> {
    let attrs = attributes(e)?;
    Ok(RawEntry {
        id: parse_id("entry", "id", required(&attrs, "entry", "id")?)?,
        names: attrs
            .get("name")
            .map(|n| n.split_whitespace().map(String::from).collect())
            .unwrap_or_default(),
        kind: attrs.get("type").cloned().unwrap_or_default(),
        link: attrs.get("link").cloned(),
        graphics: Vec::new(),
    })
}

fn parse_graphics(e: &BytesStart) -> Result<Graphics> {
    let attrs = attributes(e)?;
    Ok(Graphics {
        name: attrs.get("name").cloned(),
        x: parse_number("x", attrs.get("x"))?,
        y: parse_number("y", attrs.get("y"))?,
        coords: attrs.get("coords").cloned(),
        kind: attrs.get("type").cloned(),
        width: parse_number("width", attrs.get("width"))?,
        height: parse_number("height", attrs.get("height"))?,
        fgcolor: attrs.get("fgcolor").cloned(),
        bgcolor: attrs.get("bgcolor").cloned(),
    })
}

fn parse_relation(e: &BytesStart) -> Result<RawRelation> {
    let attrs = attributes(e)?;
    Ok(RawRelation {
        entry1: parse_id("relation", "entry1", required(&attrs, "relation", "entry1")?)?,
        entry2: parse_id("relation", "entry2", required(&attrs, "relation", "entry2")?)?,
        kind: attrs.get("type").cloned().unwrap_or_default(),
        subtypes: Vec::new(),
    })
}
