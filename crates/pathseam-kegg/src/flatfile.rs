//! Parsers for KEGG plain-text responses.
//!
//! `/find` returns tab-separated lines:
//! ```text
//! dme:Dmel_CG10367\tHmgcr, CG10367, Dmel\CG10367; 3-hydroxy-3-methylglutaryl-CoA reductase
//! ```
//! `/get` returns a DBGET flat file whose keywords occupy the first twelve
//! columns; continuation lines are indented:
//! ```text
//! PATHWAY     dme00072  Synthesis and degradation of ketone bodies
//!             dme00900  Terpenoid backbone biosynthesis
//! ```

use std::collections::BTreeMap;

/// Name variants from the first `/find` result line.
///
/// Only the first hit is used. The symbol list is the text between the
/// first tab and the first `;` (the remainder is the free-text definition).
pub fn parse_find_aliases(body: &str) -> Vec<String> {
    let Some(first) = body.lines().find(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };
    let Some(symbols) = first.split('\t').nth(1) else {
        return Vec::new();
    };
    let symbols = symbols.split(';').next().unwrap_or_default();

    symbols
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// The data lines of one keyword section, with the keyword column stripped.
pub fn section_lines<'a>(body: &'a str, keyword: &str) -> Vec<&'a str> {
    let mut lines = Vec::new();
    let mut inside = false;

    for line in body.lines() {
        if line.is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            if inside {
                lines.push(line.trim());
            }
            continue;
        }
        if inside {
            break;
        }
        let (key, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if key == keyword {
            inside = true;
            let rest = rest.trim();
            if !rest.is_empty() {
                lines.push(rest);
            }
        }
    }

    lines
}

/// The PATHWAY section of a gene flat file as path_id → path_name.
pub fn parse_pathway_section(body: &str) -> BTreeMap<String, String> {
    section_lines(body, "PATHWAY")
        .into_iter()
        .filter_map(|line| {
            let (id, name) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            if id.is_empty() {
                return None;
            }
            Some((id.to_string(), name.trim().to_string()))
        })
        .collect()
}
