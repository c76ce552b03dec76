//! `KeggClient` against a local stand-in for the KEGG REST service.
//!
//! Each test binds an ephemeral port on 127.0.0.1 and answers requests from
//! a fixed route table, so status and body handling is checked offline.

use std::collections::HashMap;
use std::sync::Arc;

use pathseam_common::config::KeggConfig;
use pathseam_common::PathseamError;
use pathseam_kegg::{KeggClient, PathwayDatabase};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

type Routes = HashMap<&'static str, (u16, &'static str)>;

const HMGCR_FIND: &str =
    "dme:Dmel_CG10367\tHmgcr, CG10367; 3-hydroxy-3-methylglutaryl coenzyme A reductase\n";

const HMGCR_FLAT: &str = "\
ENTRY       Dmel_CG10367      CDS       T00030
PATHWAY     dme00900  Terpenoid backbone biosynthesis
            dme01100  Metabolic pathways
///
";

const MINIMAL_KGML: &str = r#"<?xml version="1.0"?>
<pathway name="path:dme00900" org="dme" number="00900" title="Terpenoid backbone biosynthesis">
    <entry id="1" name="dme:Dmel_CG10367" type="gene"/>
</pathway>
"#;

/// Serve `routes` on a fresh loopback port and return a client pointed at it.
/// Unrouted paths get a 404.
async fn serve(routes: Routes) -> KeggClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let _ = respond(stream, &routes).await;
            });
        }
    });

    KeggClient::new(&KeggConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
    })
    .unwrap()
}

async fn respond(stream: TcpStream, routes: &Routes) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await? == 0 || header.trim().is_empty() {
            break;
        }
    }

    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .replace("%3A", ":");
    let (status, body) = routes.get(path.as_str()).copied().unwrap_or((404, ""));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Internal Server Error",
    };

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

#[tokio::test]
async fn test_find_aliases_parses_first_hit() {
    let kegg = serve(HashMap::from([("/find/dme/hmgcr", (200, HMGCR_FIND))])).await;

    let aliases = kegg.find_aliases("dme", "hmgcr").await.unwrap();
    assert_eq!(aliases, vec!["Hmgcr", "CG10367"]);
}

#[tokio::test]
async fn test_empty_find_body_is_gene_not_found() {
    let kegg = serve(HashMap::from([("/find/dme/nosuchgene", (200, "\n"))])).await;

    let err = kegg.find_aliases("dme", "nosuchgene").await.unwrap_err();
    match err {
        PathseamError::GeneNotFound { gene, org } => {
            assert_eq!(gene, "nosuchgene");
            assert_eq!(org, "dme");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_find_404_is_gene_not_found() {
    let kegg = serve(Routes::new()).await;

    let err = kegg.find_aliases("dme", "nosuchgene").await.unwrap_err();
    assert!(matches!(err, PathseamError::GeneNotFound { .. }));
}

#[tokio::test]
async fn test_pathways_by_alias_reads_pathway_section() {
    let kegg = serve(HashMap::from([("/get/dme:Hmgcr", (200, HMGCR_FLAT))])).await;

    let pathways = kegg.find_pathways_by_alias("Hmgcr", "dme").await.unwrap();
    assert_eq!(pathways.keys().collect::<Vec<_>>(), vec!["dme00900", "dme01100"]);
    assert_eq!(pathways["dme01100"], "Metabolic pathways");
}

#[tokio::test]
async fn test_unknown_alias_has_no_pathways() {
    let kegg = serve(Routes::new()).await;

    let pathways = kegg.find_pathways_by_alias("CG17907", "dme").await.unwrap();
    assert!(pathways.is_empty());
}

#[tokio::test]
async fn test_fetch_pathway_parses_kgml() {
    let kegg = serve(HashMap::from([("/get/dme00900/kgml", (200, MINIMAL_KGML))])).await;

    let record = kegg.fetch_pathway("dme00900").await.unwrap();
    assert_eq!(record.name, "path:dme00900");
    assert_eq!(record.entries.len(), 1);
}

#[tokio::test]
async fn test_missing_kgml_is_pathway_not_found() {
    let kegg = serve(HashMap::from([("/get/dme00564/kgml", (200, "  \n"))])).await;

    let err = kegg.fetch_pathway("dme99999").await.unwrap_err();
    assert!(matches!(err, PathseamError::PathwayNotFound(ref id) if id == "dme99999"));

    let err = kegg.fetch_pathway("dme00564").await.unwrap_err();
    assert!(matches!(err, PathseamError::PathwayNotFound(ref id) if id == "dme00564"));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let kegg = serve(HashMap::from([
        ("/find/dme/hmgcr", (500, "")),
        ("/get/dme:Hmgcr", (500, "")),
        ("/get/dme00900/kgml", (500, "")),
    ]))
    .await;

    assert!(matches!(kegg.find_aliases("dme", "hmgcr").await, Err(PathseamError::Http(_))));
    assert!(matches!(
        kegg.find_pathways_by_alias("Hmgcr", "dme").await,
        Err(PathseamError::Http(_))
    ));
    assert!(matches!(kegg.fetch_pathway("dme00900").await, Err(PathseamError::Http(_))));
}
