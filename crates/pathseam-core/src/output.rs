//! JSON persistence of a finished run.
//!
//! Three documents are written to the output directory: the two annotated
//! gene sheets and the seam.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use pathseam_common::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::seam::Seam;
use crate::sheet::GeneSheet;

pub const GENE_A_FILE: &str = "geneA.json";
pub const GENE_Z_FILE: &str = "geneZ.json";
pub const SEAM_FILE: &str = "seamAZ.json";

/// Paths of the documents written by `write_outputs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub gene_a: PathBuf,
    pub gene_z: PathBuf,
    pub seam: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            gene_a: dir.join(GENE_A_FILE),
            gene_z: dir.join(GENE_Z_FILE),
            seam: dir.join(SEAM_FILE),
        }
    }
}

/// Write both sheets and the seam under `dir`, creating it if needed.
pub fn write_outputs(dir: &Path, seam: &Seam) -> Result<OutputPaths> {
    fs::create_dir_all(dir)?;
    let paths = OutputPaths::in_dir(dir);

    write_json(&paths.gene_a, &seam.gene_a)?;
    write_json(&paths.gene_z, &seam.gene_z)?;
    write_json(&paths.seam, seam)?;

    info!(dir = %dir.display(), "Outputs written");
    Ok(paths)
}

pub fn load_gene_sheet(path: &Path) -> Result<GeneSheet> {
    read_json(path)
}

pub fn load_seam(path: &Path) -> Result<Seam> {
    read_json(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
