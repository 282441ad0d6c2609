//! Check that every image a block table references was actually rendered.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::naming::strip_prefix;
use crate::design::parse_block_file_name;
use crate::design::table::{TableRow, read_block_table};
use crate::error::{Result, StimError};
use crate::stim::manifest::{Experiment, Manifest};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    /// The reference does not follow the naming contract.
    Unparseable,
    /// Well-formed but absent from the image set.
    NotRendered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingRef {
    pub table: PathBuf,
    pub trial: usize,
    pub reference: String,
    pub problem: Problem,
}

#[derive(Clone, Debug, Default)]
pub struct VerifyReport {
    pub tables: usize,
    pub rows: usize,
    pub references: usize,
    pub dangling: Vec<DanglingRef>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// `block_N.csv` files directly inside `dir`, ordered by block index.
pub fn find_block_tables(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
            StimError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(index) = parse_block_file_name(&name) {
            found.push((index, entry.path().to_path_buf()));
        }
    }
    found.sort();
    Ok(found.into_iter().map(|(_, p)| p).collect())
}

/// Names of the rendered images: the manifest when one exists, else a
/// listing of `image_dir`.
pub fn rendered_images(image_dir: &Path, experiment: Experiment) -> Result<BTreeSet<String>> {
    if let Some(manifest) = Manifest::load(image_dir, experiment)? {
        debug!("using {} for rendered images", experiment.manifest_file_name());
        return Ok(manifest.file_names().into_iter().map(str::to_string).collect());
    }
    let listing = fs::read_dir(image_dir).map_err(|e| StimError::io(image_dir, e))?;
    let mut names = BTreeSet::new();
    for entry in listing {
        let entry = entry.map_err(|e| StimError::io(image_dir, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Check every block table in `design_dir` against `images`.
pub fn verify_tables<T: TableRow>(
    design_dir: &Path,
    images: &BTreeSet<String>,
    image_prefix: &str,
) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();
    for table in find_block_tables(design_dir)? {
        let rows: Vec<T> = read_block_table(&table)?;
        report.tables += 1;
        report.rows += rows.len();
        for (trial, row) in rows.iter().enumerate() {
            for reference in row.image_refs() {
                report.references += 1;
                let bare = strip_prefix(image_prefix, reference);
                let problem = if bare.parse::<T::Image>().is_err() {
                    Some(Problem::Unparseable)
                } else if !images.contains(bare) {
                    Some(Problem::NotRendered)
                } else {
                    None
                };
                if let Some(problem) = problem {
                    warn!(
                        "{} trial {trial}: {reference} ({problem:?})",
                        table.display()
                    );
                    report.dangling.push(DanglingRef {
                        table: table.clone(),
                        trial,
                        reference: reference.to_string(),
                        problem,
                    });
                }
            }
        }
    }
    info!(
        tables = report.tables,
        rows = report.rows,
        dangling = report.dangling.len(),
        "verified design references"
    );
    Ok(report)
}
