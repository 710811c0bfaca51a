//! Directory-level commands: extract a tree of saved pages, convert a
//! category or every category to JSON Lines, and audit the input tree
//! against the catalog.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use xjanko_core::parse_with_candidates_and_sink;

use crate::catalog::{self, Catalog};
use crate::error::{CliError, Result};
use crate::extract;
use crate::output::{JsonLine, JsonRecord};

// =============================================================================
// Page Extraction
// =============================================================================

/// Page assets; never carry a record.
const ASSET_EXTENSIONS: &[&str] = &["css", "gif", "jpg", "js", "png"];

/// Outcome of extracting a tree of saved pages.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// Records written.
    pub written: usize,
    /// Pages skipped because their output file already exists.
    pub existing: usize,
    /// Pages without a data element.
    pub missing: Vec<PathBuf>,
    /// Files that are neither pages nor known assets.
    pub unsupported: Vec<PathBuf>,
}

/// Read a saved page and return its normalized record.
///
/// `Ok(None)` means the page has no data element, which is logged and
/// otherwise ignored. A data element of another type is an error.
pub fn read_page_record(page: &Path) -> Result<Option<String>> {
    let bytes = fs::read(page).map_err(|e| CliError::read(page, e))?;
    let html = String::from_utf8_lossy(&bytes);

    let Some(element) = extract::find_data_element(&html) else {
        tracing::warn!(page = %page.display(), "no \"data\" element, skipping");
        return Ok(None);
    };
    if !element.is_x_janko() {
        return Err(CliError::WrongDataType {
            path: page.to_path_buf(),
            found: element.kind.unwrap_or_default().to_string(),
        });
    }
    Ok(Some(element.normalized()))
}

/// Extract every page below `input_dir` into a mirrored tree below `out_dir`.
///
/// `a/375.htm` becomes `a/375.x-janko`. Pages whose output already exists
/// are left alone, so an interrupted run can be resumed.
pub fn run_extract_tree(input_dir: &Path, out_dir: &Path) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();
    extract_dir(input_dir, Path::new(""), out_dir, &mut report)?;
    Ok(report)
}

fn extract_dir(
    root: &Path,
    relative: &Path,
    out_dir: &Path,
    report: &mut ExtractReport,
) -> Result<()> {
    let dir = root.join(relative);
    let target = out_dir.join(relative);
    fs::create_dir_all(&target).map_err(|e| CliError::write(&target, e))?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| CliError::read(&dir, e))? {
        entries.push(entry.map_err(|e| CliError::read(&dir, e))?.path());
    }
    entries.sort();

    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        if path.is_dir() {
            extract_dir(root, &relative.join(name), out_dir, report)?;
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if ASSET_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        if ext != "htm" && ext != "html" {
            tracing::warn!(file = %path.display(), "unsupported type");
            report.unsupported.push(path);
            continue;
        }

        let out = target.join(name).with_extension("x-janko");
        if out.exists() {
            tracing::debug!(file = %out.display(), "exists, skipping");
            report.existing += 1;
            continue;
        }
        match read_page_record(&path)? {
            Some(record) => {
                fs::write(&out, record).map_err(|e| CliError::write(&out, e))?;
                tracing::info!(file = %out.display(), "extracted");
                report.written += 1;
            }
            None => report.missing.push(path),
        }
    }
    Ok(())
}

// =============================================================================
// JSON Lines Conversion
// =============================================================================

/// Outcome of converting one category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Records written.
    pub written: usize,
    /// Category-relative names of files no candidate accepted.
    pub failed: Vec<String>,
}

/// Directory holding the files of `category` below `input_dir`.
pub fn category_dir(input_dir: &Path, category: &str) -> PathBuf {
    let relative = category.trim_start_matches('/');
    if relative.is_empty() {
        input_dir.to_path_buf()
    } else {
        input_dir.join(relative)
    }
}

/// Output file name for a category: `/Nanro/Litro` becomes `Nanro_Litro.jsonl`.
pub fn output_name(category: &str) -> String {
    format!("{}.jsonl", category.trim_start_matches('/').replace('/', "_"))
}

/// Regular files directly inside `dir`, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CliError::read(dir, e))? {
        let path = entry.map_err(|e| CliError::read(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every file of `category` and write the accepted records to `out`,
/// one JSON object per line.
///
/// Files that fail are listed in the report; the output is written either way.
pub fn run_batch(
    catalog: &Catalog,
    category: &str,
    input_dir: &Path,
    out: &Path,
) -> Result<BatchReport> {
    if !category.starts_with('/') {
        return Err(CliError::InvalidCategory(category.to_string()));
    }
    let candidates = catalog
        .get(category)
        .ok_or_else(|| CliError::UnknownCategory(category.to_string()))?;

    let dir = category_dir(input_dir, category);
    let files = list_files(&dir)?;
    tracing::info!(dir = %dir.display(), files = files.len(), "opening category");

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| CliError::write(parent, e))?;
        }
    }
    let file = File::create(out).map_err(|e| CliError::write(out, e))?;
    let mut writer = BufWriter::new(file);
    let mut report = BatchReport::default();

    for path in &files {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let relative = format!("{}/{}", category.trim_end_matches('/'), name);

        let bytes = fs::read(path).map_err(|e| CliError::read(path, e))?;
        let input = String::from_utf8_lossy(&bytes);
        let sink = |message: &str| tracing::warn!(file = %relative, "{}", message);

        match parse_with_candidates_and_sink(candidates, &input, &sink) {
            Ok(accepted) => {
                tracing::debug!(file = %relative, parser = accepted.index, "parsed");
                let line = JsonLine {
                    file: &relative,
                    data: JsonRecord(&accepted.record),
                };
                serde_json::to_writer(&mut writer, &line)?;
                writer.write_all(b"\n").map_err(|e| CliError::write(out, e))?;
                report.written += 1;
            }
            Err(failures) => {
                for line in failures.to_string().lines() {
                    tracing::info!(file = %relative, "{}", line);
                }
                tracing::warn!(file = %relative, "not parsed");
                report.failed.push(relative);
            }
        }
    }

    writer.flush().map_err(|e| CliError::write(out, e))?;
    Ok(report)
}

/// Run [`run_batch`] for every catalog category whose directory exists.
///
/// Returns the per-category reports in catalog order.
pub fn run_all(
    catalog: &Catalog,
    input_dir: &Path,
    out_dir: &Path,
) -> Result<Vec<(String, BatchReport)>> {
    fs::create_dir_all(out_dir).map_err(|e| CliError::write(out_dir, e))?;

    let mut reports = Vec::new();
    for (category, _) in catalog.categories() {
        if !category_dir(input_dir, category).is_dir() {
            tracing::debug!(category, "no directory, skipping");
            continue;
        }
        let out = out_dir.join(output_name(category));
        let report = run_batch(catalog, category, input_dir, &out)?;
        reports.push((category.to_string(), report));
    }
    Ok(reports)
}

// =============================================================================
// Catalog Check
// =============================================================================

/// Mismatches between the input tree and the catalog.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Directories with files but no catalog entry.
    pub unlisted: Vec<String>,
    /// Catalog entries whose directory is missing or has no files.
    pub empty: Vec<String>,
    /// Directories without files that are neither catalogued nor known to
    /// hold no records.
    pub unknown_empty: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.unlisted.is_empty() && self.empty.is_empty() && self.unknown_empty.is_empty()
    }
}

pub fn run_check(catalog: &Catalog, input_dir: &Path) -> Result<CheckReport> {
    let mut report = CheckReport::default();
    walk(catalog, input_dir, "", &mut report)?;

    for (category, _) in catalog.categories() {
        let dir = category_dir(input_dir, category);
        let has_files = dir.is_dir() && !list_files(&dir)?.is_empty();
        if !has_files {
            report.empty.push(category.to_string());
        }
    }
    Ok(report)
}

fn walk(
    catalog: &Catalog,
    dir: &Path,
    category: &str,
    report: &mut CheckReport,
) -> Result<()> {
    let mut has_files = false;
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CliError::read(dir, e))? {
        let path = entry.map_err(|e| CliError::read(dir, e))?.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path.is_file() {
            has_files = true;
        }
    }

    let key = if category.is_empty() { "/" } else { category };
    if !catalog.contains(key) {
        if has_files {
            report.unlisted.push(key.to_string());
        } else if !catalog::is_unparsed(key) {
            report.unknown_empty.push(key.to_string());
        }
    }

    subdirs.sort();
    for sub in subdirs {
        let name = sub.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let child = format!("{}/{}", category, name);
        walk(catalog, &sub, &child, report)?;
    }
    Ok(())
}
