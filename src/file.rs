// src/file.rs

use std::{
    error::Error,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::config::consts::{CEREMONIES_FILE, MOVIES_FILE, NOMINATIONS_FILE, PERSONS_FILE};
use crate::config::options::ExportOptions;
use crate::csv::write_row;
use crate::records::{CeremonyRecord, MovieDetailRecord, NominationRecord, PersonDetailRecord};

/// Create or truncate `path` and write the optional header line, then `rows`.
pub fn write_rows(
    path: &Path,
    headers: Option<&[String]>,
    rows: impl IntoIterator<Item = Vec<String>>,
    sep: char,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    if let Some(h) = headers {
        write_row(&mut out, h, sep)?;
    }
    rows.into_iter().try_for_each(|row| write_row(&mut out, &row, sep))?;
    out.flush()?;
    Ok(())
}

/// Write `<out_dir>/<stem>.<ext>` for one record kind. Returns the path written.
fn write_records<R>(
    export: &ExportOptions,
    stem: &str,
    headers: Vec<String>,
    records: &[R],
    to_row: impl Fn(&R) -> Vec<String>,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = export.path_for(stem);
    let headers = export.include_headers.then_some(headers);
    write_rows(&path, headers.as_deref(), records.iter().map(to_row), export.format.delim())?;
    logf!("wrote {} rows to {}", records.len(), path.display());
    Ok(path)
}

pub fn write_nominations(export: &ExportOptions, records: &[NominationRecord]) -> Result<PathBuf, Box<dyn Error>> {
    write_records(export, NOMINATIONS_FILE, NominationRecord::headers(), records, NominationRecord::to_row)
}

pub fn write_movies(export: &ExportOptions, records: &[MovieDetailRecord]) -> Result<PathBuf, Box<dyn Error>> {
    write_records(export, MOVIES_FILE, MovieDetailRecord::headers(), records, MovieDetailRecord::to_row)
}

pub fn write_persons(export: &ExportOptions, records: &[PersonDetailRecord]) -> Result<PathBuf, Box<dyn Error>> {
    write_records(export, PERSONS_FILE, PersonDetailRecord::headers(), records, PersonDetailRecord::to_row)
}

pub fn write_ceremonies(export: &ExportOptions, records: &[CeremonyRecord]) -> Result<PathBuf, Box<dyn Error>> {
    write_records(export, CEREMONIES_FILE, CeremonyRecord::headers(), records, CeremonyRecord::to_row)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(format!("{} exists and is not a directory", dir.display()).into()),
        Err(_) => Ok(fs::create_dir_all(dir)?),
    }
}
