use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Serialize rows to a CSV file, replacing whatever was there before.
///
/// The rows land in a temp file next to the destination and are renamed into
/// place, so a failed run never leaves a partial file for the next stage to
/// pick up.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .map_err(|err| Error::io(format!("create output dir: {}", parent.display()), err))?;

    let tmp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|err| Error::io(format!("create temp file in: {}", parent.display()), err))?;

    let mut writer = csv::Writer::from_writer(tmp.as_file());
    for row in rows {
        writer.serialize(row).map_err(|err| {
            Error::io(
                format!("write csv row: {}", path.display()),
                std::io::Error::other(err),
            )
        })?;
    }
    writer
        .flush()
        .map_err(|err| Error::io(format!("flush csv: {}", path.display()), err))?;
    drop(writer);

    tmp.persist(path)
        .map_err(|err| Error::io(format!("persist csv: {}", path.display()), err.error))?;

    Ok(())
}

/// Deserialize every row of a CSV file.
///
/// A missing file is `NotFound` (the upstream stage did not run); a file
/// that exists but does not parse as tabular data is `Format`.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    let file = open_input(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: T = row.map_err(|err| Error::Format {
            path: path.to_path_buf(),
            source: err,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Header plus rows of a CSV file, without any schema interpretation.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: csv::StringRecord,
    pub rows: Vec<csv::StringRecord>,
}

pub fn read_table(path: &Path) -> Result<Table, Error> {
    let file = open_input(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|err| Error::Format {
            path: path.to_path_buf(),
            source: err,
        })?
        .clone();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| Error::Format {
            path: path.to_path_buf(),
            source: err,
        })?;
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

pub fn write_table(path: &Path, table: &Table) -> Result<(), Error> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|err| Error::io(format!("create temp file in: {}", parent.display()), err))?;

    let mut writer = csv::Writer::from_writer(tmp.as_file());
    writer.write_record(&table.headers).map_err(|err| {
        Error::io(
            format!("write csv header: {}", path.display()),
            std::io::Error::other(err),
        )
    })?;
    for row in &table.rows {
        writer.write_record(row).map_err(|err| {
            Error::io(
                format!("write csv row: {}", path.display()),
                std::io::Error::other(err),
            )
        })?;
    }
    writer
        .flush()
        .map_err(|err| Error::io(format!("flush csv: {}", path.display()), err))?;
    drop(writer);

    tmp.persist(path)
        .map_err(|err| Error::io(format!("persist csv: {}", path.display()), err.error))?;

    Ok(())
}

fn open_input(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::io(format!("open input: {}", path.display()), err)
        }
    })
}
