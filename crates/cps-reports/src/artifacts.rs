/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Local snapshot artifacts: one CSV per table below the data folder.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cps_core::{
  to_table_rows, validate_records, Cell, TableId, TableRecord, TableRows, TableSchema, Violation,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{ReportError, ReportResult};

/// Side artifact describing the rows that failed validation
#[derive(Debug, Serialize)]
struct InvalidRowsReport<'a> {
  table: &'a str,
  violation_count: usize,
  violations: &'a [Violation],
  rows: Vec<BTreeMap<&'a str, String>>,
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
  data_dir: PathBuf,
}

impl ArtifactStore {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    Self { data_dir: data_dir.into() }
  }

  pub fn data_dir(&self) -> &Path {
    &self.data_dir
  }

  pub fn path(&self, table: TableId) -> PathBuf {
    table.artifact_path(&self.data_dir)
  }

  /// `<table>.invalid.json` next to the table's CSV
  pub fn invalid_path(&self, table: TableId) -> PathBuf {
    self.path(table).with_file_name(format!("{}.invalid.json", table.name()))
  }

  pub fn exists(&self, table: TableId) -> bool {
    self.path(table).is_file()
  }

  /// Write a snapshot. Identical rows always produce identical bytes.
  pub fn write_rows(&self, table: TableId, rows: &TableRows) -> ReportResult<PathBuf> {
    let path = self.path(table);
    write_csv(&path, rows)?;
    info!("Wrote {} rows of {} to {}", rows.len(), table, path.display());
    Ok(path)
  }

  pub fn write_records<R: TableRecord>(&self, records: &[R]) -> ReportResult<PathBuf> {
    self.write_rows(R::TABLE, &to_table_rows(records))
  }

  /// Deserialize the snapshot of a table into typed rows
  pub fn read_records<R: DeserializeOwned>(&self, table: TableId) -> ReportResult<Vec<R>> {
    let path = self.path(table);
    let mut reader = csv::Reader::from_path(&path)
      .map_err(|e| ReportError::Io(format!("{}: {}", path.display(), e)))?;
    let records = reader.deserialize().collect::<Result<Vec<R>, _>>()?;
    debug!("Read {} rows of {} from {}", records.len(), table, path.display());
    Ok(records)
  }

  /// Read the snapshot of a table as schema-typed cells
  pub fn read_rows(&self, table: TableId) -> ReportResult<TableRows> {
    read_csv_rows(self.path(table), table.schema())
  }

  /// Drop a stale snapshot; missing files are fine
  pub fn remove(&self, table: TableId) -> ReportResult<()> {
    let path = self.path(table);
    if path.exists() {
      fs::remove_file(&path)?;
      debug!("Removed stale snapshot {}", path.display());
    }
    Ok(())
  }

  /// Dump the rows named by `violations` for diagnosis
  pub fn write_invalid(
    &self,
    table: TableId,
    violations: &[Violation],
    rows: &TableRows,
  ) -> ReportResult<PathBuf> {
    let mut indices: Vec<usize> = violations.iter().map(|v| v.row).collect();
    indices.sort_unstable();
    indices.dedup();

    let rows = indices
      .into_iter()
      .filter_map(|idx| rows.rows.get(idx))
      .map(|row| {
        rows.columns.iter().map(String::as_str).zip(row.iter().map(Cell::to_string)).collect()
      })
      .collect();

    let report = InvalidRowsReport {
      table: table.name(),
      violation_count: violations.len(),
      violations,
      rows,
    };

    let path = self.invalid_path(table);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_vec_pretty(&report)?)?;
    info!("Wrote {} invalid rows of {} to {}", report.rows.len(), table, path.display());
    Ok(path)
  }

  /// Validate typed records against their table schema and named rules. On
  /// failure the offending rows go to the invalid side artifact and nothing
  /// else is written.
  pub fn ensure_valid<R: TableRecord>(&self, records: &[R]) -> ReportResult<()> {
    let report = validate_records(records);
    let Some(first) = report.violations.first() else {
      return Ok(());
    };

    error!(
      "{} failed validation: {} violation(s) in {} row(s)",
      R::TABLE,
      report.violations.len(),
      report.invalid_rows.len()
    );
    for violation in report.violations.iter().take(10) {
      error!("{}: {}", R::TABLE, violation);
    }
    self.write_invalid(R::TABLE, &report.violations, &to_table_rows(records))?;

    Err(ReportError::SchemaValidation {
      table: R::TABLE,
      violation_count: report.violations.len(),
      first: first.to_string(),
    })
  }
}

fn write_csv(path: &Path, rows: &TableRows) -> ReportResult<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let mut writer = csv::Writer::from_path(path)?;
  writer.write_record(&rows.columns)?;
  for row in &rows.rows {
    writer.write_record(row.iter().map(Cell::to_string))?;
  }
  writer.flush()?;
  Ok(())
}

/// Parse a CSV file with a header into cells typed by `schema`. Columns are
/// matched by name and reordered to schema order; extra columns are dropped.
pub fn read_csv_rows(path: impl AsRef<Path>, schema: &TableSchema) -> ReportResult<TableRows> {
  let path = path.as_ref();
  let mut reader = csv::Reader::from_path(path)
    .map_err(|e| ReportError::Io(format!("{}: {}", path.display(), e)))?;
  let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

  let mut positions = Vec::with_capacity(schema.fields.len());
  for field in schema.fields {
    let idx = headers.iter().position(|h| h.trim() == field.name).ok_or_else(|| {
      ReportError::InvalidRecord {
        table: schema.table,
        message: format!("column '{}' missing from {}", field.name, path.display()),
      }
    })?;
    positions.push(idx);
  }

  let mut table_rows = TableRows::empty(schema);
  for (line, record) in reader.records().enumerate() {
    let record = record?;
    let mut row = Vec::with_capacity(schema.fields.len());
    for (field, idx) in schema.fields.iter().zip(&positions) {
      let text = record.get(*idx).unwrap_or_default();
      let cell = Cell::parse(text, field.field_type).map_err(|e| ReportError::InvalidRecord {
        table: schema.table,
        message: format!("row {} column '{}': {}", line, field.name, e),
      })?;
      row.push(cell);
    }
    table_rows.rows.push(row);
  }

  Ok(table_rows)
}

/// Convert cells into typed records through their CSV text form
pub fn rows_to_records<R: DeserializeOwned>(rows: &TableRows) -> ReportResult<Vec<R>> {
  let mut writer = csv::Writer::from_writer(Vec::new());
  writer.write_record(&rows.columns)?;
  for row in &rows.rows {
    writer.write_record(row.iter().map(Cell::to_string))?;
  }
  let bytes = writer.into_inner().map_err(|e| ReportError::Csv(e.to_string()))?;

  let mut reader = csv::Reader::from_reader(bytes.as_slice());
  let records = reader.deserialize().collect::<Result<Vec<R>, _>>()?;
  Ok(records)
}
