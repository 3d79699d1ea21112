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

//! Explicit table schemas and the generic validator that interprets them.
//!
//! A [`TableSchema`] is an ordered list of [`FieldSpec`]s. Rows are handed to
//! the validator as [`Cell`] vectors in schema order, so the same interpreter
//! checks typed records (via [`TableRecord::cells`]) and untyped CSV imports
//! (via [`Cell::parse`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::tables::TableId;

/// Separator used when rendering composite primary keys.
const KEY_SEPARATOR: char = '\u{1f}';

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
  String,
  UInt64,
  UInt32,
  Float64,
  Date,
  Datetime,
  /// String restricted to a closed set of labels
  Enum(&'static [&'static str]),
}

impl fmt::Display for FieldType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldType::String => write!(f, "String"),
      FieldType::UInt64 => write!(f, "UInt64"),
      FieldType::UInt32 => write!(f, "UInt32"),
      FieldType::Float64 => write!(f, "Float64"),
      FieldType::Date => write!(f, "Date"),
      FieldType::Datetime => write!(f, "Datetime"),
      FieldType::Enum(labels) => write!(f, "Enum({})", labels.join("|")),
    }
  }
}

/// One column of a table schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: &'static str,
  pub field_type: FieldType,
  pub nullable: bool,
  pub primary_key: bool,
  pub min_length: Option<usize>,
  pub max_length: Option<usize>,
}

impl FieldSpec {
  /// Nullable column without length bounds
  pub const fn new(name: &'static str, field_type: FieldType) -> Self {
    FieldSpec { name, field_type, nullable: true, primary_key: false, min_length: None, max_length: None }
  }

  pub const fn required(self) -> Self {
    FieldSpec { nullable: false, ..self }
  }

  /// Primary-key columns are never nullable
  pub const fn primary_key(self) -> Self {
    FieldSpec { nullable: false, primary_key: true, ..self }
  }

  /// Inclusive bounds on string length, counted in characters
  pub const fn length(self, min: usize, max: usize) -> Self {
    FieldSpec { min_length: Some(min), max_length: Some(max), ..self }
  }
}

/// Ordered column list of a registered table
#[derive(Debug)]
pub struct TableSchema {
  pub table: TableId,
  pub fields: &'static [FieldSpec],
}

impl TableSchema {
  pub fn column_names(&self) -> Vec<&'static str> {
    self.fields.iter().map(|f| f.name).collect()
  }

  pub fn primary_key_indices(&self) -> Vec<usize> {
    self.fields.iter().enumerate().filter(|(_, f)| f.primary_key).map(|(i, _)| i).collect()
  }

  pub fn primary_key_names(&self) -> Vec<&'static str> {
    self.fields.iter().filter(|f| f.primary_key).map(|f| f.name).collect()
  }

  /// Columns whose values never count as a change when diffing snapshots
  pub fn float_columns(&self) -> Vec<usize> {
    self
      .fields
      .iter()
      .enumerate()
      .filter(|(_, f)| f.field_type == FieldType::Float64)
      .map(|(i, _)| i)
      .collect()
  }

  pub fn field(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|f| f.name == name)
  }

  /// Render the primary key of a row as a single comparable string
  pub fn primary_key_of(&self, row: &[Cell]) -> String {
    let mut key = String::new();
    for (n, idx) in self.primary_key_indices().into_iter().enumerate() {
      if n > 0 {
        key.push(KEY_SEPARATOR);
      }
      if let Some(cell) = row.get(idx) {
        key.push_str(&cell.to_string());
      }
    }
    key
  }
}

/// A single typed value of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
  Null,
  Str(String),
  UInt(u64),
  Float(f64),
  Date(NaiveDate),
  Datetime(DateTime<Utc>),
}

impl Cell {
  pub fn is_null(&self) -> bool {
    matches!(self, Cell::Null)
  }

  /// Parse CSV text as a value of the given column type. Empty text is null.
  pub fn parse(text: &str, field_type: FieldType) -> Result<Cell> {
    let text = text.trim();
    if text.is_empty() {
      return Ok(Cell::Null);
    }

    match field_type {
      FieldType::String | FieldType::Enum(_) => Ok(Cell::Str(text.to_string())),
      FieldType::UInt64 | FieldType::UInt32 => text
        .parse::<u64>()
        .map(Cell::UInt)
        .map_err(|_| Error::Parse(format!("'{}' is not an unsigned integer", text))),
      FieldType::Float64 => text
        .parse::<f64>()
        .map(Cell::Float)
        .map_err(|_| Error::Parse(format!("'{}' is not a number", text))),
      FieldType::Date => parse_date(text).map(Cell::Date),
      FieldType::Datetime => parse_datetime(text).map(Cell::Datetime),
    }
  }

  /// Whether the value is storable in a column of the given type (null always is)
  pub fn matches(&self, field_type: FieldType) -> bool {
    match (self, field_type) {
      (Cell::Null, _) => true,
      (Cell::Str(_), FieldType::String | FieldType::Enum(_)) => true,
      (Cell::UInt(_), FieldType::UInt64) => true,
      (Cell::UInt(v), FieldType::UInt32) => *v <= u64::from(u32::MAX),
      (Cell::Float(v), FieldType::Float64) => v.is_finite(),
      (Cell::Date(_), FieldType::Date) => true,
      (Cell::Datetime(_), FieldType::Datetime) => true,
      _ => false,
    }
  }

  fn kind(&self) -> &'static str {
    match self {
      Cell::Null => "null",
      Cell::Str(_) => "string",
      Cell::UInt(_) => "unsigned integer",
      Cell::Float(_) => "float",
      Cell::Date(_) => "date",
      Cell::Datetime(_) => "datetime",
    }
  }
}

impl fmt::Display for Cell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cell::Null => Ok(()),
      Cell::Str(s) => write!(f, "{}", s),
      Cell::UInt(v) => write!(f, "{}", v),
      Cell::Float(v) => write!(f, "{}", v),
      Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
      Cell::Datetime(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    }
  }
}

impl From<String> for Cell {
  fn from(v: String) -> Self {
    Cell::Str(v)
  }
}

impl From<&str> for Cell {
  fn from(v: &str) -> Self {
    Cell::Str(v.to_string())
  }
}

impl From<u64> for Cell {
  fn from(v: u64) -> Self {
    Cell::UInt(v)
  }
}

impl From<u32> for Cell {
  fn from(v: u32) -> Self {
    Cell::UInt(u64::from(v))
  }
}

impl From<f64> for Cell {
  fn from(v: f64) -> Self {
    Cell::Float(v)
  }
}

impl From<NaiveDate> for Cell {
  fn from(v: NaiveDate) -> Self {
    Cell::Date(v)
  }
}

impl From<DateTime<Utc>> for Cell {
  fn from(v: DateTime<Utc>) -> Self {
    Cell::Datetime(v)
  }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
  fn from(v: Option<T>) -> Self {
    v.map(Into::into).unwrap_or(Cell::Null)
  }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
  if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
    return Ok(date);
  }
  parse_datetime(text).map(|dt| dt.date_naive())
}

fn parse_datetime(text: &str) -> Result<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
    return Ok(dt.with_timezone(&Utc));
  }
  for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
      return Ok(naive.and_utc());
    }
  }
  let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")?;
  date
    .and_hms_opt(0, 0, 0)
    .map(|naive| naive.and_utc())
    .ok_or_else(|| Error::Parse(format!("'{}' is not a datetime", text)))
}

/// Column-oriented snapshot of a table: header plus rows of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRows {
  pub columns: Vec<String>,
  pub rows: Vec<Vec<Cell>>,
}

impl TableRows {
  pub fn empty(schema: &TableSchema) -> Self {
    TableRows {
      columns: schema.column_names().into_iter().map(String::from).collect(),
      rows: Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Whether the header lists exactly the schema's columns, in order
  pub fn conforms_to(&self, schema: &TableSchema) -> bool {
    self.columns.len() == schema.fields.len()
      && self.columns.iter().zip(schema.fields).all(|(c, f)| c == f.name)
  }

  /// Rearrange the columns into schema order. Missing columns are an error;
  /// extra columns are dropped.
  pub fn project(&self, schema: &TableSchema) -> Result<TableRows> {
    let mut positions = Vec::with_capacity(schema.fields.len());
    for field in schema.fields {
      let idx = self.columns.iter().position(|c| c == field.name).ok_or_else(|| {
        Error::Parse(format!("column '{}' missing from {}", field.name, schema.table))
      })?;
      positions.push(idx);
    }

    let rows = self
      .rows
      .iter()
      .map(|row| positions.iter().map(|&i| row.get(i).cloned().unwrap_or(Cell::Null)).collect())
      .collect();

    Ok(TableRows { columns: schema.column_names().into_iter().map(String::from).collect(), rows })
  }
}

/// One failed check of one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
  pub row: usize,
  pub column: String,
  pub message: String,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "row {} [{}]: {}", self.row, self.column, self.message)
  }
}

/// Check every row against the schema: arity, types, nullability, string
/// lengths and primary-key uniqueness. The first occurrence of a key is
/// accepted; every later duplicate is reported.
pub fn validate_rows(schema: &TableSchema, rows: &[Vec<Cell>]) -> Vec<Violation> {
  let mut violations = Vec::new();
  let mut seen_keys = HashSet::new();

  for (row_idx, row) in rows.iter().enumerate() {
    if row.len() != schema.fields.len() {
      violations.push(Violation {
        row: row_idx,
        column: "*".to_string(),
        message: format!("expected {} columns, found {}", schema.fields.len(), row.len()),
      });
      continue;
    }

    for (field, cell) in schema.fields.iter().zip(row) {
      if let Some(message) = check_cell(field, cell) {
        violations.push(Violation { row: row_idx, column: field.name.to_string(), message });
      }
    }

    if !seen_keys.insert(schema.primary_key_of(row)) {
      violations.push(Violation {
        row: row_idx,
        column: schema.primary_key_names().join(","),
        message: "duplicate primary key".to_string(),
      });
    }
  }

  violations
}

fn check_cell(field: &FieldSpec, cell: &Cell) -> Option<String> {
  if cell.is_null() {
    return (!field.nullable).then(|| "null in non-nullable column".to_string());
  }

  if !cell.matches(field.field_type) {
    return Some(format!("{} value does not fit {}", cell.kind(), field.field_type));
  }

  if let (FieldType::Enum(labels), Cell::Str(s)) = (field.field_type, cell) {
    if !labels.contains(&s.as_str()) {
      return Some(format!("'{}' is not one of {}", s, labels.join("|")));
    }
  }

  if let Cell::Str(s) = cell {
    let len = s.chars().count();
    if let Some(min) = field.min_length {
      if len < min {
        return Some(format!("length {} below minimum {}", len, min));
      }
    }
    if let Some(max) = field.max_length {
      if len > max {
        return Some(format!("length {} above maximum {}", len, max));
      }
    }
  }

  None
}

/// Named cross-field predicate on a typed record
pub struct RowRule<R> {
  pub name: &'static str,
  pub check: fn(&R) -> bool,
}

/// A typed row of a registered table
pub trait TableRecord: Sized + 'static {
  const TABLE: TableId;

  /// Values in schema column order
  fn cells(&self) -> Vec<Cell>;

  fn rules() -> &'static [RowRule<Self>] {
    &[]
  }
}

/// Outcome of validating typed records
#[derive(Debug, Default)]
pub struct RecordValidation {
  pub violations: Vec<Violation>,
  pub invalid_rows: BTreeSet<usize>,
}

impl RecordValidation {
  pub fn is_valid(&self) -> bool {
    self.violations.is_empty()
  }
}

/// Convert typed records into a schema-ordered snapshot
pub fn to_table_rows<R: TableRecord>(records: &[R]) -> TableRows {
  let mut rows = TableRows::empty(R::TABLE.schema());
  rows.rows = records.iter().map(TableRecord::cells).collect();
  rows
}

/// Run the schema checks plus every named rule of the record type
pub fn validate_records<R: TableRecord>(records: &[R]) -> RecordValidation {
  let table_rows = to_table_rows(records);
  let mut violations = validate_rows(R::TABLE.schema(), &table_rows.rows);

  for (row_idx, record) in records.iter().enumerate() {
    for rule in R::rules() {
      if !(rule.check)(record) {
        violations.push(Violation {
          row: row_idx,
          column: rule.name.to_string(),
          message: format!("rule '{}' failed", rule.name),
        });
      }
    }
  }

  let invalid_rows = violations.iter().map(|v| v.row).collect();
  RecordValidation { violations, invalid_rows }
}
