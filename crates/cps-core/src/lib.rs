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

//! # cps-core
//!
//! Core types shared by the coin/algorithm reports workspace: configuration,
//! errors, source enumerations, the schema interpreter and the table registry.

pub mod config;
pub mod error;
pub mod schema;
pub mod tables;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use schema::{
  Cell, FieldSpec, FieldType, RecordValidation, RowRule, TableRecord, TableRows, TableSchema,
  Violation, to_table_rows, validate_records, validate_rows,
};
pub use tables::{TableId, TableLayer};
pub use types::{HashrateUnit, MinerType, SourceSite};

/// Base URL of the push notification service
pub const DEFAULT_NTFY_BASE_URL: &str = "https://ntfy.sh";

/// Default number of rows sent to the table store per upsert batch
pub const DEFAULT_PUSH_BATCH_SIZE: usize = 1000;
