//! Analysis history: persisted records of past estimates
//!
//! The store is a capability trait so the core stays storage-agnostic: the
//! CLI injects a JSON file store, tests inject an in-memory one. Stores keep
//! newest records first. Persistence is best-effort; a corrupt history file
//! is logged and treated as empty rather than failing the command.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use clap::Subcommand;
use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::error::{ExamcostError, Result};
use crate::utils::format_hourly_cost;

/// One saved cost analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub university: String,
    pub subject: String,
    pub students: u32,
    pub instance_type: String,
    pub cost_per_hour: f64,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Build a record for the current moment with a fresh id
    pub fn new(
        university: impl Into<String>,
        subject: impl Into<String>,
        students: u32,
        instance_type: impl Into<String>,
        cost_per_hour: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            university: university.into(),
            subject: subject.into(),
            students,
            instance_type: instance_type.into(),
            cost_per_hour,
            timestamp: Utc::now(),
        }
    }
}

/// Storage capability for analysis records
///
/// `list` returns newest first; `append` puts the new record at the front.
pub trait HistoryStore {
    fn append(&self, record: AnalysisRecord) -> Result<()>;
    fn list(&self) -> Result<Vec<AnalysisRecord>>;
    fn clear(&self) -> Result<()>;
}

/// JSON-file-backed store
///
/// The whole history lives in one pretty-printed JSON array. Loading
/// tolerates a missing or corrupt file (empty history); writing creates the
/// parent directory on first use.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_records(&self) -> Vec<AnalysisRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(
                    "Could not read history file {}: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "History file {} is corrupt, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn write_records(&self, records: &[AnalysisRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileStore {
    fn append(&self, record: AnalysisRecord) -> Result<()> {
        let mut records = self.load_records();
        records.insert(0, record);
        self.write_records(&records)
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>> {
        Ok(self.load_records())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            self.write_records(&[])?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AnalysisRecord>>> {
        self.records
            .lock()
            .map_err(|_| ExamcostError::History("history store lock poisoned".to_string()))
    }
}

impl HistoryStore for MemoryStore {
    fn append(&self, record: AnalysisRecord) -> Result<()> {
        self.lock()?.insert(0, record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<AnalysisRecord>> {
        Ok(self.lock()?.clone())
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// Record filter; unset fields match everything
///
/// Text and count filters are exact matches, `month` is the calendar month
/// (1-12) of the record timestamp, `date` the calendar date. All set fields
/// must match.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub university: Option<String>,
    pub subject: Option<String>,
    pub students: Option<u32>,
    pub month: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        if let Some(ref university) = self.university {
            if &record.university != university {
                return false;
            }
        }
        if let Some(ref subject) = self.subject {
            if &record.subject != subject {
                return false;
            }
        }
        if let Some(students) = self.students {
            if record.students != students {
                return false;
            }
        }
        if let Some(month) = self.month {
            if record.timestamp.month() != month {
                return false;
            }
        }
        if let Some(date) = self.date {
            if record.timestamp.date_naive() != date {
                return false;
            }
        }
        true
    }
}

/// Apply a filter to a record list, preserving order
pub fn filter_records(records: Vec<AnalysisRecord>, filter: &HistoryFilter) -> Vec<AnalysisRecord> {
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

#[derive(Subcommand, Clone)]
pub enum HistoryCommands {
    /// List saved cost analyses
    ///
    /// Shows saved analyses newest first. All filters are optional and
    /// combine with AND.
    ///
    /// Examples:
    ///   examcost history list
    ///   examcost history list --university "ETH Zurich" --month 6
    ///   examcost history list --date 2025-05-20 --output json
    List {
        /// Only records for this university (exact match)
        #[arg(long)]
        university: Option<String>,
        /// Only records for this subject (exact match)
        #[arg(long)]
        subject: Option<String>,
        /// Only records with this student count
        #[arg(long)]
        students: Option<u32>,
        /// Only records from this calendar month (1-12)
        #[arg(long)]
        month: Option<u32>,
        /// Only records from this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete all saved analyses
    Clear,
}

pub fn handle_command(
    cmd: HistoryCommands,
    store: &dyn HistoryStore,
    output_format: &str,
) -> Result<()> {
    match cmd {
        HistoryCommands::List {
            university,
            subject,
            students,
            month,
            date,
        } => {
            let filter = HistoryFilter {
                university,
                subject,
                students,
                month,
                date,
            };
            list_history(store, &filter, output_format)
        }
        HistoryCommands::Clear => clear_history(store),
    }
}

fn list_history(store: &dyn HistoryStore, filter: &HistoryFilter, output_format: &str) -> Result<()> {
    if let Some(month) = filter.month {
        if !(1..=12).contains(&month) {
            return Err(ExamcostError::Validation {
                field: "month".to_string(),
                reason: format!("month must be between 1 and 12, got: {}", month),
            });
        }
    }

    let records = store.list()?;
    let total = records.len();
    let filtered = filter_records(records, filter);

    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    if filtered.is_empty() {
        if total == 0 {
            println!("No saved analyses. Run 'examcost estimate' to add one.");
        } else {
            println!("No records match the given filters ({} total).", total);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "University",
        "Subject",
        "Students",
        "Instance",
        "Cost/hr",
    ]);

    for record in &filtered {
        table.add_row(vec![
            Cell::new(record.timestamp.format("%b %d, %Y")),
            Cell::new(&record.university),
            Cell::new(&record.subject),
            Cell::new(record.students),
            Cell::new(&record.instance_type),
            Cell::new(format_hourly_cost(record.cost_per_hour)),
        ]);
    }

    println!("{table}");
    println!("{} record(s) found", filtered.len());
    Ok(())
}

fn clear_history(store: &dyn HistoryStore) -> Result<()> {
    let count = store.list()?.len();
    store.clear()?;
    println!("Cleared {} record(s)", count);
    Ok(())
}
