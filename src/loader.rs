//! Dataset loader - CSV parsing and the process-wide dataset cache

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use once_cell::sync::OnceCell;

use crate::error::LoadError;
use crate::models::{Dataset, HourBucket, Record};

/// File name looked up next to the executable
pub const DATA_FILE_NAME: &str = "dataset2_threat_detection.csv";

/// Canonical rendering of parsed timestamps in the table and row search
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cell spellings read as a missing value
const MISSING_MARKERS: &[&str] = &[
    "", "NaN", "nan", "NA", "N/A", "n/a", "null", "NULL", "None", "NaT", "<NA>",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// `dataset2_threat_detection.csv` beside the running program
pub fn default_data_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DATA_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}

/// Whether a cell holds one of the missing-value markers
pub fn is_missing(raw: &str) -> bool {
    MISSING_MARKERS.contains(&raw.trim())
}

/// Load the alert file at `path`
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    read(file)
}

/// Parse alert CSV from any reader
pub fn read<R: io::Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let layout = ColumnLayout::resolve(&columns)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        records.push(layout.record(&row?)?);
    }

    Ok(Dataset::new(columns, records))
}

/// Positions of the columns the pipeline reads
struct ColumnLayout {
    timestamp: Option<usize>,
    severity: usize,
    affected_system: usize,
    threat_type: usize,
    response_time: usize,
    hour: usize,
}

impl ColumnLayout {
    fn resolve(columns: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| columns.iter().position(|c| c == name);
        let require = |name: &str| find(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        Ok(Self {
            timestamp: find("timestamp"),
            severity: require("severity")?,
            affected_system: require("affected_system")?,
            threat_type: require("threat_type")?,
            response_time: require("response_time_minutes")?,
            hour: require("hour")?,
        })
    }

    fn record(&self, row: &StringRecord) -> Result<Record, LoadError> {
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let mut values: Vec<String> = row.iter().map(str::to_string).collect();
        let cell = move |idx: usize| row.get(idx).unwrap_or_default();

        let invalid = |column: &str, value: &str| LoadError::InvalidValue {
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let timestamp = match self.timestamp {
            Some(idx) if !is_missing(cell(idx)) => {
                let raw = cell(idx);
                let ts = parse_timestamp(raw.trim()).ok_or_else(|| invalid("timestamp", raw))?;
                values[idx] = ts.format(TIMESTAMP_FORMAT).to_string();
                Some(ts)
            }
            _ => None,
        };

        let response_time_minutes = match cell(self.response_time) {
            raw if is_missing(raw) => None,
            raw => {
                let minutes = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid("response_time_minutes", raw))?;
                minutes.is_finite().then_some(minutes)
            }
        };

        Ok(Record {
            timestamp,
            severity: cell(self.severity).to_string(),
            affected_system: cell(self.affected_system).to_string(),
            threat_type: cell(self.threat_type).to_string(),
            response_time_minutes,
            hour: HourBucket::parse(cell(self.hour)),
            values,
        })
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` and bare dates.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ============================================================================
// DATASET CACHE
// ============================================================================

/// Init-once holder for the loaded dataset.
///
/// The first access reads the file; every later access returns the same
/// `Arc<Dataset>` (or the same `LoadError`) without touching the disk again.
/// Lives for the whole process, there is no reload or teardown.
#[derive(Debug)]
pub struct DatasetStore {
    path: PathBuf,
    cell: OnceCell<Result<Arc<Dataset>, LoadError>>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Store that already holds `dataset`
    pub fn preloaded(path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::with_value(Ok(Arc::new(dataset))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bare file name for user-facing diagnostics
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Load on first call, then serve from cache. Blocks on file I/O the
    /// first time.
    pub fn get(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_init(|| {
                let outcome = load(&self.path).map(Arc::new);
                match &outcome {
                    Ok(dataset) => {
                        tracing::info!(
                            "Loaded {} alert records from {}",
                            dataset.len(),
                            self.path.display()
                        );
                        if let Some((first, last)) = dataset.time_range() {
                            tracing::debug!("Alerts span {} to {}", first, last);
                        }
                    }
                    Err(e) => tracing::error!("Failed to load {}: {}", self.path.display(), e),
                }
                outcome
            })
            .clone()
    }

    /// Cached outcome, if the file has been read already
    pub fn cached(&self) -> Option<Result<Arc<Dataset>, LoadError>> {
        self.cell.get().cloned()
    }
}

// ============================================================================
// TESTS
// ============================================================================
