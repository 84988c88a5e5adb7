//! CSV export discovery and loading.
//!
//! Reads a tracker app's CSV export (one row per logged event) and converts
//! it into an [`EventTable`] for downstream aggregation.

use std::io::Read;
use std::path::{Path, PathBuf};

use babystat_core::error::{BabyStatError, Result};
use babystat_core::models::{EventKind, EventRecord, EventTable};
use babystat_core::time_utils::parse_export_timestamp;
use csv::StringRecord;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_export_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load an export file into an [`EventTable`].
///
/// The table is loaded atomically: any structural problem (unreadable file,
/// missing required column, unparseable start timestamp, zero records) fails
/// the whole load rather than producing a partial table.
pub fn load_table(path: &Path) -> Result<EventTable> {
    let file = std::fs::File::open(path).map_err(|source| BabyStatError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(file)?;
    debug!(
        "Loaded {} records from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV export data from any reader into an [`EventTable`].
pub fn read_table<R: Read>(reader: R) -> Result<EventTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut records: Vec<EventRecord> = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(columns.parse_row(&row)?);
    }

    if records.is_empty() {
        return Err(BabyStatError::EmptyExport);
    }

    Ok(EventTable::new(records))
}

// ── Column mapping ────────────────────────────────────────────────────────────

/// Positions of the export's columns, resolved from the header row by name.
///
/// The tracker app has shuffled column order between app versions, so rows
/// are addressed by resolved index rather than position.
#[derive(Debug)]
struct ColumnMap {
    kind: usize,
    start: usize,
    end: usize,
    start_condition: Option<usize>,
    start_location: Option<usize>,
    end_condition: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let require = |name: &str| {
            find(name).ok_or_else(|| BabyStatError::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            kind: require("Type")?,
            start: require("Start")?,
            end: require("End")?,
            start_condition: find("Start Condition"),
            start_location: find("Start Location"),
            end_condition: find("End Condition"),
            notes: find("Notes"),
        })
    }

    fn parse_row(&self, row: &StringRecord) -> Result<EventRecord> {
        let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");
        let optional = |idx: Option<usize>| {
            idx.map(field)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let raw_start = field(self.start);
        let start = parse_export_timestamp(raw_start)
            .ok_or_else(|| BabyStatError::TimestampParse(raw_start.to_string()))?;

        // A missing end is normal (diapers, growth readings); a present but
        // unparseable end is treated as missing rather than failing the load.
        let raw_end = field(self.end);
        let end = if raw_end.is_empty() {
            None
        } else {
            parse_export_timestamp(raw_end)
        };

        Ok(EventRecord {
            kind: EventKind::parse(field(self.kind)),
            start,
            end,
            start_condition: optional(self.start_condition),
            start_location: optional(self.start_location),
            end_condition: optional(self.end_condition),
            notes: optional(self.notes),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const HEADER: &str = "Type,Start,End,Duration,Start Condition,Start Location,End Condition,Notes";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn table_from(rows: &[&str]) -> Result<EventTable> {
        let mut data = String::from(HEADER);
        data.push('\n');
        for row in rows {
            data.push_str(row);
            data.push('\n');
        }
        read_table(data.as_bytes())
    }

    // ── find_export_files ─────────────────────────────────────────────────────

    #[test]
    fn test_find_export_files_in_flat_dir() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "a.csv", &[HEADER]);
        write_csv(dir.path(), "b.csv", &[HEADER]);
        write_csv(dir.path(), "notes.txt", &["not a csv"]);

        let files = find_export_files(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_export_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("2024");
        std::fs::create_dir_all(&sub).unwrap();
        write_csv(dir.path(), "b.csv", &[HEADER]);
        write_csv(&sub, "a.csv", &[HEADER]);

        let files = find_export_files(dir.path());
        assert_eq!(files.len(), 2);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_find_export_files_nonexistent_path() {
        let files = find_export_files(Path::new("/tmp/does-not-exist-babystat-test-xyz"));
        assert!(files.is_empty());
    }

    // ── read_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_read_table_basic() {
        let table = table_from(&[
            "Sleep,2024-01-15 13:00,2024-01-15 13:45,,,,,",
            "Feed,2024-01-15 08:00,2024-01-15 08:20,,,,,",
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].kind, EventKind::Feed);
        assert_eq!(table.records()[1].kind, EventKind::Sleep);
    }

    #[test]
    fn test_read_table_sorted_by_start() {
        let table = table_from(&[
            "Feed,2024-01-16 08:00,,,,,,",
            "Feed,2024-01-15 08:00,,,,,,",
        ])
        .unwrap();

        assert!(table.records()[0].start < table.records()[1].start);
    }

    #[test]
    fn test_read_table_missing_end_is_none() {
        let table = table_from(&["Diaper,2024-01-15 09:30,,,,,,"]).unwrap();
        assert!(table.records()[0].end.is_none());
    }

    #[test]
    fn test_read_table_growth_condition_columns() {
        let table =
            table_from(&["Growth,2024-01-15 10:00,,,4.5kg,55cm,38cm,first check-up"]).unwrap();

        let r = &table.records()[0];
        assert_eq!(r.kind, EventKind::Growth);
        assert_eq!(r.start_condition.as_deref(), Some("4.5kg"));
        assert_eq!(r.start_location.as_deref(), Some("55cm"));
        assert_eq!(r.end_condition.as_deref(), Some("38cm"));
        assert_eq!(r.notes.as_deref(), Some("first check-up"));
    }

    #[test]
    fn test_read_table_empty_optional_columns_are_none() {
        let table = table_from(&["Sleep,2024-01-15 13:00,2024-01-15 14:00,,,,,"]).unwrap();
        let r = &table.records()[0];
        assert!(r.start_condition.is_none());
        assert!(r.notes.is_none());
    }

    #[test]
    fn test_read_table_missing_required_column() {
        let data = "Type,End\nSleep,2024-01-15 14:00\n";
        let err = read_table(data.as_bytes()).unwrap_err();
        assert!(matches!(err, BabyStatError::MissingColumn(ref c) if c == "Start"));
    }

    #[test]
    fn test_read_table_bad_start_timestamp_fails() {
        let err = table_from(&["Sleep,not a time,2024-01-15 14:00,,,,,"]).unwrap_err();
        assert!(matches!(err, BabyStatError::TimestampParse(_)));
    }

    #[test]
    fn test_read_table_bad_end_timestamp_treated_as_missing() {
        let table = table_from(&["Sleep,2024-01-15 13:00,garbage,,,,,"]).unwrap();
        assert!(table.records()[0].end.is_none());
    }

    #[test]
    fn test_read_table_no_records_is_empty_export() {
        let err = table_from(&[]).unwrap_err();
        assert!(matches!(err, BabyStatError::EmptyExport));
    }

    #[test]
    fn test_read_table_header_names_case_insensitive() {
        let data = "type,start,end\nFeed,2024-01-15 08:00,\n";
        let table = read_table(data.as_bytes()).unwrap();
        assert_eq!(table.records()[0].kind, EventKind::Feed);
    }

    #[test]
    fn test_read_table_reordered_columns() {
        let data = "Start,Type,End\n2024-01-15 13:00,Sleep,2024-01-15 14:00\n";
        let table = read_table(data.as_bytes()).unwrap();
        assert_eq!(table.records()[0].kind, EventKind::Sleep);
        assert_eq!(table.records()[0].duration_minutes(), Some(60.0));
    }

    #[test]
    fn test_read_table_unknown_type_kept_as_other() {
        let table = table_from(&["Pump,2024-01-15 10:00,2024-01-15 10:15,,,,,"]).unwrap();
        assert_eq!(
            table.records()[0].kind,
            EventKind::Other("Pump".to_string())
        );
    }

    // ── load_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_load_table_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "export.csv",
            &[HEADER, "Feed,2024-01-15 08:00,2024-01-15 08:20,,,,,"],
        );

        let table = load_table(&path).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(Path::new("/tmp/no-such-export-xyz.csv")).unwrap_err();
        assert!(matches!(err, BabyStatError::FileRead { .. }));
    }

    #[test]
    fn test_load_table_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "empty.csv", &[HEADER]);

        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, BabyStatError::EmptyExport));
    }
}
