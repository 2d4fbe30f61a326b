//! Runs the matching pipeline over every export file of an input directory.

use crate::days::DaySet;
use crate::error::Result;
use crate::matcher::{FileReport, MatchQuery, process_file};
use chrono::{Local, TimeZone};
use office_days_core::file_scanner::FileScanner;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Callback invoked once per processed file, whether it succeeded or not.
pub type FileCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// Totals over all processed files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_scanned: usize,
    /// Files that could not be opened or decoded
    pub files_failed: usize,
    pub records: usize,
    pub candidates: usize,
    pub matches: usize,
}

impl ScanSummary {
    fn record(&mut self, report: &FileReport) {
        self.records += report.records;
        self.candidates += report.candidates;
        self.matches += report.matches;
    }
}

/// Lists the export files below the scanner's root.
///
/// An unreadable root is logged and treated as an empty directory, so the run still
/// completes with an empty result.
pub fn list_files(scanner: &FileScanner) -> Vec<PathBuf> {
    match scanner.scan() {
        Ok(files) => {
            tracing::debug!(count = files.len(), "Found export files");
            files
        }
        Err(err) => {
            tracing::error!(dir = %scanner.root().display(), error = %err, "Could not list input directory");
            Vec::new()
        }
    }
}

/// Result of a run: the matched days plus what happened to each file.
#[derive(Debug, Clone)]
pub struct ScanOutcome<Tz: TimeZone = Local> {
    pub days: DaySet<Tz>,
    pub summary: ScanSummary,
    /// Reports of the files that were processed successfully, in input order
    pub reports: Vec<FileReport>,
}

/// Drives [`process_file`] over a list of files.
///
/// ```rust,no_run
/// use office_days_geo::Coordinate;
/// use office_days_timeline::{MatchQuery, Scanner, TimeRange};
///
/// let range = TimeRange::parse("2022-01-01", "2022-12-31", &chrono::Local).unwrap();
/// let query = MatchQuery::new(range, Coordinate::new(48.1794935, 11.5858037), 1000.0);
/// let outcome = Scanner::new(query).parallel(true).run(&["Records.json".into()]);
/// println!("{} office days", outcome.days.len());
/// ```
#[derive(Clone)]
pub struct Scanner {
    query: MatchQuery,
    parallel: bool,
    on_file: Option<FileCallback>,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("query", &self.query)
            .field("parallel", &self.parallel)
            .field("on_file", &self.on_file.is_some())
            .finish()
    }
}

impl Scanner {
    pub fn new(query: MatchQuery) -> Self {
        Self {
            query,
            parallel: false,
            on_file: None,
        }
    }

    /// Process files concurrently. The resulting days are the same either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Register a progress hook.
    pub fn on_file<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Path) + Send + Sync + 'static,
    {
        self.on_file = Some(Arc::new(callback));
        self
    }

    pub fn query(&self) -> &MatchQuery {
        &self.query
    }

    /// Processes `files`, collecting days in the local time zone.
    pub fn run(&self, files: &[PathBuf]) -> ScanOutcome {
        self.run_in(files, DaySet::new())
    }

    /// Enumerates files with `scanner` and processes them.
    pub fn run_dir(&self, scanner: &FileScanner) -> ScanOutcome {
        self.run(&list_files(scanner))
    }

    /// Processes `files`, adding matched days to `days`.
    pub fn run_in<Tz>(&self, files: &[PathBuf], mut days: DaySet<Tz>) -> ScanOutcome<Tz>
    where
        Tz: TimeZone + Send + Sync,
    {
        let results = if self.parallel {
            self.process_parallel(files, &mut days)
        } else {
            files.iter().map(|path| self.process(path, &mut days)).collect()
        };

        let mut summary = ScanSummary {
            files_scanned: files.len(),
            ..ScanSummary::default()
        };
        let mut reports = Vec::with_capacity(results.len());

        for result in results {
            match result {
                Ok(report) => {
                    summary.record(&report);
                    reports.push(report);
                }
                Err(_) => summary.files_failed += 1,
            }
        }

        ScanOutcome { days, summary, reports }
    }

    #[cfg(feature = "parallel")]
    fn process_parallel<Tz>(&self, files: &[PathBuf], days: &mut DaySet<Tz>) -> Vec<Result<FileReport>>
    where
        Tz: TimeZone + Send + Sync,
    {
        use rayon::prelude::*;

        let tz = days.timezone().clone();
        let per_file: Vec<_> = files
            .par_iter()
            .map(|path| {
                let mut own = DaySet::with_timezone(tz.clone());
                let result = self.process(path, &mut own);
                (result, own)
            })
            .collect();

        per_file
            .into_iter()
            .map(|(result, own)| {
                days.merge(&own);
                result
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn process_parallel<Tz>(&self, files: &[PathBuf], days: &mut DaySet<Tz>) -> Vec<Result<FileReport>>
    where
        Tz: TimeZone + Send + Sync,
    {
        tracing::warn!("Built without the `parallel` feature, processing files sequentially");
        files.iter().map(|path| self.process(path, days)).collect()
    }

    fn process<Tz: TimeZone>(&self, path: &Path, days: &mut DaySet<Tz>) -> Result<FileReport> {
        let result = process_file(path, &self.query, days);

        if let Err(err) = &result {
            tracing::error!(path = %path.display(), error = %err, "Could not process file");
        }
        if let Some(callback) = &self.on_file {
            callback(path);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TimeRange;
    use chrono::{DateTime, Utc};
    use office_days_geo::Coordinate;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const SEMANTIC: &str = r#"{"semanticSegments": [
        {"startTime": "2022-01-03T08:00:00Z", "endTime": "2022-01-03T09:00:00Z",
         "timelinePath": [{"point": "48.1794935°, 11.5858037°"}, {"point": "48.18°, 11.586°"}]}
    ]}"#;

    const LEGACY: &str = r#"{"timelineObjects": [
        {"placeVisit": {"centerLatE7": 481794935, "centerLngE7": 115858037,
            "duration": {"startTimestamp": "2022-01-08T09:00:00Z", "endTimestamp": "2022-01-08T12:00:00Z"}}},
        {"placeVisit": {"centerLatE7": 481794935, "centerLngE7": 115858037,
            "duration": {"startTimestamp": "2022-01-03T13:00:00Z", "endTimestamp": "2022-01-03T17:00:00Z"}}}
    ]}"#;

    fn query() -> MatchQuery {
        let range = TimeRange::new(
            DateTime::parse_from_rfc3339("2022-01-01T00:00:00Z").unwrap(),
            DateTime::parse_from_rfc3339("2022-01-31T23:59:59Z").unwrap(),
        )
        .unwrap();
        MatchQuery::new(range, Coordinate::new(48.1794935, 11.5858037), 1000.0)
    }

    fn fixture() -> (TempDir, Vec<PathBuf>) {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2022").join("JANUARY");
        fs::create_dir_all(&nested).unwrap();

        let a = dir.path().join("Timeline.json");
        let b = nested.join("2022_JANUARY.json");
        let broken = dir.path().join("broken.json");
        fs::write(&a, SEMANTIC).unwrap();
        fs::write(&b, LEGACY).unwrap();
        fs::write(&broken, "{ this is not json").unwrap();

        (dir, vec![a, b, broken])
    }

    #[test]
    fn test_sequential_run_over_both_schemas() {
        let (_dir, files) = fixture();
        let outcome = Scanner::new(query()).run_in(&files, DaySet::with_timezone(Utc));

        assert_eq!(outcome.days.to_sorted_list(), vec!["2022-01-03", "2022-01-08"]);
        assert_eq!(outcome.days.working_day_count(), 1);
        assert_eq!(
            outcome.summary,
            ScanSummary {
                files_scanned: 3,
                files_failed: 1,
                records: 4,
                candidates: 4,
                matches: 4,
            }
        );
        assert_eq!(outcome.reports.len(), 2);
        assert_eq!(outcome.reports[0].path, files[0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (_dir, files) = fixture();
        let sequential = Scanner::new(query()).run_in(&files, DaySet::with_timezone(Utc));
        let parallel = Scanner::new(query())
            .parallel(true)
            .run_in(&files, DaySet::with_timezone(Utc));

        assert_eq!(parallel.days.to_sorted_list(), sequential.days.to_sorted_list());
        assert_eq!(parallel.summary, sequential.summary);
        assert_eq!(parallel.reports, sequential.reports);
    }

    #[test]
    fn test_on_file_called_for_every_file() {
        let (_dir, files) = fixture();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        Scanner::new(query())
            .on_file(move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .run_in(&files, DaySet::with_timezone(Utc));

        assert_eq!(seen.load(Ordering::Relaxed), files.len());
    }

    #[test]
    fn test_run_dir_walks_recursively() {
        let (dir, _files) = fixture();
        let outcome = Scanner::new(query()).run_dir(&FileScanner::new(dir.path()).with_extensions(&["json"]));

        assert_eq!(outcome.summary.files_scanned, 3);
        assert_eq!(outcome.summary.files_failed, 1);
        assert_eq!(outcome.summary.matches, 4);
    }

    #[test]
    fn test_unreadable_root_yields_empty_outcome() {
        let outcome = Scanner::new(query()).run_dir(&FileScanner::new("/nonexistent/location-history"));
        assert_eq!(outcome.summary, ScanSummary::default());
        assert!(outcome.days.is_empty());
    }

    #[test]
    fn test_list_files_is_sorted_and_filtered() {
        let (dir, _files) = fixture();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = list_files(&FileScanner::new(dir.path()).with_extensions(&["json"]));
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2022_JANUARY.json", "Timeline.json", "broken.json"]);
    }

    #[test]
    fn test_no_files() {
        let outcome = Scanner::new(query()).parallel(true).run_in(&[], DaySet::with_timezone(Utc));
        assert!(outcome.days.is_empty());
        assert!(outcome.reports.is_empty());
    }
}
