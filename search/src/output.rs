//! Saving a result set: an ordered list of writers, tried until one works.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use common::{Job, Value};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Xlsx => f.write_str("Excel"),
            OutputFormat::Csv => f.write_str("CSV"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Xlsx(#[from] XlsxError),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait TableWriter {
    fn format(&self) -> OutputFormat;
    fn write(&self, path: &Path, jobs: &[Job]) -> Result<(), WriteError>;
}

/// Spreadsheet with a header row and one row per job.
pub struct XlsxWriter;

impl TableWriter for XlsxWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn write(&self, path: &Path, jobs: &[Job]) -> Result<(), WriteError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Jobs")?;

        for (col, name) in Job::COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *name)?;
        }

        for (i, job) in jobs.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, value) in job.values().into_iter().enumerate() {
                let col = col as u16;
                match value {
                    Value::Text(text) => {
                        sheet.write_string(row, col, text)?;
                    }
                    Value::Number(n) => {
                        sheet.write_number(row, col, n)?;
                    }
                    Value::Bool(b) => {
                        sheet.write_boolean(row, col, b)?;
                    }
                    Value::Empty => {}
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// Comma-separated text, same header and rows as the spreadsheet.
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn write(&self, path: &Path, jobs: &[Job]) -> Result<(), WriteError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(Job::COLUMNS)?;
        for job in jobs {
            writer.write_record(job.values().iter().map(Value::to_string))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Spreadsheet first, CSV when the spreadsheet cannot be written.
pub fn default_writers() -> Vec<Box<dyn TableWriter>> {
    vec![Box::new(XlsxWriter), Box::new(CsvWriter)]
}

/// One writer that did not succeed.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub format: OutputFormat,
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug)]
pub struct Saved {
    pub format: OutputFormat,
    pub path: PathBuf,
    /// Writers that failed before this one succeeded.
    pub failed: Vec<Attempt>,
}

#[derive(Debug, Error)]
#[error("could not save the results in any format")]
pub struct PersistError {
    pub attempts: Vec<Attempt>,
}

/// Writes `jobs` to `<dir>/<stem>.<ext>` with each writer in turn and stops
/// at the first success.
pub fn persist(
    writers: &[Box<dyn TableWriter>],
    dir: &Path,
    stem: &str,
    jobs: &[Job],
) -> Result<Saved, PersistError> {
    let mut failed = Vec::new();

    for writer in writers {
        let format = writer.format();
        let path = dir.join(format!("{stem}.{}", format.extension()));
        let existed = path.exists();

        match writer.write(&path, jobs) {
            Ok(()) => {
                info!(path = %path.display(), %format, rows = jobs.len(), "results saved");
                return Ok(Saved {
                    format,
                    path,
                    failed,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), %format, error = %e, "could not save results");
                // Don't leave a half-written file behind.
                if !existed && path.exists() {
                    let _ = fs::remove_file(&path);
                }
                failed.push(Attempt {
                    format,
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    Err(PersistError { attempts: failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Site;

    struct FailingWriter(OutputFormat);

    impl TableWriter for FailingWriter {
        fn format(&self) -> OutputFormat {
            self.0
        }

        fn write(&self, _path: &Path, _jobs: &[Job]) -> Result<(), WriteError> {
            Err(WriteError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "disk says no",
            )))
        }
    }

    fn jobs(n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| {
                let mut job = Job::new(
                    Site::Indeed,
                    format!("in-{i}"),
                    format!("Developer {i}"),
                    "Acme, Inc",
                    format!("https://ma.indeed.com/viewjob?jk={i}"),
                );
                job.min_amount = Some(1000.0 * i as f64);
                job
            })
            .collect()
    }

    #[test]
    fn test_xlsx_is_written_first() {
        let dir = tempfile::tempdir().unwrap();
        let saved = persist(&default_writers(), dir.path(), "jobs_dev_Morocco", &jobs(3)).unwrap();

        assert_eq!(saved.format, OutputFormat::Xlsx);
        assert_eq!(saved.path, dir.path().join("jobs_dev_Morocco.xlsx"));
        assert!(saved.failed.is_empty());
        assert!(saved.path.is_file());
        assert!(!dir.path().join("jobs_dev_Morocco.csv").exists());
    }

    #[test]
    fn test_csv_contains_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        CsvWriter.write(&path, &jobs(2)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, Job::COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][3], "Developer 1");
        assert_eq!(&rows[1][4], "Acme, Inc");
        assert_eq!(&rows[1][9], "1000");
        assert_eq!(&rows[1][12], "false");
    }

    #[test]
    fn test_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<Box<dyn TableWriter>> =
            vec![Box::new(FailingWriter(OutputFormat::Xlsx)), Box::new(CsvWriter)];

        let saved = persist(&writers, dir.path(), "jobs_dev_uk", &jobs(1)).unwrap();

        assert_eq!(saved.format, OutputFormat::Csv);
        assert_eq!(saved.path, dir.path().join("jobs_dev_uk.csv"));
        assert_eq!(saved.failed.len(), 1);
        assert_eq!(saved.failed[0].format, OutputFormat::Xlsx);
        assert!(saved.failed[0].error.contains("disk says no"));
    }

    #[test]
    fn test_all_writers_failing_reports_each() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<Box<dyn TableWriter>> = vec![
            Box::new(FailingWriter(OutputFormat::Xlsx)),
            Box::new(FailingWriter(OutputFormat::Csv)),
        ];

        let err = persist(&writers, dir.path(), "jobs_x_y", &jobs(1)).unwrap_err();

        let formats: Vec<OutputFormat> = err.attempts.iter().map(|a| a.format).collect();
        assert_eq!(formats, vec![OutputFormat::Xlsx, OutputFormat::Csv]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_fails_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");

        let err = persist(&default_writers(), &missing, "jobs_a_b", &jobs(1)).unwrap_err();
        assert_eq!(err.attempts.len(), 2);
    }

    #[test]
    fn test_second_run_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<Box<dyn TableWriter>> = vec![Box::new(CsvWriter)];

        persist(&writers, dir.path(), "jobs_a_b", &jobs(3)).unwrap();
        let saved = persist(&writers, dir.path(), "jobs_a_b", &jobs(1)).unwrap();

        let rows = csv::Reader::from_path(&saved.path).unwrap().records().count();
        assert_eq!(rows, 1);
    }
}
