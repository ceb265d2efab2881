//! Streaming reader for the student record file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};

use super::error::{AttendanceError, Result};
use super::model::StudentRecord;

pub const NAME_COLUMN: &str = "Name";
pub const EMAIL_COLUMN: &str = "Email";
pub const ATTENDANCE_COLUMN: &str = "Attendance Count";

struct ColumnIndex {
    name: usize,
    email: usize,
    attended: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| AttendanceError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(Self {
            name: find(NAME_COLUMN)?,
            email: find(EMAIL_COLUMN)?,
            attended: find(ATTENDANCE_COLUMN)?,
        })
    }
}

/// Single-pass iterator over the rows of a record file.
///
/// The header is checked when the reader is created; each row is parsed
/// when it is pulled, so a bad row surfaces only once the iteration reaches it.
pub struct RecordReader<R = File> {
    rows: StringRecordsIntoIter<R>,
    columns: ColumnIndex,
    path: PathBuf,
    row: usize,
}

impl RecordReader<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AttendanceError::io(path, e))?;
        Self::from_reader(file, path)
    }
}

impl<R: io::Read> RecordReader<R> {
    /// `path` is only used to label errors.
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
        let headers = csv_reader.headers().map_err(|source| AttendanceError::Csv {
            path: path.clone(),
            source,
        })?;
        let columns = ColumnIndex::from_headers(headers, &path)?;

        Ok(Self {
            rows: csv_reader.into_records(),
            columns,
            path,
            row: 0,
        })
    }

    fn parse_row(&self, record: &StringRecord) -> Result<StudentRecord> {
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let raw_attended = field(self.columns.attended);
        let attended_sessions =
            raw_attended
                .trim()
                .parse::<u32>()
                .map_err(|_| AttendanceError::InvalidAttendance {
                    row: self.row,
                    value: raw_attended.to_string(),
                })?;

        Ok(StudentRecord {
            name: field(self.columns.name).to_string(),
            email: field(self.columns.email).to_string(),
            attended_sessions,
        })
    }
}

impl<R: io::Read> Iterator for RecordReader<R> {
    type Item = Result<StudentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.rows.next()? {
            Ok(record) => record,
            Err(source) => {
                return Some(Err(AttendanceError::Csv {
                    path: self.path.clone(),
                    source,
                }))
            }
        };
        self.row += 1;
        Some(self.parse_row(&record))
    }
}
