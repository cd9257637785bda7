//! Spreadsheet input and output.
//!
//! Records are read from the first worksheet of an `.xlsx` file. Row 1 is
//! the header; the `URL_ID` and `URL` columns are found by name. Results go
//! back into the same worksheet: the thirteen metric cells of each record
//! are written to columns 3 through 15 of the row the record came from.

use std::path::{Path, PathBuf};

use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::pipeline::AnalyzedRecord;
use crate::scores::FIELD_NAMES;
use crate::{MetricsError, Result};

pub const URL_ID_HEADER: &str = "URL_ID";
pub const URL_HEADER: &str = "URL";

/// First column that receives metric values.
pub const METRIC_START_COLUMN: u32 = 3;

const HEADER_ROW: u32 = 1;

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    /// 1-based worksheet row.
    pub row: u32,
    pub url_id: String,
    pub url: String,
}

/// An `.xlsx` workbook opened for reading records and writing results.
pub struct Workbook {
    path: PathBuf,
    book: Spreadsheet,
}

impl Workbook {
    /// Opens an existing workbook.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(MetricsError::FileNotFound(path));
        }

        let book = umya_spreadsheet::reader::xlsx::read(&path)
            .map_err(|e| MetricsError::WorkbookError(format!("{}: {e}", path.display())))?;

        Ok(Self { path, book })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&self) -> Result<&Worksheet> {
        self.book
            .get_sheet(&0)
            .ok_or_else(|| MetricsError::WorkbookError(format!("{}: no worksheets", self.path.display())))
    }

    fn sheet_mut(&mut self) -> Result<&mut Worksheet> {
        let path = self.path.display().to_string();
        self.book
            .get_sheet_mut(&0)
            .ok_or_else(|| MetricsError::WorkbookError(format!("{path}: no worksheets")))
    }

    /// Reads every record below the header row.
    ///
    /// Rows whose id and URL cells are both blank are skipped. A row with
    /// an id but no URL is kept; it will fail extraction and get null cells.
    pub fn records(&self) -> Result<Vec<InputRecord>> {
        let sheet = self.sheet()?;
        let id_column = find_column(sheet, URL_ID_HEADER)?;
        let url_column = find_column(sheet, URL_HEADER)?;

        let mut records = Vec::new();
        for row in (HEADER_ROW + 1)..=sheet.get_highest_row() {
            let url_id = sheet.get_value((id_column, row)).trim().to_string();
            let url = sheet.get_value((url_column, row)).trim().to_string();

            if url_id.is_empty() && url.is_empty() {
                continue;
            }
            if url.is_empty() {
                tracing::warn!(row, url_id = %url_id, "Row has no URL");
            }
            records.push(InputRecord { row, url_id, url });
        }

        Ok(records)
    }

    /// Writes metric cells for each analyzed record into its source row.
    ///
    /// Blank metric header cells are filled with the canonical column names.
    /// Null outcomes clear the thirteen metric cells.
    pub fn write_results(&mut self, results: &[AnalyzedRecord]) -> Result<()> {
        let sheet = self.sheet_mut()?;

        for (column, name) in (METRIC_START_COLUMN..).zip(FIELD_NAMES) {
            if sheet.get_value((column, HEADER_ROW)).trim().is_empty() {
                sheet.get_cell_mut((column, HEADER_ROW)).set_value(name);
            }
        }

        for result in results {
            let row = result.record.row;
            for (column, value) in (METRIC_START_COLUMN..).zip(result.cells()) {
                let cell = sheet.get_cell_mut((column, row));
                match value {
                    Some(number) => {
                        cell.set_value_number(number);
                    }
                    None => {
                        cell.set_blank();
                    }
                }
            }
        }

        Ok(())
    }

    /// Saves the workbook back to the file it was opened from.
    pub fn save(&self) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path)
            .map_err(|e| MetricsError::WorkbookError(format!("{}: {e}", self.path.display())))
    }
}

fn find_column(sheet: &Worksheet, header: &str) -> Result<u32> {
    (1..=sheet.get_highest_column())
        .find(|&column| sheet.get_value((column, HEADER_ROW)).trim().eq_ignore_ascii_case(header))
        .ok_or_else(|| MetricsError::MissingColumn(header.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RecordOutcome;
    use crate::scores::{FIELD_COUNT, ScoreVector};
    use tempfile::TempDir;

    fn write_input(path: &Path, rows: &[(&str, &str)]) {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.get_cell_mut((1, 1)).set_value("URL_ID");
        sheet.get_cell_mut((2, 1)).set_value("URL");
        for (i, (id, url)) in rows.iter().enumerate() {
            let row = i as u32 + 2;
            sheet.get_cell_mut((1, row)).set_value(*id);
            sheet.get_cell_mut((2, row)).set_value(*url);
        }
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn test_open_missing_file() {
        let result = Workbook::open("/nonexistent/input.xlsx");
        assert!(matches!(result, Err(MetricsError::FileNotFound(_))));
    }

    #[test]
    fn test_read_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("input.xlsx");
        write_input(&path, &[("blackassign0001", " https://a.example "), ("", ""), ("blackassign0003", "")]);

        let workbook = Workbook::open(&path).unwrap();
        let records = workbook.records().unwrap();

        assert_eq!(
            records,
            vec![
                InputRecord { row: 2, url_id: "blackassign0001".into(), url: "https://a.example".into() },
                InputRecord { row: 4, url_id: "blackassign0003".into(), url: String::new() },
            ]
        );
    }

    #[test]
    fn test_missing_url_column() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("input.xlsx");
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_mut(&0).unwrap().get_cell_mut((1, 1)).set_value("URL_ID");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let result = Workbook::open(&path).unwrap().records();
        assert!(matches!(result, Err(MetricsError::MissingColumn(ref c)) if c == "URL"));
    }

    #[test]
    fn test_write_results_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("input.xlsx");
        write_input(&path, &[("a", "https://a.example"), ("b", "https://b.example")]);

        let mut workbook = Workbook::open(&path).unwrap();
        let records = workbook.records().unwrap();
        let scores = ScoreVector { positive_score: 3.0, fog_index: 7.5, ..ScoreVector::zero() };
        let results = vec![
            AnalyzedRecord { record: records[0].clone(), outcome: RecordOutcome::Scored(scores) },
            AnalyzedRecord { record: records[1].clone(), outcome: RecordOutcome::Unavailable("timeout".into()) },
        ];
        workbook.write_results(&results).unwrap();
        workbook.save().unwrap();

        let reopened = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = reopened.get_sheet(&0).unwrap();

        assert_eq!(sheet.get_value((3, 1)), "POSITIVE SCORE");
        assert_eq!(sheet.get_value((15, 1)), "AVG WORD LENGTH");
        assert_eq!(sheet.get_value((1, 2)), "a");
        assert_eq!(sheet.get_value((3, 2)), "3");
        assert_eq!(sheet.get_value((9, 2)), "7.5");
        for column in METRIC_START_COLUMN..METRIC_START_COLUMN + FIELD_COUNT as u32 {
            assert_eq!(sheet.get_value((column, 3)), "");
        }
    }

    #[test]
    fn test_existing_headers_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("input.xlsx");
        write_input(&path, &[("a", "https://a.example")]);
        let mut book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        book.get_sheet_mut(&0).unwrap().get_cell_mut((3, 1)).set_value("Positive");
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let mut workbook = Workbook::open(&path).unwrap();
        workbook.write_results(&[]).unwrap();
        workbook.save().unwrap();

        let reopened = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
        let sheet = reopened.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value((3, 1)), "Positive");
        assert_eq!(sheet.get_value((4, 1)), "NEGATIVE SCORE");
    }
}
