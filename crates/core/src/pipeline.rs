//! Batch processing of input records.
//!
//! [`Pipeline::analyze`] walks input records one at a time: fetch the text,
//! score it, yield the outcome. Record-local failures become
//! [`RecordOutcome::Unavailable`] and processing moves on. Any other error
//! is yielded once as `Err` and ends the iteration.

use crate::analyzer::Analyzer;
use crate::scores::{FIELD_COUNT, ScoreVector, row_cells};
use crate::workbook::InputRecord;
use crate::{MetricsError, Result};

/// Produces the readable text behind a URL.
pub trait TextSource {
    fn article_text(&self, url: &str) -> Result<String>;
}

/// What happened to one record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Text was extracted and scored.
    Scored(ScoreVector),
    /// No text could be extracted; the row gets null cells.
    Unavailable(String),
}

/// An input record together with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedRecord {
    pub record: InputRecord,
    pub outcome: RecordOutcome,
}

impl AnalyzedRecord {
    pub fn scores(&self) -> Option<&ScoreVector> {
        match &self.outcome {
            RecordOutcome::Scored(scores) => Some(scores),
            RecordOutcome::Unavailable(_) => None,
        }
    }

    /// The thirteen metric cells for this record's output row.
    pub fn cells(&self) -> [Option<f64>; FIELD_COUNT] {
        row_cells(self.scores())
    }
}

/// Drives records through extraction and scoring.
pub struct Pipeline<'a, S: ?Sized> {
    source: &'a S,
    analyzer: &'a Analyzer<'a>,
}

impl<'a, S: TextSource + ?Sized> Pipeline<'a, S> {
    pub fn new(source: &'a S, analyzer: &'a Analyzer<'a>) -> Self {
        Self { source, analyzer }
    }

    /// Processes a single record.
    ///
    /// Only errors that are not record-local are returned as `Err`.
    pub fn analyze_one(&self, record: InputRecord) -> Result<AnalyzedRecord> {
        let outcome = match self.source.article_text(&record.url) {
            Ok(text) if text.is_empty() => {
                tracing::warn!(url = %record.url, "No text extracted");
                RecordOutcome::Unavailable(MetricsError::NoContent.to_string())
            }
            Ok(text) => RecordOutcome::Scored(self.analyzer.calculate_scores(&text)),
            Err(e) if e.is_record_local() => {
                tracing::warn!(url = %record.url, "Error extracting text from URL: {e}");
                RecordOutcome::Unavailable(e.to_string())
            }
            Err(e) => return Err(e),
        };

        Ok(AnalyzedRecord { record, outcome })
    }

    /// Lazily processes records in order.
    pub fn analyze<I>(&self, records: I) -> Analyses<'_, 'a, S, I::IntoIter>
    where
        I: IntoIterator<Item = InputRecord>,
    {
        Analyses { pipeline: self, records: records.into_iter(), processed: 0, failed: false }
    }

    /// Processes every record, stopping at the first fatal error.
    pub fn run(&self, records: Vec<InputRecord>) -> Result<Vec<AnalyzedRecord>> {
        let total = records.len();
        let results = self.analyze(records).collect::<Result<Vec<_>>>()?;

        let scored = results.iter().filter(|r| r.scores().is_some()).count();
        tracing::info!(total, scored, unavailable = total - scored, "Batch complete");

        Ok(results)
    }
}

/// Iterator returned by [`Pipeline::analyze`].
pub struct Analyses<'p, 'a, S: ?Sized, I> {
    pipeline: &'p Pipeline<'a, S>,
    records: I,
    processed: usize,
    failed: bool,
}

impl<S, I> Iterator for Analyses<'_, '_, S, I>
where
    S: TextSource + ?Sized,
    I: Iterator<Item = InputRecord>,
{
    type Item = Result<AnalyzedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let record = self.records.next()?;
        self.processed += 1;
        tracing::debug!(index = self.processed, url = %record.url, "Processing record");

        let result = self.pipeline.analyze_one(record);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
