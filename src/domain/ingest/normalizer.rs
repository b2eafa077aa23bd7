//! RecordNormalizer - converts raw CSV exports into normalized records.

use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dates::parse_entry_date;
use super::format::{detect_format, ColumnMap};
use super::record::NormalizedRecord;
use crate::domain::foundation::{
    EntryId, Money, Platform, ProfileError, SportCode, ValidationError,
};

/// Default upper bound on accepted input size (10 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Limits applied while reading an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub max_input_bytes: usize,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// A data row that was skipped, with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    pub reason: String,
}

/// Result of normalizing one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBatch {
    pub platform: Platform,
    pub records: Vec<NormalizedRecord>,
    pub warnings: Vec<RowWarning>,
    pub rows_read: usize,
}

/// Detects the export format and normalizes every row.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    settings: IngestSettings,
}

impl RecordNormalizer {
    pub fn new(settings: IngestSettings) -> Self {
        Self { settings }
    }

    /// Normalizes raw CSV text.
    ///
    /// Malformed rows are skipped and reported as warnings.
    ///
    /// # Errors
    ///
    /// - `InputTooLarge` if the text exceeds the configured limit
    /// - `FormatUnrecognized` if the header row matches no known export
    /// - `EmptyResult` if no row survives
    /// - `DuplicateRecord` if an entry id occurs more than once
    pub fn normalize(&self, input: &str) -> Result<NormalizedBatch, ProfileError> {
        if input.len() > self.settings.max_input_bytes {
            return Err(ProfileError::InputTooLarge {
                actual: input.len(),
                limit: self.settings.max_input_bytes,
            });
        }
        if input.trim().is_empty() {
            return Err(ProfileError::FormatUnrecognized {
                headers: Vec::new(),
                reason: "input is empty".to_string(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(input.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ProfileError::MalformedInput(e.to_string()))?
            .clone();
        let header_cells: Vec<&str> = headers.iter().collect();
        let columns = detect_format(&header_cells)?;

        tracing::debug!(
            platform = %columns.platform,
            columns = header_cells.len(),
            "Detected export format"
        );

        let mut records = Vec::new();
        let mut warnings = Vec::new();
        let mut rows_read = 0;

        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            rows_read += 1;

            let parsed = result
                .map_err(|e| e.to_string())
                .and_then(|raw| parse_row(&raw, &columns).map_err(|e| e.to_string()));

            match parsed {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::warn!(row, reason = %reason, "Skipping malformed row");
                    warnings.push(RowWarning { row, reason });
                }
            }
        }

        if records.is_empty() {
            return Err(ProfileError::EmptyResult {
                rows_read,
                rejected: warnings.len(),
            });
        }

        let duplicates = duplicate_ids(&records);
        if !duplicates.is_empty() {
            return Err(ProfileError::DuplicateRecord { ids: duplicates });
        }

        Ok(NormalizedBatch {
            platform: columns.platform,
            records,
            warnings,
            rows_read,
        })
    }
}

fn cell<'r>(raw: &'r StringRecord, index: usize, field: &str) -> Result<&'r str, ValidationError> {
    raw.get(index)
        .ok_or_else(|| ValidationError::invalid_format(field, "column missing from row"))
}

fn parse_row(raw: &StringRecord, columns: &ColumnMap) -> Result<NormalizedRecord, ValidationError> {
    let entry_id = EntryId::new(cell(raw, columns.entry_id, "entry_id")?)?;
    let contest_name = cell(raw, columns.contest_name, "contest_name")?;
    let entry_fee = Money::parse_currency("entry_fee", cell(raw, columns.entry_fee, "entry_fee")?)?;
    let winnings = Money::parse_currency("winnings", cell(raw, columns.winnings, "winnings")?)?;
    let sport = SportCode::new(cell(raw, columns.sport, "sport")?)?;
    let entered_at = parse_entry_date(cell(raw, columns.entered_at, "entered_at")?)?;
    let points = columns
        .points
        .and_then(|i| raw.get(i))
        .map(parse_points)
        .unwrap_or(Decimal::ZERO);

    Ok(NormalizedRecord::new(
        entry_id,
        entered_at,
        sport,
        entry_fee,
        winnings,
        columns.platform,
    )
    .with_contest_name(contest_name)
    .with_points(points))
}

fn parse_points(raw: &str) -> Decimal {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    cleaned.parse().unwrap_or(Decimal::ZERO)
}

fn duplicate_ids(records: &[NormalizedRecord]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.entry_id().as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(id, _)| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ContestType;
    use rust_decimal_macros::dec;

    const DK_HEADER: &str = "Entry ID,Contest Name,Entry Fee,Winnings,Sport,Date Entered,Points\n";

    fn normalize(csv: &str) -> Result<NormalizedBatch, ProfileError> {
        RecordNormalizer::default().normalize(csv)
    }

    #[test]
    fn normalizes_draftkings_rows() {
        let csv = format!(
            "{DK_HEADER}\
             1,NFL $20K Shot,$10.00,$25.00,NFL,2024-01-07 13:00:00,142.5\n\
             2,NBA 50/50,\"$1,000.00\",$0.00,basketball,2024-01-08 19:30:00,\n"
        );
        let batch = normalize(&csv).unwrap();

        assert_eq!(batch.platform, Platform::DraftKings);
        assert_eq!(batch.rows_read, 2);
        assert!(batch.warnings.is_empty());

        let first = &batch.records[0];
        assert_eq!(first.entry_id().as_str(), "1");
        assert_eq!(first.entry_fee().amount(), dec!(10.00));
        assert_eq!(first.winnings().amount(), dec!(25.00));
        assert_eq!(first.points(), dec!(142.5));
        assert_eq!(first.contest_name(), Some("NFL $20K Shot"));
        assert_eq!(first.contest_type(), ContestType::Unclassified);

        let second = &batch.records[1];
        assert_eq!(second.entry_fee().amount(), dec!(1000.00));
        assert_eq!(second.sport().as_str(), "NBA");
        assert_eq!(second.points(), Decimal::ZERO);
    }

    #[test]
    fn normalizes_fanduel_rows() {
        let csv = "Entry Id,Contest,Sport,Entered,Entry Fee,Winnings\n\
                   fd-1,Double Up,nhl,01/05/2024 7:00 PM,5,10\n";
        let batch = normalize(csv).unwrap();
        assert_eq!(batch.platform, Platform::FanDuel);
        assert_eq!(batch.records[0].platform(), Platform::FanDuel);
        assert_eq!(batch.records[0].sport().as_str(), "NHL");
    }

    #[test]
    fn negative_fee_row_is_skipped_with_warning() {
        let csv = format!(
            "{DK_HEADER}\
             1,GPP,$10.00,$0.00,NFL,2024-01-07,\n\
             2,GPP,-$5.00,$0.00,NFL,2024-01-07,\n\
             3,GPP,$3.00,$0.00,NFL,2024-01-07,\n"
        );
        let batch = normalize(&csv).unwrap();

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.rows_read, 3);
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].row, 2);
        assert!(batch.warnings[0].reason.contains("entry_fee"));
    }

    #[test]
    fn short_and_unparseable_rows_are_skipped() {
        let csv = format!(
            "{DK_HEADER}\
             1,GPP,$10.00\n\
             2,GPP,$1.00,$0.00,NFL,someday,\n\
             ,GPP,$1.00,$0.00,NFL,2024-01-07,\n\
             4,GPP,$1.00,$0.00,,2024-01-07,\n\
             5,GPP,$1.00,$0.00,NFL,2024-01-07,n/a\n"
        );
        let batch = normalize(&csv).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].points(), Decimal::ZERO);
        let rows: Vec<usize> = batch.warnings.iter().map(|w| w.row).collect();
        assert_eq!(rows, vec![1, 2, 3, 4]);
    }

    #[test]
    fn all_rows_rejected_is_empty_result() {
        let csv = format!("{DK_HEADER}1,GPP,abc,$0.00,NFL,2024-01-07,\n");
        let err = normalize(&csv).unwrap_err();
        assert_eq!(
            err,
            ProfileError::EmptyResult {
                rows_read: 1,
                rejected: 1
            }
        );
    }

    #[test]
    fn header_only_is_empty_result() {
        let err = normalize(DK_HEADER).unwrap_err();
        assert!(matches!(err, ProfileError::EmptyResult { rows_read: 0, .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected_sorted() {
        let csv = format!(
            "{DK_HEADER}\
             9,GPP,$1,$0,NFL,2024-01-07,\n\
             3,GPP,$1,$0,NFL,2024-01-07,\n\
             9,GPP,$1,$0,NFL,2024-01-08,\n\
             3,GPP,$1,$0,NFL,2024-01-08,\n\
             3,GPP,$1,$0,NFL,2024-01-09,\n\
             4,GPP,$1,$0,NFL,2024-01-09,\n"
        );
        let err = normalize(&csv).unwrap_err();
        assert_eq!(
            err,
            ProfileError::DuplicateRecord {
                ids: vec!["3".to_string(), "9".to_string()]
            }
        );
    }

    #[test]
    fn oversize_input_is_rejected() {
        let normalizer = RecordNormalizer::new(IngestSettings { max_input_bytes: 16 });
        let err = normalizer.normalize(DK_HEADER).unwrap_err();
        assert!(matches!(err, ProfileError::InputTooLarge { limit: 16, .. }));
    }

    #[test]
    fn unknown_headers_are_unrecognized() {
        let err = normalize("a,b,c\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ProfileError::FormatUnrecognized { .. }));
    }

    #[test]
    fn empty_input_is_unrecognized() {
        let err = normalize("").unwrap_err();
        assert!(matches!(err, ProfileError::FormatUnrecognized { .. }));
    }
}
