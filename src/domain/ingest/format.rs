//! Export format detection from CSV header rows.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Platform, ProfileError};

const BOM: char = '\u{feff}';

/// Column names making up one platform's export layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSignature {
    pub platform: Platform,
    pub entry_id: &'static str,
    pub contest_name: &'static str,
    pub entry_fee: &'static str,
    pub winnings: &'static str,
    pub sport: &'static str,
    pub entered_at: &'static str,
    pub points: &'static str,
}

impl FormatSignature {
    /// Columns that must be present for the signature to match.
    pub fn required(&self) -> [&'static str; 6] {
        [
            self.entry_id,
            self.contest_name,
            self.entry_fee,
            self.winnings,
            self.sport,
            self.entered_at,
        ]
    }
}

/// Known export layouts, in detection order.
pub const SIGNATURES: &[FormatSignature] = &[
    FormatSignature {
        platform: Platform::DraftKings,
        entry_id: "Entry ID",
        contest_name: "Contest Name",
        entry_fee: "Entry Fee",
        winnings: "Winnings",
        sport: "Sport",
        entered_at: "Date Entered",
        points: "Points",
    },
    FormatSignature {
        platform: Platform::FanDuel,
        entry_id: "Entry Id",
        contest_name: "Contest",
        entry_fee: "Entry Fee",
        winnings: "Winnings",
        sport: "Sport",
        entered_at: "Entered",
        points: "Points",
    },
];

/// Resolved column positions for a detected export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub platform: Platform,
    pub entry_id: usize,
    pub contest_name: usize,
    pub entry_fee: usize,
    pub winnings: usize,
    pub sport: usize,
    pub entered_at: usize,
    pub points: Option<usize>,
}

/// Trims a raw header cell and strips a leading byte-order mark.
pub fn clean_header(raw: &str) -> String {
    raw.trim_start_matches(BOM).trim().to_string()
}

fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn resolve(signature: &FormatSignature, headers: &[String]) -> Option<ColumnMap> {
    Some(ColumnMap {
        platform: signature.platform,
        entry_id: position(headers, signature.entry_id)?,
        contest_name: position(headers, signature.contest_name)?,
        entry_fee: position(headers, signature.entry_fee)?,
        winnings: position(headers, signature.winnings)?,
        sport: position(headers, signature.sport)?,
        entered_at: position(headers, signature.entered_at)?,
        points: position(headers, signature.points),
    })
}

/// Detects which platform produced an export and where its columns live.
///
/// Headers are compared case-insensitively after trimming. When more than
/// one signature matches, the exact-case identifier column decides.
///
/// # Errors
///
/// `FormatUnrecognized` when no signature matches or a tie cannot be broken.
pub fn detect_format(raw_headers: &[&str]) -> Result<ColumnMap, ProfileError> {
    let headers: Vec<String> = raw_headers.iter().map(|h| clean_header(h)).collect();

    let matches: Vec<(ColumnMap, &FormatSignature)> = SIGNATURES
        .iter()
        .filter_map(|sig| resolve(sig, &headers).map(|map| (map, sig)))
        .collect();

    match matches.len() {
        0 => Err(ProfileError::FormatUnrecognized {
            headers,
            reason: "no known export signature matched".to_string(),
        }),
        1 => Ok(matches[0].0),
        _ => {
            let exact: Vec<ColumnMap> = matches
                .iter()
                .filter(|(_, sig)| headers.iter().any(|h| h == sig.entry_id))
                .map(|(map, _)| *map)
                .collect();
            match exact.as_slice() {
                [only] => {
                    tracing::debug!(
                        platform = %only.platform,
                        "Ambiguous headers resolved by identifier column"
                    );
                    Ok(*only)
                }
                _ => Err(ProfileError::FormatUnrecognized {
                    headers,
                    reason: "headers match more than one export signature".to_string(),
                }),
            }
        }
    }
}
