// Salary CSV preview.
//
// Parses a salary export (`Full Name`, `Team`, `Cap Hit`, `Years Left`)
// locally before it is uploaded, so an unusable file is caught without a
// round trip.

use std::io::Read;

use serde::Deserialize;
use tracing::warn;

use crate::metrics::parse_cap_hit;

#[derive(Debug, thiserror::Error)]
pub enum SalaryCsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no salary rows found")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawSalaryRow {
    #[serde(rename = "Full Name", default)]
    full_name: Option<String>,
    #[serde(rename = "Team", default)]
    team: Option<String>,
    #[serde(rename = "Cap Hit", default)]
    cap_hit: Option<String>,
    #[serde(rename = "Years Left", default)]
    years_left: Option<String>,
}

/// One parsed salary line.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRow {
    pub full_name: String,
    pub team: Option<String>,
    /// Cap hit exactly as written in the file.
    pub cap_hit: Option<String>,
    /// Cap hit in dollars; 0 when missing or unparseable.
    pub salary_value: f64,
    pub years_left: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryPreview {
    pub rows: Vec<SalaryRow>,
    /// Rows dropped for a missing name or malformed record.
    pub skipped: usize,
}

impl SalaryPreview {
    pub fn total_dollars(&self) -> f64 {
        self.rows.iter().map(|r| r.salary_value).sum()
    }
}

/// Parse a salary CSV. Fails with `Empty` when no usable rows remain.
pub fn preview_salary_csv<R: Read>(rdr: R) -> Result<SalaryPreview, SalaryCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let mut preview = SalaryPreview::default();
    for result in reader.deserialize::<RawSalaryRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed salary row: {}", e);
                preview.skipped += 1;
                continue;
            }
        };
        let Some(full_name) = raw.full_name.filter(|n| !n.is_empty()) else {
            preview.skipped += 1;
            continue;
        };
        let salary_value = raw.cap_hit.as_deref().and_then(parse_cap_hit).unwrap_or(0.0);
        preview.rows.push(SalaryRow {
            full_name,
            team: raw.team,
            cap_hit: raw.cap_hit,
            salary_value,
            years_left: raw.years_left.unwrap_or_else(|| "0".to_string()),
        });
    }

    if preview.rows.is_empty() {
        return Err(SalaryCsvError::Empty);
    }
    Ok(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cap_hits_with_currency_formatting() {
        let csv = "Full Name,Team,Cap Hit,Years Left\n\
                   Connor McDavid,EDM,\"$12,500,000\",3\n\
                   Nick Suzuki,MTL,\"7,875,000\",6\n";
        let preview = preview_salary_csv(csv.as_bytes()).unwrap();
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0].salary_value, 12_500_000.0);
        assert_eq!(preview.rows[0].cap_hit.as_deref(), Some("$12,500,000"));
        assert_eq!(preview.rows[1].years_left, "6");
        assert_eq!(preview.total_dollars(), 20_375_000.0);
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let csv = " Full Name , Team ,Cap Hit , Years Left\nJ. Doe,BOS,950000,1\n";
        let preview = preview_salary_csv(csv.as_bytes()).unwrap();
        assert_eq!(preview.rows[0].full_name, "J. Doe");
        assert_eq!(preview.rows[0].team.as_deref(), Some("BOS"));
    }

    #[test]
    fn unparseable_cap_hit_reads_as_zero_and_years_default() {
        let csv = "Full Name,Cap Hit\nNo Contract,TBD\n";
        let preview = preview_salary_csv(csv.as_bytes()).unwrap();
        assert_eq!(preview.rows[0].salary_value, 0.0);
        assert_eq!(preview.rows[0].years_left, "0");
    }

    #[test]
    fn nameless_rows_are_skipped() {
        let csv = "Full Name,Team,Cap Hit,Years Left\n,TOR,1000000,2\nReal Player,TOR,1000000,2\n";
        let preview = preview_salary_csv(csv.as_bytes()).unwrap();
        assert_eq!(preview.rows.len(), 1);
        assert_eq!(preview.skipped, 1);
    }

    #[test]
    fn file_without_usable_rows_is_rejected() {
        let csv = "Player,Salary\nSomeone,100\n";
        assert!(matches!(
            preview_salary_csv(csv.as_bytes()),
            Err(SalaryCsvError::Empty)
        ));
    }
}
