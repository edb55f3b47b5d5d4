use anyhow::{Context, Result};
use std::io::Write;

use crate::stats::StatRow;

pub const HEADERS: [&str; 15] = [
    "Name", "Team", "PTS", "FGA", "FGM", "FG%", "LA", "LM", "LA%", "3PA", "3PM", "3P%", "FTA",
    "FTM", "FT%",
];

/// Writes the header and each projected row as-is. Returns the row count.
pub fn write_rows_csv<W: Write>(rows: &[StatRow], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;

    for row in rows {
        csv_writer
            .write_record(row.cells())
            .with_context(|| format!("Failed to write CSV row for {}", row.name))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::project_document;
    use serde_json::json;

    fn rows_to_csv_string(rows: &[StatRow]) -> String {
        let mut buffer = Vec::new();
        write_rows_csv(rows, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_only_for_no_rows() {
        let csv = rows_to_csv_string(&[]);
        assert_eq!(csv, "Name,Team,PTS,FGA,FGM,FG%,LA,LM,LA%,3PA,3PM,3P%,FTA,FTM,FT%\n");
    }

    #[test]
    fn test_rows_are_written_verbatim_and_quoted_when_needed() {
        let (row, _) = project_document(&json!({
            "name": "Valle, Jr. #26",
            "team": "USI FALCONS",
            "pts": 2,
            "fga": 2,
            "fgm": 1,
            "fgPct": 0.555
        }));
        let csv = rows_to_csv_string(&[row]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Valle, Jr. #26\",USI FALCONS,2,2,1,55.5%,0,0,0.0%,0,0,0.0%,0,0,0.0%"
        );
    }
}
