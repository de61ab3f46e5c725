use csv::ReaderBuilder;
use reqwest::Client;
use tracing::debug;

use crate::config::TransformOptions;
use crate::error::{Result, ScrapeError};

/// Delimiter used by the published dataset.
pub const DELIMITER: u8 = b';';

/// Download the resource body and decode it from the catalogue's legacy
/// single-byte encoding. WHATWG folds ISO-8859-1 into windows-1252, which
/// is a superset, so the windows-1252 decoder covers both labels.
pub async fn download_body(client: &Client, url: &str) -> Result<String> {
    debug!(%url, "downloading resource");
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
    Ok(text.into_owned())
}

/// Cheap dialect guard: the first non-empty line must contain the
/// delimiter. Catches the catalogue serving an error page instead of the
/// table.
pub fn looks_delimited(contents: &str, delimiter: u8) -> bool {
    contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.as_bytes().contains(&delimiter))
        .unwrap_or(false)
}

/// Parse the decoded body into rows of string cells. The guard is an
/// optional external check, not part of the transform itself.
pub fn parse_rows(contents: &str, options: &TransformOptions) -> Result<Vec<Vec<String>>> {
    if !options.skip_validation && !looks_delimited(contents, DELIMITER) {
        return Err(ScrapeError::structural(format!(
            "body does not look like '{}'-delimited text",
            DELIMITER as char
        )));
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_rows() {
        let body = ";2019;2020\nBayern;10;20\nBerlin;30;40\n";
        let rows = parse_rows(body, &TransformOptions::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["Bayern", "10", "20"]);
    }

    #[test]
    fn flexible_row_lengths_are_kept() {
        let body = "a;b;c\nnote\nBayern;1;2\n";
        let rows = parse_rows(body, &TransformOptions::default()).unwrap();
        assert_eq!(rows[1], vec!["note"]);
        assert_eq!(rows[2].len(), 3);
    }

    #[test]
    fn guard_rejects_undelimited_body() {
        let body = "<html>Service temporarily unavailable</html>";
        assert!(matches!(
            parse_rows(body, &TransformOptions::default()),
            Err(ScrapeError::Structural { .. })
        ));
    }

    #[test]
    fn guard_can_be_skipped() {
        let body = "just one column\nsecond row\n";
        let options = TransformOptions {
            skip_validation: true,
        };
        let rows = parse_rows(body, &options).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn looks_delimited_skips_leading_blank_lines() {
        assert!(looks_delimited("\n\nBayern;10\n", b';'));
        assert!(!looks_delimited("", b';'));
    }
}
