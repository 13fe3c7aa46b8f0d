//! Scan results and the CSV sink.

use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};

/// Header row of the CSV report.
pub const CSV_HEADER: [&str; 3] = ["common_word", "rare_word", "prior_weight"];

/// A rare word that is probably a misspelling of a common one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypoCandidate {
    /// The frequent word the rare one is close to.
    pub common_word: String,
    /// The singleton word one edit away.
    pub rare_word: String,
    /// Priority score of the common word.
    pub prior_weight: usize,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Files read, in processing order.
    pub files: Vec<Utf8PathBuf>,
    /// Words counted across the corpus.
    pub total_words: usize,
    /// Distinct words.
    pub unique_words: usize,
    /// Words seen exactly once.
    pub singleton_words: usize,
    /// Possible typos, most suspicious first.
    pub candidates: Vec<TypoCandidate>,
}

/// Write `candidates` as CSV, optionally preceded by a UTF-8 byte-order mark.
///
/// Fields are quoted only when they hold a delimiter, quote or line break.
pub fn write_csv<W: Write>(
    mut writer: W,
    candidates: &[TypoCandidate],
    bom: bool,
) -> csv::Result<()> {
    if bom {
        writer.write_all("\u{feff}".as_bytes())?;
    }
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for candidate in candidates {
        out.serialize(candidate)?;
    }
    out.flush()?;
    Ok(())
}

/// Create or truncate `path` and write the CSV report into it.
#[tracing::instrument(skip(candidates), fields(candidates = candidates.len()))]
pub fn write_csv_file(path: &Utf8Path, candidates: &[TypoCandidate], bom: bool) -> ScanResult<()> {
    let write_err = |source| ScanError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path.as_std_path()).map_err(write_err)?;
    write_csv(BufWriter::new(file), candidates, bom).map_err(|e| write_err(e.into()))?;
    tracing::info!(output = %path, "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn candidate(common: &str, rare: &str, weight: usize) -> TypoCandidate {
        TypoCandidate {
            common_word: common.to_string(),
            rare_word: rare.to_string(),
            prior_weight: weight,
        }
    }

    fn render(candidates: &[TypoCandidate], bom: bool) -> String {
        let mut out = Vec::new();
        write_csv(&mut out, candidates, bom).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_and_rows_in_order() {
        let csv = render(
            &[
                candidate("everybody", "everybod", 3600),
                candidate("nation", "natio", 3000),
            ],
            false,
        );
        assert_eq!(
            csv,
            "common_word,rare_word,prior_weight\neverybody,everybod,3600\nnation,natio,3000\n"
        );
    }

    #[test]
    fn empty_report_has_header_only() {
        assert_eq!(render(&[], false), "common_word,rare_word,prior_weight\n");
    }

    #[test]
    fn bom_prefix() {
        let csv = render(&[], true);
        assert!(csv.starts_with('\u{feff}'));
        assert!(csv.ends_with("prior_weight\n"));
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        let csv = render(&[candidate("hello,world", "say \"hi\"", 4000)], false);
        assert!(csv.ends_with("\"hello,world\",\"say \"\"hi\"\"\",4000\n"), "{csv}");
    }

    #[test]
    fn line_breaks_in_fields_are_quoted() {
        let csv = render(&[candidate("two\nlines", "cr\rhere", 4000)], false);
        assert!(csv.ends_with("\"two\nlines\",\"cr\rhere\",4000\n"), "{csv}");
    }

    #[test]
    fn apostrophes_are_not_quoted() {
        let csv = render(&[candidate("don't", "dont't", 5000)], false);
        assert!(csv.ends_with("don't,dont't,5000\n"));
    }

    #[test]
    fn writes_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("output.csv")).unwrap();
        write_csv_file(&path, &[candidate("state", "stat", 9000)], true).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xef, 0xbb, 0xbf]);
        assert!(String::from_utf8(bytes).unwrap().ends_with("state,stat,9000\n"));
    }

    #[test]
    fn write_failure_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("missing").join("output.csv")).unwrap();
        let err = write_csv_file(&path, &[], false).unwrap_err();
        assert!(matches!(err, ScanError::Write { .. }));
        assert!(err.to_string().contains("output.csv"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = ScanReport {
            files: vec![Utf8PathBuf::from("a_l_english.yml")],
            total_words: 10,
            unique_words: 4,
            singleton_words: 2,
            candidates: vec![candidate("state", "stat", 9000)],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_words"], 10);
        assert_eq!(json["candidates"][0]["rare_word"], "stat");
        assert_eq!(json["files"][0], "a_l_english.yml");
    }
}
