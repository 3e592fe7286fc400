//! Tabular alignment parser.
//!
//! Reads the line-oriented, block-interleaved format in which every data
//! line carries one `name fragment` pair:
//!
//! ```text
//! seq1 ACDEFGHI--KL
//! seq2 ACDE-GHIVWKL
//!
//! seq1 MNPQRST
//! seq2 MNPQRSA
//! ```
//!
//! Repeated names append their fragments in file order, which is how
//! interleaved blocks are reconstructed into full sequences. Any line that
//! is not exactly two whitespace-separated tokens (a blank line, a header,
//! a ruler) is skipped without error.
//!
//! Tokens are opaque: no alphabet checking is performed on fragments, and
//! a declared column count in a header line is never enforced.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::model::Alignment;

/// Errors that can occur while reading a tabular alignment.
#[derive(Error, Debug)]
pub enum TabularError {
    #[error("Failed to read alignment source: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tabular parsing operations.
pub type TabularResult<T> = Result<T, TabularError>;

/// Splits a line into its identifier and fragment, if it has the exact
/// two-token shape.
///
/// A line matches iff it is a run of non-whitespace, one or more
/// whitespace characters, and a second run of non-whitespace, with nothing
/// before or after. Everything else yields `None` and is skipped by the
/// parsers, never reported as an error.
pub fn split_id_fragment(line: &str) -> Option<(&str, &str)> {
    if line.is_empty()
        || line.starts_with(char::is_whitespace)
        || line.ends_with(char::is_whitespace)
    {
        return None;
    }

    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(id), Some(fragment), None) => Some((id, fragment)),
        _ => None,
    }
}

/// Parses tabular content from a reader, labeling the alignment with
/// `source`.
///
/// Lines are consumed in order and accepted pairs are aggregated as they
/// appear, so fragments concatenate in file order. A read failure aborts
/// the whole parse; there is no partial alignment.
pub fn parse_tabular<R: BufRead>(
    reader: R,
    source: impl Into<String>,
) -> TabularResult<Alignment> {
    let mut alignment = Alignment::new(source);

    for line in reader.lines() {
        let line = line?;
        if let Some((id, fragment)) = split_id_fragment(&line) {
            alignment.aggregate(id, fragment);
        }
    }

    Ok(alignment)
}

/// Parses tabular content from a string.
///
/// Useful for testing or processing in-memory data. The source label is
/// left empty; use [`parse_tabular_file`] to label an alignment with its
/// path.
pub fn parse_tabular_str(content: &str) -> Alignment {
    let mut alignment = Alignment::new("");

    for line in content.lines() {
        if let Some((id, fragment)) = split_id_fragment(line) {
            alignment.aggregate(id, fragment);
        }
    }

    alignment
}

/// Parses a tabular alignment file.
///
/// The alignment is labeled with the path. An input in which no line has
/// the two-token shape yields an empty alignment, not an error.
pub fn parse_tabular_file<P: AsRef<Path>>(path: P) -> TabularResult<Alignment> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let alignment = parse_tabular(reader, path.display().to_string())?;
    if alignment.is_empty() {
        warn!("no sequence lines recognized in {}", path.display());
    }

    Ok(alignment)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::io::Write;

    use super::*;

    const INTERLEAVED: &str = "seq1 ACDE
seq2 AC-E
seq1 FGHI
seq2 FG-I
";

    #[test]
    fn test_split_two_tokens() {
        assert_eq!(split_id_fragment("seq1 ACGT"), Some(("seq1", "ACGT")));
    }

    #[test]
    fn test_split_any_inner_whitespace() {
        assert_eq!(split_id_fragment("seq1\tACGT"), Some(("seq1", "ACGT")));
        assert_eq!(split_id_fragment("seq1    ACGT"), Some(("seq1", "ACGT")));
        assert_eq!(split_id_fragment("seq1 \t ACGT"), Some(("seq1", "ACGT")));
    }

    #[test]
    fn test_split_rejects_wrong_shapes() {
        assert_eq!(split_id_fragment(""), None);
        assert_eq!(split_id_fragment("   "), None);
        assert_eq!(split_id_fragment("seq1"), None);
        assert_eq!(split_id_fragment("seq1 ACGT extra"), None);
        assert_eq!(split_id_fragment(" seq1 ACGT"), None);
        assert_eq!(split_id_fragment("seq1 ACGT "), None);
        assert_eq!(split_id_fragment("\tseq1 ACGT"), None);
    }

    #[test]
    fn test_split_tokens_are_opaque() {
        // No alphabet validation: any two tokens are accepted
        assert_eq!(split_id_fragment("4 100"), Some(("4", "100")));
        assert_eq!(split_id_fragment(">seq1 AC!?GT"), Some((">seq1", "AC!?GT")));
    }

    #[test]
    fn test_parse_interleaved_blocks() {
        let alignment = parse_tabular_str(INTERLEAVED);
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.get(0).unwrap().id(), "seq1");
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACDEFGHI");
        assert_eq!(alignment.get(1).unwrap().id(), "seq2");
        assert_eq!(alignment.get(1).unwrap().as_str(), "AC-EFG-I");
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let noisy = "seq1 ACDE

seq2 AC-E
lonelytoken
seq1 FGHI
a line with many tokens
  4   8
seq2 FG-I
";
        let clean = parse_tabular_str(INTERLEAVED);
        let alignment = parse_tabular_str(noisy);

        assert_eq!(alignment.len(), clean.len());
        for (got, expected) in alignment.iter().zip(clean.iter()) {
            assert_eq!(got.id(), expected.id());
            assert_eq!(got.as_bytes(), expected.as_bytes());
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let alignment = parse_tabular_str("");
        assert!(alignment.is_empty());

        let alignment = parse_tabular_str("just a header line here\n\n");
        assert!(alignment.is_empty());
    }

    #[test]
    fn test_parse_from_reader() {
        let reader = Cursor::new(INTERLEAVED.as_bytes());
        let alignment = parse_tabular(reader, "stream").unwrap();
        assert_eq!(alignment.source(), "stream");
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.by_id("seq1").unwrap().as_str(), "ACDEFGHI");
    }

    #[test]
    fn test_parse_file_labels_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(INTERLEAVED.as_bytes()).unwrap();

        let alignment = parse_tabular_file(file.path()).unwrap();
        assert_eq!(alignment.source(), file.path().display().to_string());
        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.by_id("seq2").unwrap().as_str(), "AC-EFG-I");
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_tabular_file(dir.path().join("does_not_exist.aln"));
        assert!(matches!(result, Err(TabularError::Io(_))));
    }
}
