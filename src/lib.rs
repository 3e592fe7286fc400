//! # seqsieve - Alignment loader and filter
//!
//! Loads line-oriented, block-interleaved multiple sequence alignments in
//! which every data line carries one `name fragment` pair, reconstructs
//! each named sequence by concatenating its fragments in file order, and
//! subsets alignments with predicates evaluated in parallel over
//! gap-stripped residues.
//!
//! ## Architecture
//!
//! - `model`: records, the ordered alignment container, and the
//!   concurrent filter
//! - `tabular`: line tokenization and the parsing entry points
//!
//! ## Example
//!
//! ```
//! use seqsieve::tabular::parse_tabular_str;
//!
//! let alignment = parse_tabular_str(
//!     "seq1 ACDE\nseq2 AC-E\nseq1 FGHI\nseq2 FG-I\n",
//! );
//! assert_eq!(alignment.len(), 2);
//!
//! // Keep sequences with at least 8 residues once gaps are stripped
//! let long = alignment.filter(|_, residues| residues.len() >= 8);
//! assert_eq!(long.len(), 1);
//! assert_eq!(long.get(0).unwrap().id(), "seq1");
//! ```

pub mod model;
pub mod tabular;
