//! Relevance scoring and lexical grouping of scientific-name candidates
//!
//! For one input name and the candidate records the name index returned for
//! it, this crate decides which candidate is best and which candidates are
//! spelling or authorship variants of each other:
//! - [`authors`] — author-list and year comparison
//! - [`score`] — the packed 32-bit relevance score and [`sort_results`]
//! - [`select`] — best result, preferred sources, record summary
//! - [`parse`] — splitting matched names into canonical forms and authorship
//! - [`lexgroup`] — partitioning candidates into [`LexicalGroup`]s
//!
//! Everything here is synchronous, allocation-local, and free of shared
//! mutable state, so different input names can be processed on different
//! threads without coordination.
//!
//! [`LexicalGroup`]: namerank_core::LexicalGroup

#![forbid(unsafe_code)]

pub mod authors;
pub mod lexgroup;
pub mod parse;
pub mod score;
pub mod select;

pub use authors::{
    AuthorRelationship, YearRelationship, author_year_code, compare_authors, compare_years,
    normalize_author, normalize_authors,
};
pub use lexgroup::{AuthorFingerprint, infer_nom_code, name_to_lexical_groups};
pub use parse::{AuthorTeam, Authorship, ParsedName, parse_name};
pub use score::{LAYOUT, PRIMARY_SOURCE_ID, Score, sort_results};
pub use select::{best_curation, data_sources_num, finalize, preferred_results};
