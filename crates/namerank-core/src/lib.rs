//! Core types, configuration, and errors for namerank
//!
//! This crate provides:
//! - Data models (`CandidateRecord`, `MatchRecord`, `LexicalGroup`, ...)
//! - Configuration (`RankConfig`, environment parsing)
//! - Common error types

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod models;

pub use config::{FillerPolicy, RankConfig, UnsortedPolicy};
pub use error::{Error as RankError, Result as RankResult};
pub use models::{
    CandidateRecord, Curation, LexicalGroup, MatchRecord, MatchType, NomCode, ScoreDetails,
};
