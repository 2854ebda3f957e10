//! relnotes - release notes generator library
//!
//! This library provides the core functionality for producing release notes
//! from merged change requests and for gating dependency additions:
//! - Label section extraction and dependency table parsing
//! - Dependency catalog classification and manifest validation
//! - Cross-change-request dependency merging
//! - Release notes composition and dependency listing diffs

pub mod catalog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod merge;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod source;
