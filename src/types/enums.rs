//! Enumeration types for the policy diagram tool
//!
//! This module contains the enumeration types used across the pipeline: the
//! serialization format of policy fragments and the output wrapping mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Serialization format of a policy fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentFormat {
    /// YAML documents (the default for any extension other than `.json`)
    Yaml,
    /// JSON documents
    Json,
}

impl FragmentFormat {
    /// Pick the format for a fragment path from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FragmentFormat::Json,
            _ => FragmentFormat::Yaml,
        }
    }
}

impl fmt::Display for FragmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentFormat::Yaml => write!(f, "YAML"),
            FragmentFormat::Json => write!(f, "JSON"),
        }
    }
}

/// How the rendered diagram is wrapped on output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Diagram text as-is
    #[default]
    Raw,
    /// Diagram text inside a fenced `mermaid` code block
    Markdown,
}

impl OutputFormat {
    /// Pick the format from the embed flag
    pub fn from_embed(embed: bool) -> Self {
        if embed {
            OutputFormat::Markdown
        } else {
            OutputFormat::Raw
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Raw => write!(f, "Raw"),
            OutputFormat::Markdown => write!(f, "Markdown"),
        }
    }
}
