//! Policy fragment loading
//!
//! This module opens policy fragment files and decodes them into
//! PolicyDocuments. Fragments are read one at a time and each file handle is
//! released before the next fragment is opened.

use super::document::PolicyDocument;
use crate::pipeline::error::{DecodeError, PipelineError, PipelineResult};
use crate::types::FragmentFormat;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, instrument};

/// Loads policy fragments from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentLoader;

impl FragmentLoader {
    /// Create a new fragment loader
    pub fn new() -> Self {
        Self
    }

    /// Load every fragment in order, stopping at the first failure.
    ///
    /// Fragments decoded before the failure are discarded along with the
    /// error; no partial result is returned.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> PipelineResult<Vec<PolicyDocument>> {
        let mut fragments = Vec::with_capacity(paths.len());
        for path in paths {
            fragments.push(self.load(path)?);
        }
        Ok(fragments)
    }

    /// Open and decode a single fragment
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> PipelineResult<PolicyDocument> {
        let path = path.as_ref();
        let format = FragmentFormat::from_path(path);

        let file = File::open(path).map_err(|e| PipelineError::fragment_open(path, e))?;
        let document = Self::decode(BufReader::new(file), format)
            .map_err(|e| PipelineError::fragment_decode(path, e))?;

        debug!(
            %format,
            resource_types = document.resource_types.len(),
            unions = document.unions.len(),
            action_bindings = document.action_bindings.len(),
            "Decoded policy fragment"
        );
        Ok(document)
    }

    /// Decode a fragment from a reader in the given format
    pub fn decode<R: Read>(
        reader: R,
        format: FragmentFormat,
    ) -> Result<PolicyDocument, DecodeError> {
        let document = match format {
            FragmentFormat::Yaml => serde_yaml::from_reader(reader)?,
            FragmentFormat::Json => serde_json::from_reader(reader)?,
        };
        Ok(document)
    }
}
