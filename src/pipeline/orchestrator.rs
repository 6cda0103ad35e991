//! Pipeline orchestrator
//!
//! This module contains the DiagramPipeline, which drives a run from fragment
//! paths to formatted diagram output: load, merge, index, render, format.

use crate::diagram::{ActionIndex, DiagramRenderer, OutputFormatter};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::statistics::PipelineStatistics;
use crate::policy::{FragmentLoader, PolicyDocument, PolicyMerger};
use crate::types::DiagramConfig;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::{debug, info, instrument};

/// A merged policy document together with its derived action index
#[derive(Debug, Clone)]
pub struct PreparedPolicy {
    /// Merged policy document
    pub document: PolicyDocument,
    /// Action index derived from the document's bindings
    pub index: ActionIndex,
    /// Counts gathered while preparing
    pub statistics: PipelineStatistics,
}

/// Drives one diagram run
#[derive(Debug, Clone)]
pub struct DiagramPipeline {
    config: DiagramConfig,
    loader: FragmentLoader,
    merger: PolicyMerger,
}

impl DiagramPipeline {
    /// Create a pipeline for a validated configuration
    pub fn new(config: DiagramConfig) -> PipelineResult<Self> {
        config
            .validate()
            .map_err(|e| PipelineError::configuration_error(e.to_string()))?;

        Ok(Self {
            config,
            loader: FragmentLoader::new(),
            merger: PolicyMerger::new(),
        })
    }

    /// Configuration of this pipeline
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Load and merge all fragments, then build the action index
    #[instrument(skip(self), fields(fragments = self.config.files.len()))]
    pub fn prepare(&self) -> PipelineResult<PreparedPolicy> {
        let fragments = self.loader.load_all(&self.config.files)?;
        let fragment_count = fragments.len();

        let document = self.merger.merge(fragments);
        let index = ActionIndex::build(&document.action_bindings);
        let statistics = PipelineStatistics::collect(fragment_count, &document, &index);

        info!("Prepared policy: {}", statistics);
        Ok(PreparedPolicy {
            document,
            index,
            statistics,
        })
    }

    /// Render the prepared policy as diagram text (without output wrapping)
    pub fn render(&self, prepared: &PreparedPolicy) -> PipelineResult<String> {
        DiagramRenderer::new(&prepared.index)
            .render(&prepared.document.resource_types, &prepared.document.unions)
    }

    /// Run the whole pipeline and return the formatted output text
    pub fn run(&self) -> PipelineResult<String> {
        let prepared = self.prepare()?;
        let diagram = self.render(&prepared)?;
        Ok(self.formatter().format_diagram(&diagram))
    }

    /// Run the whole pipeline and write the output to the configured
    /// destination (a file, or stdout)
    pub fn run_to_destination(&self) -> PipelineResult<PipelineStatistics> {
        let prepared = self.prepare()?;
        let diagram = self.render(&prepared)?;
        let formatter = self.formatter();

        match &self.config.output {
            Some(path) => {
                debug!(path = %path.display(), "Writing diagram to file");
                let mut writer = BufWriter::new(File::create(path)?);
                formatter.write_diagram(&mut writer, &diagram)?;
                info!("Diagram written to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                formatter.write_diagram(&mut handle, &diagram)?;
            }
        }

        Ok(prepared.statistics)
    }

    fn formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.config.output_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::default_policy_document;
    use crate::types::OutputFormat;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{Builder, TempDir};

    fn fragment_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let config = DiagramConfig {
            files: vec![PathBuf::new()],
            ..Default::default()
        };
        let error = DiagramPipeline::new(config).unwrap_err();
        assert_eq!(error.category(), "Configuration");
    }

    #[test]
    fn test_prepare_without_fragments_uses_default() {
        let pipeline = DiagramPipeline::new(DiagramConfig::default()).unwrap();
        let prepared = pipeline.prepare().unwrap();

        assert_eq!(&prepared.document, default_policy_document());
        assert!(prepared.statistics.used_default_policy);
        assert_eq!(
            prepared.statistics.resource_type_count,
            default_policy_document().resource_types.len()
        );
    }

    #[test]
    fn test_run_merges_fragments_in_order() {
        let dir = TempDir::new().unwrap();
        let first = fragment_file(
            &dir,
            "resources.yaml",
            "resource_types:\n  - name: loadbalancer\n    id_prefix: lb\n    relationships:\n      - relation: owner\n        target_type_names: [tenant]\n",
        );
        let second = fragment_file(
            &dir,
            "bindings.yaml",
            "action_bindings:\n  - type_name: loadbalancer\n    action_name: get\n    conditions:\n      - role_binding: {}\n",
        );

        let pipeline = DiagramPipeline::new(DiagramConfig {
            files: vec![first, second],
            ..Default::default()
        })
        .unwrap();

        let output = pipeline.run().unwrap();
        assert_eq!(
            output,
            "erDiagram\n\tloadbalancer {\n\t\tid_prefix lb\n\t\taction get\n\t}\n\tloadbalancer }o--o{ tenant : owner\n"
        );
    }

    #[test]
    fn test_run_fails_on_missing_fragment() {
        let dir = TempDir::new().unwrap();
        let pipeline = DiagramPipeline::new(DiagramConfig {
            files: vec![dir.path().join("missing.yaml")],
            ..Default::default()
        })
        .unwrap();

        let error = pipeline.run().unwrap_err();
        assert!(matches!(error, PipelineError::FragmentOpen { .. }));
    }

    #[test]
    fn test_run_to_file_destination() {
        let dir = TempDir::new().unwrap();
        let output = Builder::new().suffix(".md").tempfile_in(dir.path()).unwrap();

        let pipeline = DiagramPipeline::new(DiagramConfig {
            files: Vec::new(),
            output_format: OutputFormat::Markdown,
            output: Some(output.path().to_path_buf()),
        })
        .unwrap();

        let stats = pipeline.run_to_destination().unwrap();
        assert!(stats.used_default_policy);

        let written = std::fs::read_to_string(output.path()).unwrap();
        assert!(written.starts_with("```mermaid\nerDiagram\n"));
        assert!(written.ends_with("\n```\n"));
    }
}
