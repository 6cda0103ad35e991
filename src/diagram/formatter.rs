//! Output formatting for rendered diagrams

use crate::pipeline::error::PipelineResult;
use crate::types::OutputFormat;
use std::io::Write;

/// Language tag of the fenced block used when embedding
pub const MERMAID_FENCE_TAG: &str = "mermaid";

/// Wraps diagram text for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a formatter for the given output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Create a formatter from the embed flag
    pub fn embedded(embed: bool) -> Self {
        Self::new(OutputFormat::from_embed(embed))
    }

    /// Output format in use
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Produce the final output text, newline-terminated
    pub fn format_diagram(&self, diagram: &str) -> String {
        match self.format {
            OutputFormat::Markdown => format!("```{}\n{}\n```\n", MERMAID_FENCE_TAG, diagram),
            OutputFormat::Raw => format!("{}\n", diagram),
        }
    }

    /// Write the final output text to a writer
    pub fn write_diagram<W: Write>(&self, writer: &mut W, diagram: &str) -> PipelineResult<()> {
        writer.write_all(self.format_diagram(diagram).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
