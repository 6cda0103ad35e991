//! Configuration structures for the policy diagram tool
//!
//! This module contains the command line arguments, the optional configuration
//! file, and the resolved run configuration with its validation logic.

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "policy-mermaid",
    version,
    about = "Renders authorization policy documents as Mermaid entity-relationship diagrams",
    long_about = "Reads one or more policy document fragments, merges them in the order given, and prints a Mermaid erDiagram of the resource types, unions, and the actions bound to them.

EXAMPLES:
    # Render the built-in default policy
    policy-mermaid

    # Render a policy split across several files
    policy-mermaid policy/resources.yaml policy/bindings.yaml

    # Embed the diagram in a markdown fenced block
    policy-mermaid --markdown policy.yaml > docs/policy.md

    # Use a configuration file
    policy-mermaid --config diagram.json

    # Print the built-in default policy as YAML
    policy-mermaid --print-default-policy

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json), YAML (.yaml, .yml)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Policy document fragments, merged in the order given
    #[arg(
        value_name = "FILE",
        help = "Policy document fragments (YAML, or JSON with a .json extension)",
        long_help = "Policy document fragments, merged in the order given. Files are decoded as YAML unless their extension is .json. When no file is given, the built-in default policy is rendered."
    )]
    pub files: Vec<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON or YAML)",
        long_help = "Path to a configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Wrap the diagram in a markdown fenced block
    #[arg(short, long, help = "Wrap the diagram in a ```mermaid fenced block")]
    pub markdown: bool,

    /// Write the diagram to a file instead of stdout
    #[arg(short, long, help = "Write the diagram to a file instead of stdout")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit log lines as JSON
    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, help = "Also write logs to daily files in this directory")]
    pub log_dir: Option<String>,

    /// Dry run mode - load and index the policy without rendering
    #[arg(long, help = "Load, merge and index the policy, print a summary, skip rendering")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,

    /// Print the built-in default policy document and exit
    #[arg(long, help = "Print the built-in default policy document as YAML and exit")]
    pub print_default_policy: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Policy document fragments
    pub files: Option<Vec<PathBuf>>,

    /// Output wrapping mode
    pub output_format: Option<OutputFormat>,

    /// Output file path
    pub output: Option<PathBuf>,
}

/// Resolved configuration for one diagram run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    /// Policy document fragments, in merge order
    pub files: Vec<PathBuf>,

    /// Output wrapping mode
    pub output_format: OutputFormat,

    /// Output file path; stdout when absent
    pub output: Option<PathBuf>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration")]
    YamlError(#[from] serde_yaml::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json, .yaml, .yml)")]
    UnsupportedFormat(String),
}

/// Validation errors for the run configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// A fragment path is empty
    #[error("Fragment path at position {0} is empty")]
    EmptyFragmentPath(usize),

    /// The output path is also an input fragment
    #[error("Output path {0} is also listed as a policy fragment")]
    OutputOverwritesFragment(String),
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            output_format: OutputFormat::Raw,
            output: None,
        }
    }
}

impl DiagramConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a file (JSON or YAML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        let config_file: ConfigFile = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some(ext) => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => return Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        };

        Ok(Self::from_config_file(config_file))
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            files: config_file.files.unwrap_or(defaults.files),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            output: config_file.output.or(defaults.output),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        // Fragments given on the command line replace the configured list
        if !args.files.is_empty() {
            config.files = args.files;
        }
        if args.markdown {
            config.output_format = OutputFormat::Markdown;
        }
        if let Some(value) = args.output {
            config.output = Some(value);
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(position) = self
            .files
            .iter()
            .position(|file| file.as_os_str().is_empty())
        {
            return Err(ConfigValidationError::EmptyFragmentPath(position));
        }

        if let Some(output) = &self.output {
            if self.files.iter().any(|file| same_file(file, output)) {
                return Err(ConfigValidationError::OutputOverwritesFragment(
                    output.display().to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether the built-in default policy will be rendered
    pub fn uses_default_policy(&self) -> bool {
        self.files.is_empty()
    }
}

/// Whether two paths name the same file, resolving both when they exist
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
