//! Command-line arguments for the `docpath` binary.

use clap::{Parser, ValueEnum};
use docpath::{Format, Override};
use std::path::PathBuf;

/// Serialization format of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Toml,
    Json,
    Yaml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => Format::Toml,
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}

/// Load a deployment profile, apply overrides, check that no field is still
/// "[REQUIRED]" and print the result.
#[derive(Parser, Debug)]
#[command(name = "docpath")]
#[command(version, about)]
pub struct Cli {
    /// Profile to load (.toml, .json, .yaml or .yml)
    pub profile: PathBuf,

    /// Field override as PATH:VALUE. Repeatable; several may be joined with commas
    #[arg(short = 'k', long = "key", value_name = "PATH:VALUE", value_delimiter = ',')]
    pub overrides: Vec<Override>,

    /// Input format, instead of guessing from the profile extension
    #[arg(short, long, env = "DOCPATH_FORMAT")]
    pub format: Option<FormatArg>,

    /// Output format (defaults to the input format)
    #[arg(short = 't', long, env = "DOCPATH_OUTPUT_FORMAT")]
    pub output_format: Option<FormatArg>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
