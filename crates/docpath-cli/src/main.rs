mod cli;

use anyhow::{Context, anyhow};
use clap::Parser;
use cli::Cli;
use docpath::{Document, Format, Validate};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docpath=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("docpath: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> anyhow::Result<()> {
    let input_format = match cli.format {
        Some(arg) => Format::from(arg),
        None => Format::from_path(&cli.profile).ok_or_else(|| {
            anyhow!(
                "cannot tell the format of {}; pass --format",
                cli.profile.display()
            )
        })?,
    };

    let file = File::open(&cli.profile)
        .with_context(|| format!("profile {} not found", cli.profile.display()))?;
    let mut document = Document::read_from(&input_format, BufReader::new(file))
        .with_context(|| format!("cannot read profile {}", cli.profile.display()))?;
    tracing::info!(profile = %cli.profile.display(), format = %input_format, "loaded profile");

    for item in &cli.overrides {
        tracing::info!(path = %item.path, "setting override");
        item.apply(&mut document)?;
    }

    if let Err(errors) = document.validate() {
        tracing::warn!(count = errors.len(), "required fields left unset");
        return Err(anyhow::Error::new(errors).context("missing required arguments"));
    }

    let output_format = cli.output_format.map(Format::from).unwrap_or(input_format);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            document.write_to(&output_format, BufWriter::new(file))?;
        }
        None => document.write_to(&output_format, stdout)?,
    }
    Ok(())
}
