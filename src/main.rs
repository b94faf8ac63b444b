use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, anyhow};
use clap::{Parser, ValueEnum};
use eggsml::{OutputMode, ProcessError, WrapOptions, process_document};
use log::debug;
use rayon::prelude::*;

#[derive(Parser)]
#[command(version, about = "Word-wrap EggsML markup for the console")]
struct Cli {
    #[command(flatten)]
    opts: FormatOpts,
    /// EggsML files to render; reads standard input when none are given
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone, Copy)]
struct FormatOpts {
    /// Maximum line width in columns
    #[arg(
        long,
        env = "EGGSML_WIDTH",
        default_value_t = 80,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    width: u16,
    /// Extra indentation for wrapped continuation lines
    #[arg(long = "hanging-indent", default_value_t = 0)]
    hanging_indent: u16,
    /// When to colour the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Print the text without markup instead of wrapping it
    #[arg(long = "plain-text", conflicts_with = "markup")]
    plain_text: bool,
    /// Print canonical EggsML markup instead of wrapping it
    #[arg(long)]
    markup: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl FormatOpts {
    fn wrap_options(self) -> WrapOptions {
        let mode = if self.plain_text {
            OutputMode::PlainText
        } else if self.markup {
            OutputMode::Markup
        } else {
            OutputMode::Wrapped
        };
        WrapOptions {
            width: usize::from(self.width),
            hanging_indent: usize::from(self.hanging_indent),
            mode,
            color: self.color != ColorChoice::Never,
        }
    }
}

/// Entry point for the command-line renderer.
///
/// Files are processed in parallel and printed in the order given. The first
/// file that fails to read or parse aborts the run with a non-zero status.
/// Attach the input's name to a processing failure.
///
/// Markup errors read `source:index: message`, pointing at the character
/// that could not be parsed.
fn locate(source: &str, err: ProcessError) -> anyhow::Error {
    match err {
        ProcessError::Markup(err) => anyhow!("{source}:{}: {}", err.index, err.message),
        err @ ProcessError::Wrap(_) => anyhow::Error::new(err).context(source.to_owned()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.opts.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    let opts = cli.opts.wrap_options();

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        let lines = process_document(&input, &opts).map_err(|err| locate("<stdin>", err))?;
        println!("{}", lines.join("\n"));
        return Ok(());
    }

    debug!("processing {} files", cli.files.len());
    let outputs = cli
        .files
        .par_iter()
        .map(|path| -> anyhow::Result<Vec<String>> {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            process_document(&content, &opts)
                .map_err(|err| locate(&path.display().to_string(), err))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for lines in outputs {
        println!("{}", lines.join("\n"));
    }
    Ok(())
}
