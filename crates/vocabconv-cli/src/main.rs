use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vocabconv::config::resolve_offset;
use vocabconv::convert::{VocabConverter, VocabConverterOptions};

/// Convert a `tokenizer.json` vocab into a tiktoken rank file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the input `tokenizer.json`.
    pub input: PathBuf,

    /// Path to the output "*.tiktoken" file; replaced if it exists.
    pub output: PathBuf,

    /// Number of leading special-token ranks to drop.
    ///
    /// Defaults to `$VOCABCONV_OFFSET`, then 5.
    pub offset: Option<u64>,

    /// Re-read the output and check it against the input.
    #[arg(long, default_value = "false")]
    pub verify: bool,

    /// Increase logging verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .module("vocabconv")
        .quiet(args.quiet)
        .verbosity(1 + args.verbose as usize)
        .init()
        .context("failed to initialize logging")?;

    log::debug!("{:#?}", args);

    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let offset = resolve_offset(args.offset)?;
    let converter = VocabConverter::new(VocabConverterOptions::new(offset));

    converter
        .convert_path(&args.input, &args.output)
        .with_context(|| format!("failed to convert {:?}", args.input))?;

    if args.verify {
        let count = converter
            .verify_path(&args.input, &args.output)
            .with_context(|| format!("failed to verify {:?}", args.output))?;
        log::info!("verified {count} records");
    }

    Ok(())
}
