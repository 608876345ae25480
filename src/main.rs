use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tabella::{ExtractOptions, HeaderRule, RunConfig, run};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "tabella",
    version,
    about = "Extract tables from Word documents and Excel workbooks into CSV files"
)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["input_dir", "input_file"]),
))]
struct Cli {
    /// Input directory, scanned recursively for .docx and .xlsx files.
    #[arg(short = 'i', long = "input-dir")]
    input_dir: Option<PathBuf>,

    /// Single input file.
    #[arg(short = 'f', long = "input-file")]
    input_file: Option<PathBuf>,

    /// Output directory (default: an `out` directory beside the input).
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Name every table by its index, ignoring captions.
    #[arg(short = 'c', long = "no-captions")]
    no_captions: bool,

    /// Also produce CSV files for workbook named ranges.
    #[arg(long = "named-ranges")]
    named_ranges: bool,

    /// Keep table headers in the output files.
    #[arg(short = 'k', long = "keep-header")]
    keep_header: bool,

    /// Keep newlines inside table cells instead of folding them to
    /// spaces.
    #[arg(short = 'n', long = "keep-newlines")]
    keep_newlines: bool,

    /// Header size in rows; -1 tries to detect it.
    #[arg(short = 's', long = "header-size", default_value_t = -1, allow_hyphen_values = true)]
    header_size: i64,
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tabella=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let Some(input) = cli.input_dir.or(cli.input_file) else {
        eprintln!("error: no input specified");
        return ExitCode::from(2);
    };

    let config = RunConfig {
        input,
        output_dir: cli.output_dir,
        use_captions: !cli.no_captions,
        named_ranges: cli.named_ranges,
        extract: ExtractOptions {
            keep_header: cli.keep_header,
            header_rule: HeaderRule::from_sentinel(cli.header_size),
            keep_newlines: cli.keep_newlines,
        },
    };

    match run(&config) {
        Ok(summary) => {
            tracing::info!(
                "done: {} file(s) processed, {} CSV file(s) written",
                summary.files,
                summary.outputs
            );
            ExitCode::SUCCESS
        },
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        },
    }
}
