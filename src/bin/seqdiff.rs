// SPDX-License-Identifier: MIT

use std::fmt::Display;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, ValueEnum};

use diff::{Algorithm, Diff, Wagner};
use seqdiff::*;
use utils::Result;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Granularity {
    Line,
    Char,
}
impl Default for Granularity {
    fn default() -> Self {
        Granularity::Line
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    PlusMinus,
    Merge,
}
impl Default for Format {
    fn default() -> Self {
        Format::PlusMinus
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AlgorithmChoice {
    /// Linear-space divide and conquer, with a table-based hybrid for small
    /// sub-problems
    Hirschberg,
    /// Full dynamic programming table
    Wagner,
}
impl Default for AlgorithmChoice {
    fn default() -> Self {
        AlgorithmChoice::Hirschberg
    }
}

/// Show a minimal set of changes between two files.
///
/// Exits with status 0 if the files are equal, 1 if they differ and 2 on
/// errors.
#[derive(Parser, Debug)]
struct Cli {
    old: PathBuf,
    new: PathBuf,

    /// Unit of comparison
    #[clap(value_enum, long, default_value_t = Default::default())]
    by: Granularity,

    /// Output format
    #[clap(value_enum, short, long, default_value_t = Default::default())]
    format: Format,

    #[clap(value_enum, short, long, default_value_t = Default::default())]
    algorithm: AlgorithmChoice,

    /// Initial length of the Hirschberg score vectors
    #[clap(long)]
    threshold_length: Option<usize>,

    /// Table size below which sub-problems are solved without splitting
    #[clap(long)]
    threshold_size: Option<usize>,

    /// Configuration file to use instead of the default one
    #[clap(long)]
    config: Option<PathBuf>,

    #[clap(flatten)]
    output: cli::Options,
}

fn render<A, T>(
    engine: &mut Diff<A>,
    args: &Cli,
    config: &config::Config,
    a: Rc<[T]>,
    b: Rc<[T]>,
) -> Result<bool>
where
    A: Algorithm,
    T: PartialEq + Display,
{
    let mut cli = cli::Cli::new(args.output.clone());
    let mut writer = diff_color::Writer::new();

    match args.format {
        Format::PlusMinus => {
            let lines = engine.render_plus_minus(a, b, config.prefixes.clone());
            writer.write(cli.stream(), lines)?
        }
        Format::Merge => {
            let lines = engine.render_merge(a, b, config.markers.clone());
            writer.write(cli.stream(), lines)?
        }
    }

    Ok(writer.changes() != 0)
}

fn run<A: Algorithm>(mut engine: Diff<A>, args: &Cli, config: &config::Config) -> Result<bool> {
    let old = utils::read_text(&args.old)?;
    let new = utils::read_text(&args.new)?;

    match args.by {
        Granularity::Line => {
            render(&mut engine, args, config, diff::lines(&old), diff::lines(&new))
        }
        Granularity::Char => {
            render(&mut engine, args, config, diff::chars(&old), diff::chars(&new))
        }
    }
}

fn do_main() -> Result<bool> {
    let args = Cli::parse();

    if std::env::var("RUST_LOG").is_ok() {
        env_logger::builder()
            .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
            .init();
    }

    let mut config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    if let Some(threshold_length) = args.threshold_length {
        config.diff.threshold_length = threshold_length;
    }
    if let Some(threshold_size) = args.threshold_size {
        config.diff.threshold_size = threshold_size;
    }
    log::debug!("{:?}", config);

    match args.algorithm {
        AlgorithmChoice::Hirschberg => run(Diff::from_options(&config.diff), &args, &config),
        AlgorithmChoice::Wagner => run(
            Diff::with_algorithm(Wagner::with_capacity(config.diff.threshold_size)),
            &args,
            &config,
        ),
    }
}

fn main() {
    match do_main() {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    }
}
