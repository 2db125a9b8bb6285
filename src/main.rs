//! Command line entry point for workload generation and latency
//! analysis.
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use argh::FromArgs;
use yansi::Paint;

use lpmbench::analyze::{SLOW_GET_THRESHOLD_NS, parse_records, summarize};
use lpmbench::config::GenerateConfig;
use lpmbench::corpus::AddressCorpus;
use lpmbench::render::{PlottersRenderer, Renderer};
use lpmbench::sink::{InstructionSink, LineSink, RotatingSink, StdoutSink};
use lpmbench::workload::{Generator, Policy};

/// Workload generation and latency analysis for an LPM key/value store.
#[derive(Debug, FromArgs)]
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(Debug, FromArgs)]
#[argh(subcommand)]
enum Command {
    Generate(GenerateCommand),
    Analyze(AnalyzeCommand),
}

/// generate an instruction stream from an address corpus
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "generate")]
struct GenerateCommand {
    /// path to the yaml run configuration
    #[argh(option, short = 'c')]
    config: PathBuf,
}

/// summarize an execution log and optionally render its distribution
#[derive(Debug, FromArgs)]
#[argh(subcommand, name = "analyze")]
struct AnalyzeCommand {
    /// path to the JSON execution log
    #[argh(positional)]
    log: PathBuf,

    /// also report the fast/slow GET split
    #[argh(switch)]
    split: bool,

    /// render scatter charts to `<stem>-put.png` and `<stem>-get.png`
    #[argh(option)]
    plot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    match args.command {
        Command::Generate(command) => generate(command),
        Command::Analyze(command) => analyze(command),
    }
}

fn generate(command: GenerateCommand) -> anyhow::Result<()> {
    let config_file = File::open(&command.config).context("failed to open config file")?;
    let config: GenerateConfig =
        serde_yaml::from_reader(config_file).context("failed to parse config YAML")?;
    config.validate().context("invalid run configuration")?;

    let corpus = AddressCorpus::from_file(&config.corpus)
        .with_context(|| format!("failed to load corpus from {}", config.corpus.display()))?;
    let mut generator = Generator::new(corpus, config.name_policy, config.seed);

    let mut sink: Box<dyn InstructionSink> = match (&config.policy, &config.output) {
        (Policy::Rotation { rotate_every, .. }, Some(prefix)) => {
            Box::new(RotatingSink::create(prefix, *rotate_every))
        }
        (Policy::Rotation { .. }, None) => {
            anyhow::bail!("the rotation policy requires an output prefix")
        }
        (_, Some(path)) => Box::new(LineSink::create(path).context("failed to create output file")?),
        (_, None) => Box::new(StdoutSink),
    };

    let report = generator
        .run(&config.policy, sink.as_mut())
        .context("failed to write instructions")?;
    sink.finish().context("failed to flush output")?;

    // the report goes to stderr so that stdout stays a clean instruction stream
    eprintln!(
        "{} {} instructions ({} puts, {} gets)",
        "Generated".bold().green(),
        report.total().bold(),
        report.puts,
        report.gets
    );

    Ok(())
}

fn analyze(command: AnalyzeCommand) -> anyhow::Result<()> {
    let log = File::open(&command.log)
        .with_context(|| format!("failed to open execution log {}", command.log.display()))?;
    let records =
        parse_records(BufReader::new(log)).context("failed to parse execution log")?;
    let summary = summarize(&records).context("failed to summarize execution log")?;

    println!(
        "{} {:.10}",
        "Average PUT:".bold().red(),
        summary.mean_put_secs
    );
    println!(
        "{} {:.10}",
        "Average GET:".bold().blue(),
        summary.mean_get_secs
    );
    if command.split {
        println!(
            "{} {} fast, {} slow (threshold {SLOW_GET_THRESHOLD_NS} ns)",
            "GET split:".bold(),
            summary.fast_gets.green(),
            summary.slow_gets.red()
        );
    }

    if let Some(stem) = command.plot {
        PlottersRenderer::new(stem)
            .render(&records)
            .context("failed to render latency charts")?;
    }

    Ok(())
}
