use crate::learning::SearchConfig;
use anyhow::{Context, Result, bail};
use clap::{Arg, ArgMatches, Command, value_parser};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::io::Write;

/// What the binary was asked to do.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum Mode {
    /// Learn a network from a JSON dataset file.
    Learn {
        data: String,
        /// equal-width bins per column; `None` means the values are state codes
        bins: Option<usize>,
        /// feature to predict from the others after learning
        class_feature: Option<String>,
    },
    /// Sample the student network and learn it back.
    Demo { samples: usize },
}

/// These options define the inputs from the user.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub mode: Mode,
    pub search: SearchConfig,
    pub seed: Option<u64>,
}

pub fn command() -> Command {
    let iterations = Arg::new("iterations")
        .long("iterations")
        .value_name("NUMBER")
        .value_parser(value_parser!(usize))
        .help("Number of hill-climbing steps in the structure search")
        .default_value("500");
    let seed = Arg::new("seed")
        .long("seed")
        .value_name("NUMBER")
        .value_parser(value_parser!(u64))
        .help("Seed for the random number generator (optional)");

    Command::new("BAYESNET")
        .version("0.1")
        .about("Discrete Bayesian networks: sampling, rejection inference and structure learning.")
        .subcommand_required(true)
        .subcommand(
            Command::new("learn")
                .about("Learn structure and CPDs from a JSON dataset")
                .arg(
                    Arg::new("data")
                        .long("data")
                        .value_name("FILE")
                        .help("JSON file with `features` and `rows`")
                        .required(true),
                )
                .arg(
                    Arg::new("bins")
                        .long("bins")
                        .value_name("NUMBER")
                        .value_parser(value_parser!(usize))
                        .help("Discretize every column into this many equal-width bins"),
                )
                .arg(
                    Arg::new("class")
                        .long("class")
                        .value_name("FEATURE")
                        .help("Feature to classify with the learned network (optional)"),
                )
                .arg(iterations.clone())
                .arg(seed.clone()),
        )
        .subcommand(
            Command::new("demo")
                .about("Sample the student network, refit it and learn its structure back")
                .arg(
                    Arg::new("samples")
                        .long("samples")
                        .value_name("NUMBER")
                        .value_parser(value_parser!(usize))
                        .help("Number of samples to draw")
                        .default_value("1000"),
                )
                .arg(iterations)
                .arg(seed),
        )
}

pub fn options_from_matches(matches: &ArgMatches) -> Result<CommandLineOptions> {
    let (name, sub) = matches.subcommand().context("a subcommand is required")?;
    let iterations = sub
        .get_one::<usize>("iterations")
        .copied()
        .unwrap_or(SearchConfig::default().iterations);
    let seed = sub.get_one::<u64>("seed").copied();

    let mode = match name {
        "learn" => Mode::Learn {
            data: sub.get_one::<String>("data").cloned().context("--data is required")?,
            bins: sub.get_one::<usize>("bins").copied(),
            class_feature: sub.get_one::<String>("class").cloned(),
        },
        "demo" => Mode::Demo {
            samples: sub.get_one::<usize>("samples").copied().unwrap_or(1000),
        },
        other => bail!("unknown subcommand '{}'", other),
    };

    Ok(CommandLineOptions {
        mode,
        search: SearchConfig { iterations },
        seed,
    })
}

pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(buf, "{} [{}:{}] {}", record.level(), file, line, record.args())
        })
        .init();
}

/// Sets up logging and parses the process arguments.
pub fn parse_configuration_options() -> Result<CommandLineOptions> {
    init_logging();
    options_from_matches(&command().get_matches())
}
