use std::fmt::{self, Display};
use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use itertools::Itertools;
use log::LevelFilter;

use mutpath::alphabets::Alphabet;
use mutpath::costs::{CostKind, CostModel};
use mutpath::io::{clean_sequence, read_sequence, SymbolHandling};
use mutpath::render::DEFAULT_PREVIEW;

use crate::Result;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(super) struct Cli {
    /// Console logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub(super) log_level: LogLevel,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub(super) enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub(super) enum Commands {
    /// Finds the cheapest edit script turning the source sequence into the target sequence
    Align {
        #[command(flatten)]
        input: InputArgs,

        /// Print the cost matrix
        #[arg(long)]
        show_matrix: bool,

        /// Print the decision matrix
        #[arg(long)]
        show_decisions: bool,

        /// Number of rows and columns of the matrices to print, 0 prints everything
        #[arg(long, value_name = "N", default_value_t = DEFAULT_PREVIEW)]
        preview: usize,

        /// Number of edit steps to print, 0 prints everything
        #[arg(long, value_name = "N", default_value_t = DEFAULT_PREVIEW)]
        max_steps: usize,
    },
    /// Repeats the alignment while varying one of the costs
    Sweep {
        #[command(flatten)]
        input: InputArgs,

        /// Cost to vary: ins, del or sub
        #[arg(long, value_name = "COST", default_value = "sub")]
        vary: String,

        /// Comma separated values of the varied cost
        #[arg(long, value_delimiter = ',', default_values_t = [1.0, 2.0, 3.0, 4.0])]
        values: Vec<f64>,

        /// Output file for the results in tsv format
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub(super) struct InputArgs {
    /// Source sequence file in fasta or plain text format, the sequence that is transformed
    #[arg(short, long, value_name = "SOURCE_FILE", required_unless_present = "source_seq")]
    pub(super) source: Option<PathBuf>,

    /// Source sequence given directly
    #[arg(long, value_name = "SEQ", conflicts_with = "source")]
    pub(super) source_seq: Option<String>,

    /// Target sequence file in fasta or plain text format
    #[arg(short, long, value_name = "TARGET_FILE", required_unless_present = "target_seq")]
    pub(super) target: Option<PathBuf>,

    /// Target sequence given directly
    #[arg(long, value_name = "SEQ", conflicts_with = "target")]
    pub(super) target_seq: Option<String>,

    /// Insertion cost
    #[arg(long, default_value_t = 1.0)]
    pub(super) ins: f64,

    /// Deletion cost
    #[arg(long, default_value_t = 1.0)]
    pub(super) del: f64,

    /// Substitution cost
    #[arg(long, default_value_t = 2.0)]
    pub(super) sub: f64,

    /// Alphabet of the sequences: dna or any
    #[arg(long, value_name = "ALPHABET", default_value = "dna")]
    pub(super) alphabet: String,

    /// Reject symbols outside the alphabet instead of dropping them
    #[arg(long)]
    pub(super) strict: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum SequenceInput {
    File(PathBuf),
    Literal(String),
}

impl SequenceInput {
    fn new(file: Option<PathBuf>, literal: Option<String>) -> Result<SequenceInput> {
        match (file, literal) {
            (Some(path), None) => Ok(SequenceInput::File(path)),
            (None, Some(seq)) => Ok(SequenceInput::Literal(seq)),
            _ => bail!("Exactly one of a sequence file or a sequence must be given"),
        }
    }

    pub(super) fn load(&self, alphabet: &Alphabet, handling: SymbolHandling) -> Result<Vec<u8>> {
        match self {
            SequenceInput::File(path) => read_sequence(path, alphabet, handling),
            SequenceInput::Literal(seq) => {
                clean_sequence(seq.as_bytes(), "command line sequence", alphabet, handling)
            }
        }
    }
}

impl Display for SequenceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceInput::File(path) => write!(f, "file {}", path.display()),
            SequenceInput::Literal(seq) => write!(f, "sequence {seq}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Task {
    Align {
        show_matrix: bool,
        show_decisions: bool,
        preview: usize,
        max_steps: usize,
    },
    Sweep {
        vary: CostKind,
        values: Vec<f64>,
        output: Option<PathBuf>,
    },
}

pub(super) struct ConfigBuilder {
    input: InputArgs,
    task: TaskArgs,
}

enum TaskArgs {
    Align {
        show_matrix: bool,
        show_decisions: bool,
        preview: usize,
        max_steps: usize,
    },
    Sweep {
        vary: String,
        values: Vec<f64>,
        output: Option<PathBuf>,
    },
}

impl From<Cli> for ConfigBuilder {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Commands::Align {
                input,
                show_matrix,
                show_decisions,
                preview,
                max_steps,
            } => ConfigBuilder {
                input,
                task: TaskArgs::Align {
                    show_matrix,
                    show_decisions,
                    preview,
                    max_steps,
                },
            },
            Commands::Sweep {
                input,
                vary,
                values,
                output,
            } => ConfigBuilder {
                input,
                task: TaskArgs::Sweep {
                    vary,
                    values,
                    output,
                },
            },
        }
    }
}

impl ConfigBuilder {
    /// Validates the parsed arguments, costs and alphabet names fail with a `ConfigError`.
    pub(super) fn setup(self) -> Result<Config> {
        let input = self.input;
        let costs = CostModel::new(input.ins, input.del, input.sub)?;
        let alphabet = Alphabet::from_name(&input.alphabet)?;
        let handling = if input.strict {
            SymbolHandling::Strict
        } else {
            SymbolHandling::Filter
        };
        let task = match self.task {
            TaskArgs::Align {
                show_matrix,
                show_decisions,
                preview,
                max_steps,
            } => Task::Align {
                show_matrix,
                show_decisions,
                preview,
                max_steps,
            },
            TaskArgs::Sweep {
                vary,
                values,
                output,
            } => Task::Sweep {
                vary: vary.parse()?,
                values,
                output,
            },
        };
        Ok(Config {
            source: SequenceInput::new(input.source, input.source_seq)?,
            target: SequenceInput::new(input.target, input.target_seq)?,
            costs,
            alphabet,
            handling,
            task,
        })
    }
}

#[derive(Debug)]
pub(super) struct Config {
    pub(super) source: SequenceInput,
    pub(super) target: SequenceInput,
    pub(super) costs: CostModel,
    pub(super) alphabet: Alphabet,
    pub(super) handling: SymbolHandling,
    pub(super) task: Task,
}

impl Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  source: {}", self.source)?;
        writeln!(f, "  target: {}", self.target)?;
        writeln!(f, "  costs: {}", self.costs)?;
        writeln!(f, "  alphabet: {}, invalid symbols: {:?}", self.alphabet, self.handling)?;
        match &self.task {
            Task::Align {
                show_matrix,
                show_decisions,
                preview,
                max_steps,
            } => write!(
                f,
                "  task: align, cost matrix: {show_matrix}, decision matrix: {show_decisions}, \
                 preview: {preview}, steps: {max_steps}"
            ),
            Task::Sweep {
                vary,
                values,
                output,
            } => {
                write!(f, "  task: sweep {vary} over {}", values.iter().join(", "))?;
                match output {
                    Some(path) => write!(f, ", output: {}", path.display()),
                    None => Ok(()),
                }
            }
        }
    }
}
