//! Command-line interface for pickline
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Building the completion request from arguments
//! - Mode selection (prompt vs subcommands)

pub mod completion;

use clap::{Parser, Subcommand};
use nu_ansi_term::Color;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::request::{
    CandidateSource, CompletionRequest, DefaultSpec, HistoryHandle, InitialInput,
};

/// Interactive picker with restricted completion and transparent fallback
#[derive(Parser, Debug)]
#[command(
    name = "pickline",
    version,
    about = "Pick a value interactively with completion",
    long_about = "Prompts with a restricted, cycling completion UI over a candidate list and
falls back to standard readline completion whenever the request is out of
the restricted engine's reach (or on Ctrl-F/Ctrl-B at the buffer edge)."
)]
pub struct CliArgs {
    /// File with one completion candidate per line
    #[arg(value_name = "CANDIDATES_FILE")]
    pub candidates_file: Option<PathBuf>,

    /// Prompt text
    #[arg(short = 'p', long, value_name = "TEXT", default_value = "pick> ")]
    pub prompt: String,

    /// Pre-typed input
    #[arg(long, value_name = "TEXT")]
    pub initial: Option<String>,

    /// Cursor position inside the pre-typed input (byte index)
    #[arg(long, value_name = "POS", requires = "initial")]
    pub cursor: Option<usize>,

    /// Default value; repeat the flag for an ordered list of defaults
    #[arg(short = 'd', long = "default", value_name = "VALUE")]
    pub defaults: Vec<String>,

    /// Only accept a value from the candidate list
    #[arg(short = 'r', long)]
    pub require_match: bool,

    /// Candidate count limit for the restricted engine (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_candidates: Option<usize>,

    /// History file for this prompt
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Disable history persistence
    #[arg(long)]
    pub no_history: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Quiet mode (no banner)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for pickline
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments.
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already-parsed arguments.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {e}");
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Apply CLI arguments on top of the loaded configuration.
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(max) = args.max_candidates {
            config.adapter.max_candidates = max;
        }
        if let Some(ref file) = args.history_file {
            config.history.file_path = file.clone();
            config.history.persist = true;
        }
        if args.no_history {
            config.history.persist = false;
        }
    }

    /// Parsed arguments.
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Effective log level from verbosity flags and configuration.
    pub fn log_level(&self) -> tracing::Level {
        if self.args.very_verbose {
            tracing::Level::TRACE
        } else if self.args.verbose {
            tracing::Level::DEBUG
        } else {
            self.config.logging.level.to_tracing_level()
        }
    }

    /// Handle subcommands (version, completion, config).
    ///
    /// # Returns
    /// * `Result<bool>` - True when a subcommand ran and the process is done
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                println!("pickline {}", crate::version());
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show }) => {
                if *show {
                    print!("{}", self.config.to_toml()?);
                } else if let Some(path) = Config::default_config_path() {
                    println!("{}", path.display());
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Print the banner unless quiet mode is on.
    pub fn print_banner(&self) {
        if self.args.quiet {
            return;
        }
        eprintln!(
            "{}",
            Color::Cyan.bold().paint(format!("pickline {}", crate::version()))
        );
    }

    /// Build the completion request described by the arguments.
    ///
    /// # Returns
    /// * `Result<CompletionRequest>` - The request, or an I/O error from
    ///   reading the candidates file
    pub fn build_request(&self) -> Result<CompletionRequest> {
        let source = match &self.args.candidates_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                CandidateSource::Listed(
                    content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            }
            None => demo_candidates(),
        };

        let mut request = CompletionRequest::new(self.args.prompt.clone(), source)
            .with_require_match(self.args.require_match)
            .with_default(defaults_spec(&self.args.defaults));

        if let Some(ref text) = self.args.initial {
            let initial = match self.args.cursor {
                Some(cursor) => InitialInput::with_cursor(text.clone(), cursor),
                None => InitialInput::new(text.clone()),
            };
            request = request.with_initial(initial);
        }

        if self.config.history.persist {
            request =
                request.with_history(HistoryHandle::file(self.config.history.file_path.clone()));
        }

        Ok(request)
    }
}

/// Map repeated `--default` flags onto a default spec.
fn defaults_spec(defaults: &[String]) -> DefaultSpec {
    match defaults {
        [] => DefaultSpec::None,
        [single] => DefaultSpec::Single(single.clone()),
        many => DefaultSpec::Ordered(many.to_vec()),
    }
}

/// Built-in candidate list used when no candidates file is given.
fn demo_candidates() -> CandidateSource {
    [
        "red", "orange", "yellow", "green", "cyan", "blue", "violet", "magenta", "white", "black",
    ]
    .iter()
    .copied()
    .collect()
}
