use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(author, version, about)]
#[command(long_about = "Native presenter for the PANDA Terminal investor deck.\n\n\
    Runs the built-in deck by default, or any deck file in the same YAML format.\n\n\
    Examples:\n  \
    pitchdeck                       Present the built-in deck (fullscreen)\n  \
    pitchdeck --windowed --slide 8  Open in a window on slide 8\n  \
    pitchdeck --deck my-deck.yaml   Present a deck file (reloads on save)\n  \
    pitchdeck charts -o charts      Write every chart as SVG")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Deck file to present instead of the built-in deck
    #[arg(long, global = false)]
    pub deck: Option<PathBuf>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Start with the slide index open
    #[arg(long, global = false)]
    pub index: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the slide index
    Index {
        /// Deck file (defaults to the built-in deck)
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// Load and validate a deck file
    Check {
        /// Deck file to check
        file: PathBuf,
    },

    /// Export slides as PNG images
    Export {
        /// Deck file (defaults to the built-in deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Write every chart in the deck as a standalone SVG file
    Charts {
        /// Deck file (defaults to the built-in deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Output directory for SVG files
        #[arg(short, long, default_value = "charts")]
        output_dir: PathBuf,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.transition, carousel.interval_ms)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Index { deck }) => crate::commands::index::run(deck.as_deref()),
            Some(Commands::Check { file }) => crate::commands::check::run(&file),
            Some(Commands::Export {
                deck,
                output_dir,
                width,
                height,
            }) => crate::commands::export::run(deck, output_dir, width, height),
            Some(Commands::Charts { deck, output_dir }) => {
                crate::commands::charts::run(deck.as_deref(), &output_dir)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("pitchdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = &self.deck {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                crate::app::run(crate::app::LaunchOptions {
                    deck: self.deck,
                    windowed: self.windowed,
                    slide: self.slide,
                    index: self.index,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn present_flags() {
        let cli = Cli::try_parse_from(["pitchdeck", "--windowed", "--slide", "8", "--index"])
            .unwrap();
        assert!(cli.command.is_none());
        assert!(cli.windowed);
        assert_eq!(cli.slide, Some(8));
        assert!(cli.index);
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["pitchdeck", "index", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Index { deck: None })));
    }

    #[test]
    fn export_defaults() {
        let cli = Cli::try_parse_from(["pitchdeck", "export"]).unwrap();
        let Some(Commands::Export {
            output_dir,
            width,
            height,
            ..
        }) = cli.command
        else {
            panic!("expected export");
        };
        assert_eq!(output_dir, PathBuf::from("export"));
        assert_eq!((width, height), (1920, 1080));
    }

    #[test]
    fn present_flags_conflict_with_subcommands() {
        assert!(Cli::try_parse_from(["pitchdeck", "--windowed", "index"]).is_err());
    }
}
