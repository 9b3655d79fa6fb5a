use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use fundex::core::log::init_logging;
use fundex::core::{ExportEncoding, ExportFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Fund dataset to load, overriding the configured path
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FilterOpts {
    /// Fund category, defaults to the first one
    #[arg(long)]
    category: Option<String>,

    /// Asset management company, defaults to the first one in the category
    #[arg(long)]
    amc: Option<String>,
}

impl From<FilterOpts> for fundex::FilterArgs {
    fn from(opts: FilterOpts) -> fundex::FilterArgs {
        fundex::FilterArgs {
            category: opts.category,
            amc: opts.amc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> ExportFormat {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Utf8,
    Ascii,
}

impl From<EncodingArg> for ExportEncoding {
    fn from(arg: EncodingArg) -> ExportEncoding {
        match arg {
            EncodingArg::Utf8 => ExportEncoding::Utf8,
            EncodingArg::Ascii => ExportEncoding::Ascii,
        }
    }
}

impl From<Commands> for fundex::AppCommand {
    fn from(cmd: Commands) -> fundex::AppCommand {
        match cmd {
            Commands::Categories => fundex::AppCommand::Categories,
            Commands::Amcs { category } => fundex::AppCommand::Amcs { category },
            Commands::Show { filter, top } => fundex::AppCommand::Show {
                filter: filter.into(),
                top,
            },
            Commands::Export {
                filter,
                output,
                format,
                encoding,
            } => fundex::AppCommand::Export {
                filter: filter.into(),
                output,
                format: format.map(Into::into),
                encoding: encoding.map(Into::into),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List fund categories
    Categories,
    /// List the AMCs offering funds in a category
    Amcs {
        category: String,
    },
    /// Chart and tabulate funds ranked by 1-year return
    Show {
        #[command(flatten)]
        filter: FilterOpts,

        /// Number of funds drawn in the chart
        #[arg(long)]
        top: Option<usize>,
    },
    /// Write the ranked funds to a CSV/TSV file
    Export {
        #[command(flatten)]
        filter: FilterOpts,

        /// Directory to write the export into
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        #[arg(long, value_enum)]
        encoding: Option<EncodingArg>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fundex::cli::setup::setup(),
        Some(cmd) => fundex::run_command(
            cmd.into(),
            cli.config_path.as_deref(),
            cli.data.as_deref(),
        ),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
