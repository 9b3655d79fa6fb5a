pub mod cli;
pub mod core;

use crate::core::config::AppConfig;
use crate::core::{Explorer, ExportEncoding, ExportFormat, FilterChange, FilterState, FundTable};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Category/AMC choice as given on the command line. Missing values fall
/// back to the first valid option.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub category: Option<String>,
    pub amc: Option<String>,
}

pub enum AppCommand {
    Categories,
    Amcs {
        category: String,
    },
    Show {
        filter: FilterArgs,
        top: Option<usize>,
    },
    Export {
        filter: FilterArgs,
        output: Option<PathBuf>,
        format: Option<ExportFormat>,
        encoding: Option<ExportEncoding>,
    },
}

pub fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    data_path: Option<&str>,
) -> Result<()> {
    info!("Fund explorer starting...");

    let config = AppConfig::load(config_path)?;
    debug!("Loaded config: {config:#?}");

    let source = data_path.unwrap_or(&config.data_path);
    let explorer = Explorer::new(source, config.load_options()?);

    let spinner = cli::ui::new_spinner("Loading fund data...");
    let table = explorer.table();
    spinner.finish_and_clear();
    let table = table.with_context(|| {
        format!(
            "Failed to load fund data from {}",
            explorer.dataset().source().display()
        )
    })?;

    match command {
        AppCommand::Categories => cli::list::categories(&explorer),
        AppCommand::Amcs { category } => cli::list::amcs(&explorer, &category),
        AppCommand::Show { filter, top } => {
            let state = resolve_filter(&table, &filter)?;
            cli::show::run(&explorer, &state, top.unwrap_or(config.top_n))
        }
        AppCommand::Export {
            filter,
            output,
            format,
            encoding,
        } => {
            let state = resolve_filter(&table, &filter)?;
            let mut options = config.export_options();
            if let Some(format) = format {
                options.format = format;
            }
            if let Some(encoding) = encoding {
                options.encoding = encoding;
            }
            let directory = output.unwrap_or_else(|| PathBuf::from(&config.export.directory));
            cli::export::run(&explorer, &state, &directory, options).map(|_| ())
        }
    }
}

/// Builds the filter the way a user would pick it: category first, then an
/// AMC from those offered in that category.
pub fn resolve_filter(table: &FundTable, args: &FilterArgs) -> Result<FilterState> {
    let mut state = match &args.category {
        Some(category) => {
            let mut state = FilterState::new();
            state
                .apply(table, FilterChange::Category(category.clone()))
                .with_context(|| format!("Category {category:?} is not in the dataset"))?;
            state
        }
        None => FilterState::with_defaults(table)?,
    };

    if let Some(amc) = &args.amc {
        state
            .apply(table, FilterChange::Amc(amc.clone()))
            .with_context(|| format!("AMC {amc:?} has no funds in the selected category"))?;
    }
    debug!("Resolved filter: {state:?}");
    Ok(state)
}
