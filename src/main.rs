use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use librarycloud_search::config::{
    find_config_file, get_config, load_config, user_config_path, Config,
};
use librarycloud_search::flow::{SearchError, SearchFlow};
use librarycloud_search::models::ResultSet;
use librarycloud_search::render::{FileContainer, ResultSink, WriterContainer};
use librarycloud_search::sources::LibraryCloudSource;
use librarycloud_search::ui::{self, Spinner, TerminalNotifier};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LibraryCloud Search - query the Harvard LibraryCloud item API and render the results
#[derive(Parser, Debug)]
#[command(name = "librarycloud-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the Harvard LibraryCloud catalog and render results as HTML", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Item API endpoint (overrides configuration)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// HTML fragments written to the results container
    Html,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Search term, sent as-is
        query: String,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Html)]
        output: OutputFormat,

        /// File whose content is replaced with the rendered results (default: stdout)
        #[arg(long)]
        out_file: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write the default configuration to a file
    Init {
        /// Destination (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("LibraryCloud Search - Environment Variables");
    println!();
    println!("Search Settings:");
    println!("  LIBRARYCLOUD_SEARCH_SEARCH__ENDPOINT      Item API endpoint (default: http://api.lib.harvard.edu/v2/items.dc.json)");
    println!("  LIBRARYCLOUD_SEARCH_SEARCH__QUERY_PARAM   Query parameter name (default: q)");
    println!("  LIBRARYCLOUD_SEARCH_SEARCH__TIMEOUT_SECS  Request timeout in seconds (default: none)");
    println!("  LIBRARYCLOUD_SEARCH_SEARCH__USER_AGENT    Custom User-Agent header");
    println!();
    println!("Output Settings:");
    println!("  LIBRARYCLOUD_SEARCH_OUTPUT__CONTAINER     File replaced with rendered results (default: stdout)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export LIBRARYCLOUD_SEARCH_OUTPUT__CONTAINER=\"./results.html\"");
    std::process::exit(0);
}

fn init_tracing(cli: &Cli, config_level: &str) {
    let log_level = match cli.verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    // Logs go to stderr so rendered HTML on stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("librarycloud_search={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        load_config(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        get_config()?
    };

    if let Some(endpoint) = &cli.endpoint {
        config.search.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.search.timeout_secs = Some(timeout);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    let config = resolve_config(&cli)?;
    init_tracing(&cli, &config.logging.level);

    match cli.command {
        Some(Commands::Search {
            query,
            output,
            out_file,
        }) => {
            let source = LibraryCloudSource::from_config(&config.search)?;

            let spinner = if cli.quiet || !ui::is_terminal() || query.is_empty() {
                Spinner::hidden()
            } else {
                Spinner::new(&format!("Searching LibraryCloud for \"{}\"", query))
            };
            let flow = SearchFlow::new(
                Arc::new(source),
                Arc::new(TerminalNotifier::with_spinner(&spinner)),
            );

            let started = Instant::now();
            let result = match output {
                OutputFormat::Html => {
                    let mut sink: Box<dyn ResultSink> =
                        match out_file.or_else(|| config.output.container.clone()) {
                            Some(path) => Box::new(FileContainer::new(path)),
                            None => Box::new(WriterContainer::stdout()),
                        };
                    flow.run(query.as_str(), sink.as_mut()).await
                }
                OutputFormat::Table | OutputFormat::Json => flow.fetch(query.as_str()).await,
            };
            spinner.finish();

            match result {
                Ok(outcome) => {
                    if !cli.quiet {
                        ui::print_search_header(
                            outcome.query.as_str(),
                            outcome.results.len(),
                            started.elapsed(),
                        );
                    }
                    output_results(&outcome.results, output)?;
                }
                Err(err) => {
                    tracing::debug!("Search ended without results: {}", err);
                    let code = match err {
                        SearchError::EmptyQuery => 2,
                        _ => 1,
                    };
                    std::process::exit(code);
                }
            }
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { path, force } => {
                let path = path
                    .or_else(user_config_path)
                    .context("Could not determine a configuration directory")?;
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                Config::default().save(&path)?;
                if !cli.quiet {
                    ui::print_status(
                        ui::Status::Success,
                        &format!("Wrote {}", path.display()),
                    );
                }
            }
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },
        None => {
            println!("LibraryCloud Search v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Use --help for usage information");
            println!();
            println!("Quick start:");
            println!("  search <query>             - Render results as HTML on stdout");
            println!("  search <query> -o table    - Show results as a table");
            println!("  config init                - Write a default configuration file");
        }
    }

    Ok(())
}

/// Print results for the non-HTML formats; HTML has already gone to its container.
fn output_results(results: &ResultSet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Html => {}
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["#", "Title", "Author"]);

            for (index, item) in results.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(index + 1),
                    Cell::new(ui::truncate_with_ellipsis(&item.title, 60))
                        .add_attribute(Attribute::Bold),
                    Cell::new(ui::truncate_with_ellipsis(&item.author, 40)),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
