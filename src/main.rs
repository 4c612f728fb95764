use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kitopen::config::{find_config_file, load_config, Config, Language};
use kitopen::utils::{render_json, render_plain, render_table};
use kitopen::{SearchArgs, SearchClient};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// KITOpen - Search the publication database of the KIT library
#[derive(Parser, Debug)]
#[command(name = "kitopen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the publication database of the KIT library", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Response language (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    lang: Option<LangArg>,

    /// Request timeout in seconds (overrides the configuration file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Response language
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LangArg {
    En,
    De,
}

impl From<LangArg> for Language {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::En => Language::En,
            LangArg::De => Language::De,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for publications (needs --author, --institute or --tag)
    #[command(alias = "s")]
    Search {
        /// Author names
        #[arg(long, short)]
        author: Option<String>,

        /// Organisational unit, e.g. IPE
        #[arg(long, short)]
        institute: Option<String>,

        /// Text the title has to contain
        #[arg(long, short)]
        tag: Option<String>,

        /// Publication year
        #[arg(long, short)]
        year: Option<String>,

        /// Publication type, e.g. ZEITSCHRIFTENAUFSATZ
        #[arg(long = "type")]
        kind: Option<String>,

        /// Maximum number of results
        #[arg(long, short, default_value_t = kitopen::models::DEFAULT_LIMIT)]
        limit: u32,

        /// Offset into the result list
        #[arg(long, default_value_t = kitopen::models::DEFAULT_OFFSET)]
        offset: u32,
    },

    /// Print the URL of a publication's detail page
    Url {
        /// KIT publication id
        id: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config file {}", path.display()),
        None => "Failed to load configuration from the environment".to_string(),
    })?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    let json_logs = config.logging.is_json();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("kitopen={}", env_filter)),
        ))
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    apply_overrides(&mut config, &cli);

    match cli.command {
        Commands::Search {
            author,
            institute,
            tag,
            year,
            kind,
            limit,
            offset,
        } => {
            let args = SearchArgs {
                author,
                institute,
                year,
                tag,
                kind,
                limit,
                offset,
            };

            let mut client = SearchClient::with_config(config.search.clone())?;
            if let Some(endpoint) = &config.endpoint {
                client = client.with_endpoint(endpoint.as_str());
            }

            let publications = client.search(&args).await?;
            if !cli.quiet {
                eprintln!("Found {} publications", publications.len());
            }
            output_publications(&publications, cli.output)?;
        }
        Commands::Url { id } => {
            println!("{}", SearchClient::publication_url(&id));
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Command line flags take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(lang) = cli.lang {
        config.search.lang = lang.into();
    }
    if let Some(timeout) = cli.timeout {
        config.search.timeout_seconds = timeout;
    }
}

fn output_publications(
    publications: &[kitopen::Publication],
    format: OutputFormat,
) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();
    let actual_format = match format {
        OutputFormat::Auto if is_tty => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };

    match actual_format {
        OutputFormat::Json => println!("{}", render_json(publications)?),
        OutputFormat::Plain => print!("{}", render_plain(publications, is_tty)),
        OutputFormat::Table => println!("{}", render_table(publications)),
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}
