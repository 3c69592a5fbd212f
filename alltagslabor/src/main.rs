use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alltagslabor::api::{ApiServer, ApiServerConfig};
use alltagslabor::search::{ExperimentCatalog, SearchFilters};
use alltagslabor_data::{ContentCache, Experiment, HttpSource, RegionTable, SourceConfig};

#[derive(Parser)]
#[command(name = "alltagslabor")]
#[command(about = "Search API over the Alltagslabor experiment collection", long_about = None)]
struct Cli {
    /// Base URL of the content host (overrides ALLTAGSLABOR_DATA_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Timeout for one remote retrieval in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Print raw JSON instead of the text view
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start API server
    Serve {
        /// Host to bind to (overrides ALLTAGSLABOR_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides ALLTAGSLABOR_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List all experiments
    List,

    /// Search experiments
    Search {
        /// Subject (case-insensitive)
        #[arg(short, long)]
        subject: Option<String>,

        /// Grade level (exact)
        #[arg(short, long)]
        grade_level: Option<String>,

        /// School type (case-insensitive)
        #[arg(long)]
        school_type: Option<String>,

        /// Substring of title, short description or step content
        #[arg(short, long)]
        freetext: Option<String>,
    },

    /// Show one experiment by its exact title
    Show {
        /// Experiment title
        title: String,
    },

    /// List available grade levels
    Grades,

    /// Subjects by region
    Subjects,

    /// School types by region
    SchoolTypes,

    /// Print the legal notice
    Impressum,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "alltagslabor=info,alltagslabor_data=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let source_config = source_config(&cli);

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = ApiServerConfig::from_env();
            config.source = source_config;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let server = ApiServer::new(config)?;
            server.start().await?;
        }

        Commands::List => {
            let experiments = open_catalog(source_config)?.list_all().await?;
            print_experiments(&experiments, cli.json)?;
        }

        Commands::Search {
            subject,
            grade_level,
            school_type,
            freetext,
        } => {
            let filters = SearchFilters {
                subject,
                grade_level,
                school_type,
                freetext,
            }
            .normalized();
            let experiments = open_catalog(source_config)?.search(&filters).await?;
            print_experiments(&experiments, cli.json)?;
        }

        Commands::Show { ref title } => {
            let experiment = open_catalog(source_config)?.get_by_title(title).await?;
            if cli.json {
                print_json(&experiment)?;
            } else {
                print_experiment(&experiment);
            }
        }

        Commands::Grades => {
            let grades = open_catalog(source_config)?.grade_levels().await?;
            if cli.json {
                print_json(&grades)?;
            } else {
                for grade in grades {
                    println!("{}", grade);
                }
            }
        }

        Commands::Subjects => {
            let table = open_catalog(source_config)?.subjects().await?;
            print_table(&table, cli.json)?;
        }

        Commands::SchoolTypes => {
            let table = open_catalog(source_config)?.school_types().await?;
            print_table(&table, cli.json)?;
        }

        Commands::Impressum => {
            let impressum = open_catalog(source_config)?.impressum().await?;
            if cli.json {
                print_json(&impressum)?;
            } else {
                println!("{}", impressum.content);
            }
        }
    }

    Ok(())
}

fn source_config(cli: &Cli) -> SourceConfig {
    let mut config = SourceConfig::from_env();
    if let Some(ref base_url) = cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    config
}

fn open_catalog(config: SourceConfig) -> Result<ExperimentCatalog<HttpSource>> {
    let source = HttpSource::new(config)?;
    Ok(ExperimentCatalog::new(Arc::new(ContentCache::with_defaults(source))))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_experiments(experiments: &[Experiment], json: bool) -> Result<()> {
    if json {
        return print_json(&experiments);
    }

    if experiments.is_empty() {
        println!("No experiments found.");
        return Ok(());
    }

    println!("Found {} experiments:", experiments.len());
    for exp in experiments {
        println!(
            "  - {} [{}, grade {}, {}]",
            exp.title, exp.subject, exp.grade_level, exp.school_type
        );
    }
    Ok(())
}

fn print_experiment(exp: &Experiment) {
    println!("{}", exp.title);
    println!("{}", "=".repeat(exp.title.chars().count()));
    println!("{}", exp.short_description);
    println!();
    println!("Subject:     {}", exp.subject);
    println!("Grade level: {}", exp.grade_level);
    println!("School type: {}", exp.school_type);
    println!();

    for (i, step) in exp.steps.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, step.step_type, step.content);
        if !step.description.is_empty() {
            println!("   {}", step.description);
        }
    }
}

fn print_table(table: &RegionTable, json: bool) -> Result<()> {
    if json {
        return print_json(table);
    }

    for region in table.regions() {
        let labels = table.get(region).unwrap_or_default();
        println!("{}: {}", region, labels.join(", "));
    }
    Ok(())
}
