//! CLI for the Lords of AI catalog

use clap::Parser;
use lords::catalog::{ModelDraft, SearchFilters};
use lords::config::DEFAULT_PAGE_SIZE;
use lords::export::ExportFormat;
use lords::ranking::{SortDirection, SortKey};
use lords_cli::context::{self, Overrides};
use lords_cli::{VoteArg, commands, error::CliError};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lords")]
#[command(author, version, about = "Browse, rank and compare AI models from the Lords of AI catalog", long_about = None)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, env = "LORDS_API_URL", global = true)]
    api_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LORDS_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Config file path (TOML or JSON)
    #[arg(short, long, env = "LORDS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Where the login session is kept
    #[arg(long, env = "LORDS_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct DraftArgs {
    #[arg(long, short = 'n')]
    name: Option<String>,
    #[arg(long, short = 'd')]
    developer: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// ISO date, e.g. 2024-05-13
    #[arg(long)]
    release_date: Option<String>,
    #[arg(long)]
    category_id: Option<i64>,
}

impl From<DraftArgs> for ModelDraft {
    fn from(args: DraftArgs) -> Self {
        ModelDraft {
            name: args.name,
            developer: args.developer,
            description: args.description,
            release_date: args.release_date,
            category_id: args.category_id,
        }
    }
}

#[derive(clap::Subcommand)]
enum MetricCommands {
    /// List a model's characteristics
    List { id: i64 },
    /// Add a characteristic to a model
    Add {
        id: i64,
        /// One of the known characteristic names (e.g. precision, robustez)
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long, short = 'v')]
        value: f64,
        #[arg(long)]
        confidence: Option<f64>,
    },
    /// Remove a characteristic from a model
    Delete { id: i64, metric_id: i64 },
}

#[derive(clap::Subcommand)]
enum AdminCommands {
    /// Create a model
    Create {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Update fields of a model
    Update {
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a model
    Delete { id: i64 },
    /// Manage a model's characteristics
    Metrics {
        #[command(subcommand)]
        command: MetricCommands,
    },
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and keep the session
    Login {
        #[arg(long, short = 'e')]
        email: String,
        #[arg(long, short = 'p', env = "LORDS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long, short = 'u')]
        username: String,
        #[arg(long, short = 'e')]
        email: String,
        #[arg(long, short = 'p', env = "LORDS_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami {
        /// Check the token with the server
        #[arg(long)]
        verify: bool,
    },
    /// List models
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
        /// Fetch every page
        #[arg(long)]
        all: bool,
        /// Keep models whose name or description contains this text
        #[arg(long, short = 'q')]
        query: Option<String>,
    },
    /// Search the catalog on the server
    Search {
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        developer: Option<String>,
        #[arg(long)]
        min_score: Option<f64>,
        #[arg(long)]
        max_score: Option<f64>,
        /// score, vote_score, likes, engagement, release_date or name
        #[arg(long)]
        sort_by: Option<SortKey>,
        /// asc or desc
        #[arg(long)]
        order: Option<SortDirection>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u32,
    },
    /// Show a model with characteristics, benchmarks and versions
    Show { id: i64 },
    /// Rank the whole catalog
    Rank {
        /// score, vote_score, likes, engagement, release_date or name
        #[arg(long, default_value = "score")]
        by: SortKey,
        /// asc or desc (defaults to the key's natural order)
        #[arg(long)]
        order: Option<SortDirection>,
        /// Only show the first N
        #[arg(long)]
        top: Option<usize>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Compare up to three models side by side
    Compare {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Vote a model up or down
    Vote {
        id: i64,
        #[arg(value_enum)]
        value: VoteArg,
    },
    /// Catalog statistics
    Stats,
    /// Export the ranking to a file
    Export {
        /// csv, json or xlsx
        #[arg(long, short = 'f', default_value = "csv")]
        format: ExportFormat,
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        #[arg(long, default_value = "score")]
        by: SortKey,
    },
    /// Read or post comments on a model
    Comments {
        id: i64,
        /// Post this comment first
        #[arg(long)]
        add: Option<String>,
        /// Post as a reply to this comment id
        #[arg(long)]
        reply_to: Option<i64>,
    },
    /// Benchmark results of a model
    Benchmarks {
        id: i64,
        /// History of one benchmark only
        #[arg(long)]
        benchmark: Option<i64>,
    },
    /// Administration (requires an admin account)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Initialize logging
    let level = cli.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = format!("lords={level},lords_cli={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        println!("Lords of AI catalog client");
        println!("Use --help for more information");
        return Ok(());
    };

    let config = context::resolve_config(
        cli.config.as_deref(),
        Overrides {
            api_url: cli.api_url,
            log_level: cli.log_level,
            session_file: cli.session_file,
        },
    )?;
    let app = context::start(config).await?;

    match command {
        Commands::Login { email, password } => commands::login(&app, email, password).await?,
        Commands::Register {
            username,
            email,
            password,
            bio,
        } => commands::register(&app, username, email, password, bio).await?,
        Commands::Logout => commands::logout(&app).await?,
        Commands::Whoami { verify } => commands::whoami(&app, verify).await?,
        Commands::List {
            category,
            page,
            limit,
            all,
            query,
        } => {
            commands::list(
                &app,
                commands::ListArgs {
                    category,
                    page,
                    limit,
                    all,
                    query,
                },
            )
            .await?
        }
        Commands::Search {
            query,
            category,
            developer,
            min_score,
            max_score,
            sort_by,
            order,
            page,
            limit,
        } => {
            commands::search(
                &app,
                SearchFilters {
                    query,
                    category,
                    developer,
                    min_score,
                    max_score,
                    sort_by,
                    sort_order: order,
                    page,
                    limit,
                },
            )
            .await?
        }
        Commands::Show { id } => commands::show(&app, id).await?,
        Commands::Rank {
            by,
            order,
            top,
            category,
        } => commands::rank(&app, by, order, top, category).await?,
        Commands::Compare { ids } => commands::compare(&app, ids).await?,
        Commands::Vote { id, value } => commands::vote(&app, id, value.into()).await?,
        Commands::Stats => commands::stats(&app).await?,
        Commands::Export { format, output, by } => {
            commands::export(&app, format, output, by).await?
        }
        Commands::Comments { id, add, reply_to } => {
            commands::comments(&app, id, add, reply_to).await?
        }
        Commands::Benchmarks { id, benchmark } => commands::benchmarks(&app, id, benchmark).await?,
        Commands::Admin { command } => match command {
            AdminCommands::Create { draft } => commands::admin_create(&app, draft.into()).await?,
            AdminCommands::Update { id, draft } => {
                commands::admin_update(&app, id, draft.into()).await?
            }
            AdminCommands::Delete { id } => commands::admin_delete(&app, id).await?,
            AdminCommands::Metrics { command } => match command {
                MetricCommands::List { id } => commands::admin_metric_list(&app, id).await?,
                MetricCommands::Add {
                    id,
                    name,
                    value,
                    confidence,
                } => commands::admin_metric_add(&app, id, name, value, confidence).await?,
                MetricCommands::Delete { id, metric_id } => {
                    commands::admin_metric_delete(&app, id, metric_id).await?
                }
            },
        },
    }

    Ok(())
}
