//! Presskit CLI (`psk`)
//!
//! WordPress 데이터베이스를 커맨드라인에서 다루는 Operator 도구입니다.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "psk")]
#[command(author, version, about = "Presskit CLI - WordPress database operator tool", long_about = None)]
struct Cli {
    /// Database URL (overrides PSK_DB_URL)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Inspect posts
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Inspect terms
    Term {
        #[command(subcommand)]
        action: TermAction,
    },

    /// Read or write options
    Option {
        #[command(subcommand)]
        action: OptionAction,
    },
}

#[derive(Subcommand)]
enum SchemaAction {
    /// Install the WordPress tables
    Install,
}

#[derive(Subcommand)]
enum PostAction {
    /// List recent posts
    List {
        #[arg(long, default_value = "20")]
        limit: u64,
    },
    /// Show a post with its comments and terms
    Show { id: i64 },
}

#[derive(Subcommand)]
enum TermAction {
    /// List terms
    List {
        #[arg(long)]
        taxonomy: Option<String>,
    },
    /// Create a term
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        taxonomy: String,
    },
}

#[derive(Subcommand)]
enum OptionAction {
    /// Read an option value
    Get { name: String },
    /// Write an option value
    Set { name: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let db = commands::connect(cli.db.as_deref()).await?;
    let json = matches!(cli.format, OutputFormat::Json);

    match cli.command {
        Commands::Schema { action } => match action {
            SchemaAction::Install => commands::schema::install(&db).await,
        },

        Commands::Post { action } => match action {
            PostAction::List { limit } => commands::post::list(&db, limit, json).await,
            PostAction::Show { id } => commands::post::show(&db, id).await,
        },

        Commands::Term { action } => match action {
            TermAction::List { taxonomy } => {
                commands::term::list(&db, taxonomy.as_deref(), json).await
            }
            TermAction::Create { name, slug, taxonomy } => {
                commands::term::create(&db, &name, &slug, &taxonomy).await
            }
        },

        Commands::Option { action } => match action {
            OptionAction::Get { name } => commands::options::get(&db, &name).await,
            OptionAction::Set { name, value } => commands::options::set(&db, &name, &value).await,
        },
    }
}
