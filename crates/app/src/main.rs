//! Subtally Operator CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use subtally_app::{
    cancellation::Cancellation,
    database::{self, PoolSettings},
    subscriptions::{
        PgSubscriptionsService, SubscriptionsService, costs::CostQuery, models::UserUuid,
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "subtally-app", about = "Subtally CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Print the total cost of subscriptions active within a date range
    TotalCost(TotalCostArgs),
}

#[derive(Debug, Args)]
struct TotalCostArgs {
    /// First day of the range, `YYYY-MM-DD`
    #[arg(long)]
    from: String,

    /// Last day of the range, `YYYY-MM-DD`
    #[arg(long)]
    to: String,

    #[arg(long)]
    user_id: Option<UserUuid>,

    #[arg(long)]
    service_name: Option<String>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        #[expect(clippy::print_stderr, reason = "CLI error output")]
        {
            eprintln!("{error}");
        }

        #[expect(clippy::exit, reason = "CLI exit status")]
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL must be set or passed with --database-url".to_string())?;

    let pool = database::connect(&database_url, PoolSettings::default())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    match cli.command {
        Commands::Migrate => {
            database::migrate(&pool)
                .await
                .map_err(|error| format!("failed to apply migrations: {error}"))?;

            info!("migrations applied");

            Ok(())
        }
        Commands::TotalCost(args) => total_cost(PgSubscriptionsService::new(pool), args).await,
    }
}

async fn total_cost(service: PgSubscriptionsService, args: TotalCostArgs) -> Result<(), String> {
    let mut query = CostQuery::new(args.from, args.to);
    query.user_id = args.user_id;
    query.service_name = args.service_name;

    let total = service
        .total_cost(&Cancellation::new(), query)
        .await
        .map_err(|error| error.to_string())?;

    #[expect(clippy::print_stdout, reason = "CLI result output")]
    {
        println!("{total}");
    }

    Ok(())
}
