use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::ServerConfig;
use tonic::transport::Server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;
use std::time::Duration;

use users_api::api::grpc::UsersGrpcService;
use users_api::domain::service::UsersService;
use users_api::infra::storage::PgUsersRepository;
use users_proto::proto::users::v1::user_service_server::UserServiceServer;
use users_proto::proto::users::v1::FILE_DESCRIPTOR_SET;

/// Users API - gRPC CRUD service backed by Postgres
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users API - gRPC CRUD service backed by Postgres")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Block until the database accepts queries, then exit
    WaitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    runtime::logging::init(cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(ServerConfig::from_env()?).await,
        Commands::WaitDb => wait_db().await,
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting User service...");
    tracing::info!(
        "Connecting to database: {}",
        runtime::config::redact_dsn(&config.postgres_dsn)
    );

    let pool = db::connect(&config.postgres_dsn).await?;

    let repo = Arc::new(PgUsersRepository::new(pool));
    let service = UsersGrpcService::new(UsersService::new(repo));

    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let addr = config.listen_addr();
    tracing::info!("User service listening on: {}", addr);

    Server::builder()
        .add_service(UserServiceServer::new(service))
        .add_service(reflection)
        .serve(addr)
        .await?;

    Ok(())
}

/// Startup helper for orchestration: polls until Postgres answers.
async fn wait_db() -> Result<()> {
    let dsn = runtime::config::postgres_dsn_from_env()?;
    db::wait_ready(&dsn, Duration::from_secs(3)).await?;
    Ok(())
}
