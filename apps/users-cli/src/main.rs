//! Single-shot command-line client for the users service.
//!
//! Prints exactly one JSON document to stdout: the user on success or
//! `{"error": "..."}` on any failure, with the exit code signalling which.

use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use runtime::ClientConfig;

use users_proto::proto::users::v1 as proto;
use users_proto::proto::users::v1::user_service_client::UserServiceClient;

mod payload;

use payload::{parse_json, EmailPayload, IdPayload, PatchEnvelope, UserEnvelope, UserJson};

/// Users API command-line client
#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Users API command-line client")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user by id: getById '{"id": "<uuid>"}'
    #[command(name = "getById")]
    GetById {
        /// JSON object carrying the id
        json: Option<String>,
    },
    /// Fetch a user by email: getByEmail '{"email": "a@b.com"}'
    #[command(name = "getByEmail")]
    GetByEmail {
        /// JSON object carrying the email
        json: Option<String>,
    },
    /// Register a user: create '{"user": {"email": "...", "name": "...", "last_name": "...", "password": "..."}}'
    Create {
        /// JSON object carrying the user under the "user" key
        json: Option<String>,
    },
    /// Modify the set fields of a user: update '{"user": {"id": "<uuid>", "name": "..."}}'
    Update {
        /// JSON object carrying the patch under the "user" key
        json: Option<String>,
    },
    /// Delete a user by id: delete '{"id": "<uuid>"}'
    Delete {
        /// JSON object carrying the id
        json: Option<String>,
    },
}

/// A validated RPC ready to send.
enum Call {
    GetById(proto::GetUserByIdRequest),
    GetByEmail(proto::GetUserByEmailRequest),
    Create(proto::CreateUserRequest),
    Update(proto::UpdateUserRequest),
    Delete(proto::DeleteUserRequest),
}

/// Turn the parsed subcommand into a request without touching the network.
fn plan(command: Commands) -> Result<Call> {
    match command {
        Commands::GetById { json } => {
            let raw = json.ok_or_else(|| anyhow!("missing id param"))?;
            let data: IdPayload = parse_json(&raw)?;
            Ok(Call::GetById(proto::GetUserByIdRequest { id: data.id }))
        }
        Commands::GetByEmail { json } => {
            let raw = json.ok_or_else(|| anyhow!("missing email param"))?;
            let data: EmailPayload = parse_json(&raw)?;
            Ok(Call::GetByEmail(proto::GetUserByEmailRequest {
                email: data.email,
            }))
        }
        Commands::Create { json } => {
            let raw = json.ok_or_else(|| anyhow!("missing user param"))?;
            let data: UserEnvelope = parse_json(&raw)?;
            Ok(Call::Create(proto::CreateUserRequest {
                data: Some(data.user.into()),
            }))
        }
        Commands::Update { json } => {
            let raw = json.ok_or_else(|| anyhow!("missing user param"))?;
            let data: PatchEnvelope = parse_json(&raw)?;
            Ok(Call::Update(data.user.into()))
        }
        Commands::Delete { json } => {
            let raw = json.ok_or_else(|| anyhow!("missing id param"))?;
            let data: IdPayload = parse_json(&raw)?;
            Ok(Call::Delete(proto::DeleteUserRequest { user_id: data.id }))
        }
    }
}

fn rpc_error(status: tonic::Status) -> anyhow::Error {
    anyhow!("{}", status.message())
}

/// Render the uniform data-or-error response pair.
fn render_user(data: Option<proto::User>, error: Option<proto::Error>) -> Result<String> {
    if let Some(error) = error {
        bail!("{}", error.message);
    }
    let user = data.ok_or_else(|| anyhow!("empty response"))?;
    serde_json::to_string(&UserJson::from(user)).context("cant marshal data")
}

async fn execute(command: Commands) -> Result<String> {
    let config = ClientConfig::from_env()?;

    // Validate local input before dialing.
    let call = plan(command)?;

    let endpoint = config.endpoint();
    let mut client = UserServiceClient::connect(endpoint.clone())
        .await
        .with_context(|| format!("failed to connect to {endpoint}"))?;

    let (data, error) = match call {
        Call::GetById(req) => {
            let res = client.get_by_id(req).await.map_err(rpc_error)?.into_inner();
            (res.data, res.error)
        }
        Call::GetByEmail(req) => {
            let res = client
                .get_by_email(req)
                .await
                .map_err(rpc_error)?
                .into_inner();
            (res.data, res.error)
        }
        Call::Create(req) => {
            let res = client.create(req).await.map_err(rpc_error)?.into_inner();
            (res.data, res.error)
        }
        Call::Update(req) => {
            let res = client.update(req).await.map_err(rpc_error)?.into_inner();
            (res.data, res.error)
        }
        Call::Delete(req) => {
            let res = client.delete(req).await.map_err(rpc_error)?.into_inner();
            (res.data, res.error)
        }
    };

    render_user(data, error)
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn on_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        // Bare invocation: show usage, fail.
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            ExitCode::FAILURE
        }
        ErrorKind::InvalidSubcommand => {
            println!("{}", error_json("invalid command"));
            ExitCode::FAILURE
        }
        _ => {
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or("invalid arguments");
            let line = line.strip_prefix("error: ").unwrap_or(line);
            println!("{}", error_json(line));
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return on_parse_error(err),
    };

    match execute(cli.command).await {
        Ok(body) => {
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", error_json(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}
