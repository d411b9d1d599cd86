use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shared::config::Config;
use shared::models::auth::claims::Role;
use shared::repositories::admin_repository::DynamoDbAdminRepository;
use shared::services::auth_service::AuthService;
use shared::services::token_service::TokenService;

/// Provision a CMS admin account.
#[derive(Debug, Parser)]
#[command(name = "create-admin")]
struct Args {
    #[arg(long)]
    email: String,

    /// Read from ADMIN_PASSWORD when omitted, to keep it out of shell history.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value = "admin", value_parser = parse_role)]
    role: Role,
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("unknown role '{s}', expected admin or superadmin"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    let aws = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let client = aws_sdk_dynamodb::Client::new(&aws);
    let repository = Arc::new(DynamoDbAdminRepository::new(client, &config.admins_table));

    // Provisioning never signs tokens.
    let service = AuthService::new(repository, Arc::new(TokenService::new(None)));
    let admin = service
        .create_admin(&args.email, &args.password, args.role)
        .await
        .with_context(|| format!("Failed to create admin {}", args.email))?;

    info!(
        admin_id = %admin.id,
        email = %admin.email,
        role = %admin.role,
        table = %config.admins_table,
        "Admin account created"
    );
    Ok(())
}
