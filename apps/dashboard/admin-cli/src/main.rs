//! Dashboard Admin
//!
//! Command-line access to the dashboard's user registry and assignment
//! rules. Users live in the store selected by `STORE_BACKEND`; with the
//! default in-memory store nothing outlives the process.

use clap::{Parser, Subcommand};
use core_config::FromEnv;
use core_config::store::StoreBackend;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_intake::Requester;
use domain_users::{CreateUser, InMemoryUserStore, RedisUserStore, Role, UserStore};
use eyre::Result;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

mod admin;
mod config;

use admin::Admin;
use config::Config;

#[derive(Parser)]
#[command(name = "dashboard-admin")]
#[command(about = "Manage dashboard users and inspect assignment rules")]
struct Cli {
    /// Role to act as (admin, manager, user)
    #[arg(long, global = true, default_value = "admin")]
    as_role: Role,

    /// Id to act as; recorded as the creator of new users
    #[arg(long, global = true)]
    as_id: Option<Uuid>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all users (admin only)
    Users,

    /// Create a user (admin only)
    CreateUser {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        password: String,
    },

    /// Check whether a username/email pair is still free
    Check {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
    },

    /// Users the acting role may assign tasks to
    Assignees,

    /// Users who may manage a project
    Managers,

    /// Badge for a status value, or for a role with --role
    Badge {
        value: Option<String>,

        /// Classify the value as a role instead of a status
        #[arg(long)]
        role: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let cli = Cli::parse();
    let requester = Requester::new(cli.as_id.unwrap_or_else(Uuid::nil), cli.as_role);

    // Badges need no store
    if let Commands::Badge { value, role } = cli.command {
        return print_badge(value, role);
    }

    info!(backend = %config.store.backend, key = %config.store.users_key, "Opening user store");
    match config.store.backend {
        StoreBackend::Memory => {
            let store = InMemoryUserStore::with_key(config.store.users_key.clone());
            run(Admin::new(store, requester), cli.command).await
        }
        StoreBackend::Redis => {
            let store =
                RedisUserStore::connect(&config.store.redis_url, config.store.users_key.clone())
                    .await?;
            run(Admin::new(store, requester), cli.command).await
        }
    }
}

async fn run<S: UserStore>(admin: Admin<S>, command: Commands) -> Result<()> {
    match command {
        Commands::Users => print_json(&admin.users().await?),
        Commands::CreateUser {
            first_name,
            last_name,
            username,
            email,
            role,
            password,
        } => {
            let input = CreateUser {
                first_name,
                last_name,
                username,
                email,
                role: Some(role),
                password,
            };
            print_json(&admin.create_user(input).await?)
        }
        Commands::Check { username, email } => print_json(&admin.check(&username, &email).await?),
        Commands::Assignees => print_json(&admin.assignees().await?),
        Commands::Managers => print_json(&admin.managers().await?),
        Commands::Badge { value, role } => print_badge(value, role),
    }
}

fn print_badge(value: Option<String>, role: bool) -> Result<()> {
    let report = if role {
        admin::role_badge(value)
    } else {
        admin::status_badge(value)
    };
    print_json(&report)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
