//! Vitrine CLI - Database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! vitrine-cli migrate
//!
//! # Create an operator (password read from VITRINE_ADMIN_PASSWORD)
//! vitrine-cli admin create -u amanda -e amanda@exemplo.com.br
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create` - Create operator accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(author, version, about = "Vitrine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Permission to grant (repeatable; defaults to read + write)
        #[arg(short, long = "permission")]
        permissions: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                permissions,
            } => {
                commands::admin::create_user(&username, &email, &permissions).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeatable_permission_flag() {
        let cli = Cli::try_parse_from([
            "vitrine-cli",
            "admin",
            "create",
            "-u",
            "amanda",
            "-e",
            "amanda@exemplo.com.br",
            "-p",
            "read",
            "--permission",
            "write",
        ]);
        let Ok(Cli {
            command:
                Commands::Admin {
                    action: AdminAction::Create { permissions, .. },
                },
        }) = cli
        else {
            panic!("expected admin create");
        };
        assert_eq!(permissions, ["read", "write"]);
    }
}
