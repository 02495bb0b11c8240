//! CLI module for Studio Fard
//!
//! Subcommands:
//! - `serve`: HTTP server
//! - `migrate`: apply or revert PostgreSQL schema migrations
//! - `create-superuser`: create a staff account with every privilege
//! - `set-password`: replace an account's password
//! - `delete-user`: remove an account that authors no posts

pub mod create_superuser;
pub mod delete_user;
pub mod migrate;
pub mod serve;
pub mod set_password;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Studio Fard - accounts and blog service
#[derive(Parser)]
#[command(name = "studiofard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(serve::ServeArgs),

    /// Manage PostgreSQL schema migrations
    Migrate(migrate::MigrateArgs),

    /// Create a superuser account
    CreateSuperuser(create_superuser::CreateSuperuserArgs),

    /// Replace a user's password
    SetPassword(set_password::SetPasswordArgs),

    /// Delete a user that authors no blog posts
    DeleteUser(delete_user::DeleteUserArgs),
}

/// Load `.env`, configuration files and the environment, then start logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["studiofard", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_create_superuser() {
        let cli = Cli::try_parse_from([
            "studiofard",
            "create-superuser",
            "--email",
            "root@studiofard.com",
            "--password",
            "Root#2024",
            "--first-name",
            "Root",
        ])
        .unwrap();

        match cli.command {
            Command::CreateSuperuser(args) => {
                assert_eq!(args.email.as_deref(), Some("root@studiofard.com"));
                assert_eq!(args.first_name.as_deref(), Some("Root"));
                assert!(args.last_name.is_none());
            }
            _ => panic!("expected create-superuser"),
        }
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["studiofard", "migrate", "--revert"]).unwrap();

        match cli.command {
            Command::Migrate(args) => assert!(args.revert),
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_parse_account_commands() {
        let cli = Cli::try_parse_from([
            "studiofard",
            "set-password",
            "--email",
            "a@studiofard.com",
            "--password",
            "New#Pass1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::SetPassword(ref args) if args.password == "New#Pass1"));

        let cli =
            Cli::try_parse_from(["studiofard", "delete-user", "--email", "a@studiofard.com"]).unwrap();
        assert!(matches!(cli.command, Command::DeleteUser(ref args) if args.email == "a@studiofard.com"));

        assert!(Cli::try_parse_from(["studiofard", "delete-user"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["studiofard", "ui"]).is_err());
    }
}
