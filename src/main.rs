use clap::Parser;
use studiofard::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Migrate(args) => cli::migrate::run(args).await,
        Command::CreateSuperuser(args) => cli::create_superuser::run(args).await,
        Command::SetPassword(args) => cli::set_password::run(args).await,
        Command::DeleteUser(args) => cli::delete_user::run(args).await,
    }
}
