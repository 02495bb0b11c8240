//! Create-superuser command

use clap::Args;
use tracing::{info, warn};

use crate::config::StorageBackend;
use crate::domain::user::CreateUserFields;
use crate::infrastructure::user::UserManager;

/// Arguments for the create-superuser command
///
/// Email and password are optional here so that a missing one is reported
/// by the user manager with the argument names.
#[derive(Args, Clone, Default)]
pub struct CreateSuperuserArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,
}

impl CreateSuperuserArgs {
    fn into_fields(self) -> CreateUserFields {
        CreateUserFields {
            email: self.email.map(Into::into),
            password: self.password.map(Into::into),
            first_name: self.first_name,
            last_name: self.last_name,
            ..Default::default()
        }
    }
}

pub async fn run(args: CreateSuperuserArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.storage.backend == StorageBackend::Memory {
        warn!("Storage backend is in-memory; the account is discarded on exit");
    }

    let state = crate::create_app_state_with_config(&config).await?;

    create(&state.user_manager, args).await?;

    Ok(())
}

async fn create(manager: &UserManager, args: CreateSuperuserArgs) -> anyhow::Result<()> {
    let user = manager.create_superuser(args.into_fields()).await?;

    info!(user_id = %user.id(), "Superuser created");
    println!("Superuser {} created", user);

    Ok(())
}
