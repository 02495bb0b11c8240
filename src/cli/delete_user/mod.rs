//! Delete-user command

use clap::Args;
use tracing::info;

use crate::api::AppState;

/// Arguments for the delete-user command
#[derive(Args, Clone)]
pub struct DeleteUserArgs {
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: DeleteUserArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state_with_config(&config).await?;

    delete(&state, args).await
}

/// Authors of blog posts are refused until their posts are gone
async fn delete(state: &AppState, args: DeleteUserArgs) -> anyhow::Result<()> {
    let user = state
        .user_manager
        .get_by_email(&args.email)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No user with email '{}'", args.email))?;

    state.blog_service.delete_author(user.id()).await?;

    info!(user_id = %user.id(), "User deleted");
    println!("User {} deleted", user);

    Ok(())
}
