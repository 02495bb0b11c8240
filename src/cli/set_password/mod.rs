//! Set-password command

use clap::Args;
use tracing::info;

use crate::infrastructure::user::UserManager;

/// Arguments for the set-password command
#[derive(Args, Clone)]
pub struct SetPasswordArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

pub async fn run(args: SetPasswordArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state_with_config(&config).await?;

    set_password(&state.user_manager, args).await
}

async fn set_password(manager: &UserManager, args: SetPasswordArgs) -> anyhow::Result<()> {
    let user = manager
        .get_by_email(&args.email)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No user with email '{}'", args.email))?;

    manager.set_password(user.id(), &args.password).await?;

    info!(user_id = %user.id(), "Password changed");
    println!("Password changed for {}", user);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::domain::user::CreateUserFields;

    fn args(email: &str, password: &str) -> SetPasswordArgs {
        SetPasswordArgs {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_set_password_by_email() {
        let state = AppState::in_memory();
        let manager = &state.user_manager;
        manager
            .create_user(CreateUserFields::new("writer@studiofard.com", "Writer#2024"))
            .await
            .unwrap();

        set_password(manager, args("writer@StudioFard.com", "Changed#2025"))
            .await
            .unwrap();

        let user = manager
            .verify_credentials("writer@studiofard.com", "Changed#2025")
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let state = AppState::in_memory();

        let err = set_password(&state.user_manager, args("nobody@studiofard.com", "Changed#2025"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No user with email 'nobody@studiofard.com'");
    }

    #[tokio::test]
    async fn test_weak_password_keeps_the_old_one() {
        let state = AppState::in_memory();
        let manager = &state.user_manager;
        manager
            .create_user(CreateUserFields::new("writer@studiofard.com", "Writer#2024"))
            .await
            .unwrap();

        assert!(set_password(manager, args("writer@studiofard.com", "weak"))
            .await
            .is_err());

        let user = manager
            .verify_credentials("writer@studiofard.com", "Writer#2024")
            .await
            .unwrap();
        assert!(user.is_some());
    }
}
