use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use moneyguard_core::format_hryvnia;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Create a local account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// Sign in as the demo user
    Login {
        #[arg(long)]
        email: String,
    },

    /// Sign out; cached transactions are kept
    Logout,

    /// Show the current user (server first, saved profile when offline)
    Whoami,

    /// Change the display name
    Rename {
        #[arg(long)]
        name: String,
    },

    /// Upload a new avatar image
    Avatar {
        #[arg(long)]
        file: PathBuf,
    },

    /// Ask the server to send a password reset email
    ResetEmail {
        #[arg(long)]
        email: String,
    },

    /// Set a new password
    ChangePassword {
        #[arg(long)]
        password: String,
    },
}

pub async fn run(app: &App, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Register { name, email } => {
            let auth = app.session.register(&name, &email)?;
            println!("Registration successful! Welcome aboard, {}.", auth.user.name);
        }
        AuthCommand::Login { email } => {
            let auth = app.session.login(&email)?;
            println!("Login successful! Welcome back, {}.", auth.user.name);
        }
        AuthCommand::Logout => {
            let ctx = app.session.saved_context()?;
            app.session.logout(&ctx).await?;
            println!("Logout successful! We'll be waiting for you!");
        }
        AuthCommand::Whoami => {
            let user = app.session.refresh_user().await?;
            println!("{} <{}>", user.name, user.email);
            println!("Balance: {}", format_hryvnia(user.balance));
        }
        AuthCommand::Rename { name } => {
            let ctx = app.session.saved_context()?;
            if ctx.token().is_none() {
                bail!("not signed in (run: moneyguard auth login --email <email>)");
            }
            let user = app.session.edit_user_name(&ctx, &name).await?;
            println!("Name changed to {}", user.name);
        }
        AuthCommand::Avatar { file } => {
            let ctx = app.session.saved_context()?;
            if ctx.token().is_none() {
                bail!("not signed in (run: moneyguard auth login --email <email>)");
            }
            let bytes = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "avatar".to_string());
            let url = app.session.edit_user_avatar(&ctx, &file_name, bytes).await?;
            println!("Avatar updated: {url}");
        }
        AuthCommand::ResetEmail { email } => {
            app.session.send_reset_email(&email).await?;
            println!("Reset Email password was sent successfully");
        }
        AuthCommand::ChangePassword { password } => {
            let ctx = app.session.saved_context()?;
            app.session.change_password(&ctx, &password).await?;
            println!("Password was changed successfully");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneyguard_client::MockWalletApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_rename_requires_session() {
        let app = App::in_memory(Arc::new(MockWalletApi::new()));
        let err = run(&app, AuthCommand::Rename { name: "X".into() }).await.unwrap_err();
        assert!(err.to_string().contains("not signed in"));
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let app = App::in_memory(Arc::new(MockWalletApi::offline()));
        run(&app, AuthCommand::Login { email: "me@example.com".into() }).await.unwrap();
        assert!(app.session.saved_context().unwrap().token().is_some());

        run(&app, AuthCommand::Logout).await.unwrap();
        assert!(app.session.saved_context().unwrap().token().is_none());
    }

    #[tokio::test]
    async fn test_avatar_upload_updates_profile() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("me.png");
        std::fs::write(&file, b"\x89PNG").unwrap();

        let app = App::in_memory(Arc::new(MockWalletApi::new()));
        run(&app, AuthCommand::Login { email: "me@example.com".into() }).await.unwrap();
        run(&app, AuthCommand::Avatar { file }).await.unwrap();

        let saved = app.session.saved_profile().unwrap().unwrap();
        assert_eq!(saved.avatar_url.as_deref(), Some("https://avatars.example/me.png"));
    }

    #[tokio::test]
    async fn test_avatar_missing_file() {
        let app = App::in_memory(Arc::new(MockWalletApi::new()));
        run(&app, AuthCommand::Login { email: "me@example.com".into() }).await.unwrap();
        let err = run(&app, AuthCommand::Avatar { file: PathBuf::from("/no/such/avatar.png") })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read /no/such/avatar.png"));
    }
}
