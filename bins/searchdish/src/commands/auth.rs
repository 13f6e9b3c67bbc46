//! login, logout, whoami, register

use crate::app::{App, check};
use crate::render::{print_json, print_user};
use anyhow::Result;
use clap::Args;
use console::Term;
use searchdish_api_client::models::{LoginRequest, RegisterDto, Role};
use searchdish_cli::output::Status;
use searchdish_cli::progress::while_loading;
use searchdish_core::validation::Validate;
use searchdish_core::{Error as CoreError, ErrorCode};

#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password (at least 6 characters)
    #[arg(long, env = "SEARCHDISH_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Account type: customer or restaurateur
    #[arg(long, default_value_t = Role::Customer)]
    pub role: Role,
}

/// Command to run next, per role
fn next_step(role: Role) -> &'static str {
    match role {
        Role::Admin => "searchdish restaurants pending",
        Role::Restaurateur => "searchdish menu show <restaurant-id>",
        Role::Customer => "searchdish explore --city <city>",
    }
}

pub async fn login(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => Term::stderr()
            .read_secure_line()
            .map_err(|e| CoreError::new(ErrorCode::InvalidInput, format!("Could not read password: {e}")))?,
    };

    check(LoginRequest::new(email, password.as_str()).validate(), app.format)?;

    let user = while_loading("Logging in...", app.interactive(), app.session.login(email, &password)).await?;

    if app.is_json() {
        print_json(&user);
        return Ok(());
    }

    Status::success(&format!("Logged in as {}", user.display_name()));
    print_user(&user);
    println!();
    Status::info(&format!("Next: {}", next_step(user.role)));
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout()?;
    if app.is_json() {
        print_json(&serde_json::json!({ "loggedOut": true }));
    } else {
        Status::success("Logged out");
    }
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let user = while_loading("Restoring session...", app.interactive(), app.require_user()).await?;

    if app.is_json() {
        print_json(&user);
    } else {
        Status::header(&format!("{} ({})", user.display_name(), user.role.home_view()));
        print_user(&user);
    }
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    if args.role == Role::Admin {
        return Err(CoreError::new(ErrorCode::InvalidInput, "Admin accounts cannot self-register")
            .with_suggestion("Use --role customer or --role restaurateur")
            .into());
    }

    let dto = RegisterDto {
        email: args.email,
        password: args.password,
        name: args.name,
        role: args.role,
    };
    check(dto.validate(), app.format)?;

    let user = while_loading(
        "Creating account...",
        app.interactive(),
        app.client().users().register(&dto),
    )
    .await?;

    if app.is_json() {
        print_json(&user);
    } else {
        Status::success(&format!("Account created for {}", dto.email));
        Status::info(&format!("Next: searchdish login {}", dto.email));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_per_role() {
        assert!(next_step(Role::Admin).contains("pending"));
        assert!(next_step(Role::Restaurateur).contains("menu"));
        assert!(next_step(Role::Customer).contains("explore"));
    }
}
