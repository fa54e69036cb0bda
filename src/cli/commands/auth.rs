//! Account commands - register, login, logout

use crate::cli::output::{colors, print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::auth;
use crate::core::services::Services;
use crate::core::types::{Credentials, RegisterForm};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for register
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    pub username: String,

    /// Password
    #[arg(long, env = "CUSTLOOKUP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password again; must match
    #[arg(long)]
    pub confirm_password: String,
}

/// Arguments for login
#[derive(Args, Debug)]
pub struct LoginArgs {
    pub username: String,

    /// Password
    #[arg(long, env = "CUSTLOOKUP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for logout
#[derive(Args, Debug)]
pub struct LogoutArgs {}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub message: String,
    pub backend: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub redirect: String,
}

/// Execute register command
pub async fn execute_register(
    args: RegisterArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let form = RegisterForm {
        username: args.username,
        password: args.password,
        confirm_password: args.confirm_password,
    };

    let backend = auth::register(services.api.as_ref(), &form)
        .await
        .map_err(|e| e.user_message(crate::core::api::REGISTER_FAILED))?;

    let response = RegisterResponse {
        username: form.username,
        message: auth::REGISTER_SUCCESS.to_string(),
        backend,
    };

    match format {
        OutputFormat::Human => {
            print_success(&response.message);
            println!(
                "Next: {}",
                colors::label(&format!("custlookup login {}", response.username))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute login command
pub async fn execute_login(
    args: LoginArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials {
        username: args.username,
        password: args.password,
    };

    auth::login(services.api.as_ref(), &services.session, &credentials)
        .await
        .map_err(|e| e.user_message(crate::core::api::LOGIN_FAILED))?;

    let response = LoginResponse {
        username: credentials.username,
        authenticated: services.session.get().is_some(),
    };

    match format {
        OutputFormat::Human => {
            if response.authenticated {
                print_success(&format!("Logged in as {}", response.username));
            } else {
                print_warning("Login succeeded but the backend returned no token");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute logout command
pub fn execute_logout(
    _args: LogoutArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let route = auth::logout(&services.session)?;
    let response = LogoutResponse {
        redirect: route.path().to_string(),
    };

    match format {
        OutputFormat::Human => {
            print_success("Logged out");
            println!("Redirecting to {}", colors::route(&response.redirect));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
