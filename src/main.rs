mod api;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod loaders;
mod logging;
mod session;
mod ui;

use crate::api::types::Credentials;
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::ROLES;
use crate::environment::Environment;
use crate::loaders::LoaderKind;
use crate::session::{run_headless_loader, run_headless_login, run_tui_mode, setup_session};
use crate::ui::UIConfig;
use crate::ui::navigation::Page;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal client for the school administration dashboard
struct Args {
    /// Backend environment: "local" or a base URL such as https://school.example
    #[arg(long, global = true, env = "SCHOOL_ADMIN_ENVIRONMENT")]
    environment: Option<String>,

    /// Backend base URL; takes precedence over --environment
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct LoginArgs {
    /// Account email; defaults to the last one used
    #[arg(long)]
    email: Option<String>,

    /// Account role; defaults to the last one used
    #[arg(long, value_parser = PossibleValuesParser::new(ROLES))]
    role: Option<String>,

    /// Account password
    #[arg(long, env = "SCHOOL_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Start {
        /// Page to open after signing in
        #[arg(long, value_name = "PAGE", default_value = "dashboard")]
        page: String,

        /// Disable background colors
        #[arg(long, default_value = "false")]
        no_background: bool,
    },
    /// Sign in once and report the result
    Login(LoginArgs),
    /// Sign in and print the dashboard metrics
    Dashboard(LoginArgs),
    /// Sign in and print the students list
    Students(LoginArgs),
    /// Clear the saved login defaults
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log::set_max_level(logging::threshold().into());
    let config_path = get_config_path()?;
    // Clearing the config must work even when the saved environment is broken.
    if let Command::Logout = args.command {
        print_cmd_info!("Logging out", "clearing {}", config_path.display());
        return Config::clear(&config_path).map_err(Into::into);
    }

    let saved = Config::load_or_default(&config_path);
    let environment = resolve_environment(&args, &saved)?;

    match args.command {
        Command::Start {
            page,
            no_background,
        } => {
            if Page::from_id(&page).is_none() {
                print_cmd_warn!("Unknown page", "'{}', opening the dashboard instead", page);
            }
            let session = setup_session(environment, config_path)?;
            run_tui_mode(session, UIConfig::new(!no_background, &page)).await
        }
        Command::Login(login) => {
            let credentials = credentials(login, &saved)?;
            let session = setup_session(environment, config_path)?;
            run_headless_login(session, credentials).await
        }
        Command::Dashboard(login) => {
            let credentials = credentials(login, &saved)?;
            let session = setup_session(environment, config_path)?;
            run_headless_loader(session, credentials, LoaderKind::Dashboard).await
        }
        Command::Students(login) => {
            let credentials = credentials(login, &saved)?;
            let session = setup_session(environment, config_path)?;
            run_headless_loader(session, credentials, LoaderKind::Students).await
        }
        Command::Logout => Ok(()),
    }
}

/// `--base-url`, then `--environment`/`SCHOOL_ADMIN_ENVIRONMENT`, then the saved value.
fn resolve_environment(args: &Args, saved: &Config) -> Result<Environment, Box<dyn Error>> {
    let raw = args
        .base_url
        .as_deref()
        .or(args.environment.as_deref())
        .unwrap_or(&saved.environment);
    raw.parse::<Environment>().map_err(|_| {
        format!(
            "Unknown environment '{}'. Use \"local\" or an http(s) base URL.",
            raw
        )
        .into()
    })
}

fn credentials(login: LoginArgs, saved: &Config) -> Result<Credentials, Box<dyn Error>> {
    let email = login
        .email
        .or_else(|| Some(saved.last_email.clone()).filter(|e| !e.is_empty()))
        .ok_or("No email given. Pass --email.")?;
    let role = login
        .role
        .or_else(|| {
            Some(saved.last_role.clone()).filter(|r| ROLES.contains(&r.as_str()))
        })
        .unwrap_or_else(|| ROLES[0].to_string());
    Ok(Credentials {
        email,
        password: login.password,
        role,
    })
}
