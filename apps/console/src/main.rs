mod config;
mod host;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    render::render_movements, view, Action, ActionTarget, FileCredentialStore, MemoryView,
    SessionGateway, SessionState,
};
use shared::domain::ProductId;
use tracing_subscriber::EnvFilter;

use crate::{config::load_settings, host::ConsoleNavigator};

#[derive(Parser, Debug)]
#[command(about = "Retail back-office console")]
struct Cli {
    /// Overrides the configured backend URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Whoami,
    /// Runs a page action such as `load-inventory` and prints what it rendered.
    Action {
        name: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Movements {
        product_id: i64,
    },
    Logout,
}

fn container_for(action: Action) -> Option<&'static str> {
    match action {
        Action::Logout => None,
        Action::LoadProducts => Some(view::PRODUCTS_CONTAINER),
        Action::LoadCustomers => Some(view::CUSTOMERS_CONTAINER),
        Action::LoadSales => Some(view::SALES_CONTAINER),
        Action::LoadInventory => Some(view::INVENTORY_CONTAINER),
        Action::LoadReports => Some(view::REPORTS_CONTAINER),
    }
}

fn print_alerts(page: &MemoryView) {
    for alert in page.alerts() {
        eprintln!("{alert}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    settings.server_url = config::validate_server_url(&settings.server_url)?;

    let start_path = match cli.command {
        Command::Login { .. } | Command::Register { .. } => "/login",
        _ => "/dashboard",
    };
    let page = Arc::new(MemoryView::backoffice_page());
    let gateway = SessionGateway::new(
        settings.gateway_config(),
        Arc::new(FileCredentialStore::new(&settings.token_path)),
        Arc::new(ConsoleNavigator::new(start_path)),
        page.clone(),
    );

    match cli.command {
        Command::Login { email, password } => {
            let result = gateway.authenticate(&email, &password).await;
            print_alerts(&page);
            let user = result?;
            println!("signed in as {}", user.name);
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            gateway
                .register(&name, &email, &password)
                .await
                .context("registration failed")?;
            println!("registered {email}; sign in with `login`");
        }
        Command::Whoami => {
            gateway.initialize().await;
            match gateway.session_state() {
                SessionState::Authenticated(user) => {
                    println!("{}", user.name);
                    for (permission, granted) in &user.permissions.0 {
                        println!("  {permission}: {granted}");
                    }
                }
                SessionState::Unauthenticated => bail!("not signed in"),
            }
        }
        Command::Action { name, out } => {
            gateway.initialize().await;
            let signs_out = name.parse::<Action>() == Ok(Action::Logout);
            if !signs_out && gateway.session_state() == SessionState::Unauthenticated {
                bail!("not signed in");
            }

            let Some(action) = gateway.dispatch(&name, &ActionTarget::default()).await else {
                return Ok(());
            };
            let Some(html) = container_for(action).and_then(|id| page.container_html(id)) else {
                return Ok(());
            };
            match out {
                Some(path) => fs::write(&path, html)
                    .with_context(|| format!("failed to write '{}'", path.display()))?,
                None => println!("{html}"),
            }
        }
        Command::Movements { product_id } => {
            gateway.initialize().await;
            if gateway.session_state() == SessionState::Unauthenticated {
                bail!("not signed in");
            }

            let movements = gateway.inventory_movements(ProductId(product_id)).await?;
            println!("{}", render_movements(&movements, &gateway.formatting())?);
        }
        Command::Logout => {
            gateway.logout();
            println!("signed out");
        }
    }

    Ok(())
}
