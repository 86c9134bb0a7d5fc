pub mod commands;
pub mod config;
pub mod utils;

use std::future::Future;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::gateway::HttpGateway;
use crate::session::{FileTokenStore, SessionGuard, SessionStore, TokenStore};

#[derive(Parser)]
#[command(name = "salessync")]
#[command(about = "SalesSync CLI - Manage organizations and people in the SalesSync CRM")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Organization (company) management")]
    Org {
        #[command(subcommand)]
        cmd: commands::organization::OrgCommands,
    },

    #[command(about = "Person (employee) management")]
    Person {
        #[command(subcommand)]
        cmd: commands::person::PersonCommands,
    },

    #[command(about = "Dashboard overview with collection totals")]
    Overview,

    #[command(about = "Resolve a dashboard path through the session guard")]
    Route {
        #[arg(help = "Dashboard path, e.g. /dashboard/companies")]
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Everything a command needs: settings, the session guard and the gateway
/// sharing its session.
pub struct Context {
    pub output: OutputFormat,
    pub config: AppConfig,
    pub guard: SessionGuard,
    pub gateway: HttpGateway,
}

impl Context {
    pub fn new(config: AppConfig, tokens: Arc<dyn TokenStore>, output: OutputFormat) -> anyhow::Result<Self> {
        let store = SessionStore::restore(tokens);
        let gateway = HttpGateway::new(&config.api, store.clone())?;

        Ok(Self {
            output,
            config,
            guard: SessionGuard::new(store),
            gateway,
        })
    }

    /// Run `view` behind the session guard. Without a session it fails with
    /// the login redirect and `view` is never started.
    pub async fn protected<T, F, Fut>(&self, view: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        self.guard.render(|_| view()).await.into_result()?
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let tokens = Arc::new(FileTokenStore::in_dir(&config::get_config_dir()?));
    let ctx = Context::new(crate::config::config().clone(), tokens, output_format)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::Org { cmd } => commands::organization::handle(cmd, &ctx).await,
        Commands::Person { cmd } => commands::person::handle(cmd, &ctx).await,
        Commands::Overview => commands::overview::handle(&ctx).await,
        Commands::Route { path } => commands::route::handle(&path, &ctx).await,
    }
}
