use std::io::{self, BufRead, Write};

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::{Context, OutputFormat};
use crate::session::AuthState;
use crate::validation::validate_login;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login as an administrator")]
    Login {
        #[arg(help = "Email address")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the stored session token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show current user information")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };
            validate_login(&email, &password)?;

            let landing = ctx.guard.login(&ctx.gateway, email.trim(), &password).await?;
            let user = ctx.guard.store().user_label().await.unwrap_or_default();

            output_success(
                &ctx.output,
                &format!("Logged in as {}", user),
                Some(json!({ "user": user, "redirect": landing.path() })),
            )
        }
        AuthCommands::Logout => {
            ctx.guard.logout().await?;
            output_success(&ctx.output, "Logged out", Some(json!({ "redirect": crate::session::LOGIN_PATH })))
        }
        AuthCommands::Status => {
            let state = ctx.guard.state().await;
            let authenticated = state == AuthState::Authenticated;
            match ctx.output {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "authenticated": authenticated,
                            "user": ctx.guard.store().user_label().await,
                            "server": ctx.gateway.base_url(),
                        }))?
                    );
                }
                OutputFormat::Text => {
                    if authenticated {
                        println!("Authenticated against {}", ctx.gateway.base_url());
                    } else {
                        println!("Not authenticated (run `salessync auth login <email>`)");
                    }
                }
            }
            Ok(())
        }
        AuthCommands::Whoami => {
            let user = ctx
                .protected(|| async { Ok(ctx.guard.store().user_label().await.unwrap_or_default()) })
                .await?;
            match ctx.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "user": user }))?),
                OutputFormat::Text => println!("{}", user),
            }
            Ok(())
        }
    }
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
