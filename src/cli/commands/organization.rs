use std::path::Path;

use clap::Subcommand;
use serde_json::json;

use super::{display_opt, ListArgs};
use crate::cli::utils::{format_table, output_empty_collection, output_notice, output_success};
use crate::cli::{Context, OutputFormat};
use crate::dashboard::{ListScreen, OrganizationForm};
use crate::gateway::attachment::{is_data_uri, mime_for_file_name};
use crate::gateway::RecordGateway;
use crate::models::{LogoSource, Organization, OrganizationDraft};

#[derive(Subcommand)]
pub enum OrgCommands {
    #[command(about = "List organizations with search, sort and paging")]
    List(ListArgs),

    #[command(about = "Show one organization")]
    Show {
        #[arg(help = "Organization ID")]
        id: String,
    },

    #[command(about = "Create an organization")]
    Create {
        #[arg(long, help = "Organization name")]
        name: String,
        #[arg(long, help = "Contact email")]
        email: Option<String>,
        #[arg(long, help = "Website URL")]
        website: Option<String>,
        #[arg(long, help = "Logo as a data URI, URL or image file path")]
        logo: Option<String>,
    },

    #[command(about = "Update an organization (only the given fields change)")]
    Update {
        #[arg(help = "Organization ID")]
        id: String,
        #[arg(long, help = "Organization name")]
        name: Option<String>,
        #[arg(long, help = "Contact email")]
        email: Option<String>,
        #[arg(long, help = "Website URL")]
        website: Option<String>,
        #[arg(long, help = "Logo as a data URI, URL or image file path")]
        logo: Option<String>,
    },

    #[command(about = "Delete an organization")]
    Delete {
        #[arg(help = "Organization ID")]
        id: String,
    },
}

pub async fn handle(cmd: OrgCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.protected(move || async move {
        match cmd {
            OrgCommands::List(args) => list(ctx, &args).await,
            OrgCommands::Show { id } => {
                let org = RecordGateway::<Organization>::get_by_id(&ctx.gateway, &id).await?;
                print_organization(&ctx.output, &org)
            }
            OrgCommands::Create { name, email, website, logo } => {
                let draft = OrganizationDraft {
                    name: Some(name),
                    email,
                    website,
                    logo: logo.as_deref().map(logo_source).transpose()?,
                };
                submit(ctx, OrganizationForm::create(draft)).await
            }
            OrgCommands::Update { id, name, email, website, logo } => {
                let draft = OrganizationDraft {
                    name,
                    email,
                    website,
                    logo: logo.as_deref().map(logo_source).transpose()?,
                };
                submit(ctx, OrganizationForm::edit(id, draft)).await
            }
            OrgCommands::Delete { id } => {
                let mut screen: ListScreen<Organization> = ListScreen::default();
                let result = screen.delete(&ctx.gateway, &id).await;
                if let Some(notice) = screen.notice() {
                    output_notice(&ctx.output, notice)?;
                }
                Ok(result?)
            }
        }
    })
    .await
}

async fn list(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    let mut screen = args.screen::<Organization>(ctx.config.list.default_page_size)?;
    screen.refresh(&ctx.gateway).await?;

    let visible = screen.visible();
    let page_count = screen.page_count();
    if visible.total_match_count == 0 {
        return output_empty_collection(&ctx.output, "organizations", "No organizations found");
    }

    match ctx.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "organizations": visible.rows,
                    "total": visible.total_match_count,
                    "page": screen.state().page_index() + 1,
                    "page_count": page_count,
                }))?
            );
        }
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = visible
                .rows
                .iter()
                .map(|o| {
                    vec![
                        o.id.clone(),
                        o.name.clone(),
                        display_opt(&o.email),
                        display_opt(&o.website),
                        o.created_at.map(|at| at.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                    ]
                })
                .collect();
            println!("{}", format_table(&["ID", "Name", "Email", "Website", "Created"], &rows));
            println!(
                "\nPage {} of {} ({} matching)",
                screen.state().page_index() + 1,
                page_count.max(1),
                visible.total_match_count
            );
        }
    }
    Ok(())
}

async fn submit(ctx: &Context, form: OrganizationForm) -> anyhow::Result<()> {
    let mut screen = ListScreen::default();
    let org = form.submit(&ctx.gateway, &mut screen).await?;

    let message = screen
        .notice()
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "Organization saved".to_string());
    output_success(&ctx.output, &message, Some(json!({ "organization": org })))
}

fn print_organization(output: &OutputFormat, org: &Organization) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(org)?),
        OutputFormat::Text => {
            println!("ID:      {}", org.id);
            println!("Name:    {}", org.name);
            println!("Email:   {}", display_opt(&org.email));
            println!("Website: {}", display_opt(&org.website));
            if let Some(logo) = &org.logo {
                println!("Logo:    {}", logo);
            }
            if let Some(at) = org.created_at {
                println!("Created: {}", at.to_rfc3339());
            }
        }
    }
    Ok(())
}

/// Data URIs and URLs go through as given; anything else is read from disk.
fn logo_source(value: &str) -> anyhow::Result<LogoSource> {
    if is_data_uri(value) || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(LogoSource::Inline(value.to_string()));
    }

    let path = Path::new(value);
    let bytes = std::fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read logo '{}': {}", value, e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_string());

    Ok(LogoSource::File {
        mime: mime_for_file_name(&file_name),
        file_name,
        bytes,
    })
}
