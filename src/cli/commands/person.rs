use clap::Subcommand;
use serde_json::json;

use super::{display_opt, ListArgs};
use crate::cli::utils::{format_table, output_empty_collection, output_notice, output_success};
use crate::cli::{Context, OutputFormat};
use crate::dashboard::{ListScreen, PersonForm};
use crate::gateway::RecordGateway;
use crate::models::{Person, PersonDraft};

#[derive(Subcommand)]
pub enum PersonCommands {
    #[command(about = "List people with search, sort and paging")]
    List(ListArgs),

    #[command(about = "Show one person")]
    Show {
        #[arg(help = "Person ID")]
        id: String,
    },

    #[command(about = "Create a person")]
    Create {
        #[arg(long, help = "First name")]
        first_name: String,
        #[arg(long, help = "Last name")]
        last_name: String,
        #[arg(long = "org", help = "ID of the organization the person belongs to")]
        organization_id: String,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
    },

    #[command(about = "Update a person (only the given fields change)")]
    Update {
        #[arg(help = "Person ID")]
        id: String,
        #[arg(long, help = "First name")]
        first_name: Option<String>,
        #[arg(long, help = "Last name")]
        last_name: Option<String>,
        #[arg(long = "org", help = "ID of the organization the person belongs to")]
        organization_id: Option<String>,
        #[arg(long, help = "Email address")]
        email: Option<String>,
        #[arg(long, help = "Phone number")]
        phone: Option<String>,
    },

    #[command(about = "Delete a person")]
    Delete {
        #[arg(help = "Person ID")]
        id: String,
    },
}

pub async fn handle(cmd: PersonCommands, ctx: &Context) -> anyhow::Result<()> {
    ctx.protected(move || async move {
        match cmd {
            PersonCommands::List(args) => list(ctx, &args).await,
            PersonCommands::Show { id } => {
                let person = RecordGateway::<Person>::get_by_id(&ctx.gateway, &id).await?;
                print_person(&ctx.output, &person)
            }
            PersonCommands::Create {
                first_name,
                last_name,
                organization_id,
                email,
                phone,
            } => {
                let draft = PersonDraft {
                    first_name: Some(first_name),
                    last_name: Some(last_name),
                    organization_id: Some(organization_id),
                    email,
                    phone,
                };
                submit(ctx, PersonForm::create(draft)).await
            }
            PersonCommands::Update {
                id,
                first_name,
                last_name,
                organization_id,
                email,
                phone,
            } => {
                let draft = PersonDraft {
                    first_name,
                    last_name,
                    organization_id,
                    email,
                    phone,
                };
                submit(ctx, PersonForm::edit(id, draft)).await
            }
            PersonCommands::Delete { id } => {
                let mut screen: ListScreen<Person> = ListScreen::default();
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
    let mut screen = args.screen::<Person>(ctx.config.list.default_page_size)?;
    screen.refresh(&ctx.gateway).await?;

    let visible = screen.visible();
    let page_count = screen.page_count();
    if visible.total_match_count == 0 {
        return output_empty_collection(&ctx.output, "people", "No people found");
    }

    match ctx.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "people": visible.rows,
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
                .map(|p| {
                    vec![
                        p.id.clone(),
                        p.full_name(),
                        organization_label(p),
                        display_opt(&p.email),
                        display_opt(&p.phone),
                    ]
                })
                .collect();
            println!("{}", format_table(&["ID", "Name", "Organization", "Email", "Phone"], &rows));
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

async fn submit(ctx: &Context, form: PersonForm) -> anyhow::Result<()> {
    let mut screen = ListScreen::default();
    let person = form.submit(&ctx.gateway, &mut screen).await?;

    let message = screen
        .notice()
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "Person saved".to_string());
    output_success(&ctx.output, &message, Some(json!({ "person": person })))
}

/// Populated organization name, falling back to the bare id
fn organization_label(person: &Person) -> String {
    person
        .organization_name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| person.organization_id())
        .to_string()
}

fn print_person(output: &OutputFormat, person: &Person) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(person)?),
        OutputFormat::Text => {
            println!("ID:           {}", person.id);
            println!("Name:         {}", person.full_name());
            println!("Organization: {}", organization_label(person));
            println!("Email:        {}", display_opt(&person.email));
            println!("Phone:        {}", display_opt(&person.phone));
            if let Some(at) = person.created_at {
                println!("Created:      {}", at.to_rfc3339());
            }
        }
    }
    Ok(())
}
