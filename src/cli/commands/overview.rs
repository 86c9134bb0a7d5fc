use serde_json::json;

use crate::cli::{Context, OutputFormat};
use crate::dashboard::Overview;

pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let overview = ctx
        .protected(|| async { Ok(Overview::load(&ctx.gateway).await?) })
        .await?;

    match ctx.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "overview": overview }))?);
        }
        OutputFormat::Text => {
            let user = ctx.guard.store().user_label().await.unwrap_or_default();
            println!("Dashboard Overview");
            println!("Welcome back, {}", user);
            println!();
            println!("Total organizations: {}", overview.total_organizations);
            println!("Total people:        {}", overview.total_people);

            for (title, names) in [
                ("Recent organizations", &overview.recent_organizations),
                ("Recent people", &overview.recent_people),
            ] {
                if !names.is_empty() {
                    println!();
                    println!("{}:", title);
                    for name in names {
                        println!("  {}", name);
                    }
                }
            }
        }
    }
    Ok(())
}
