use serde_json::json;

use crate::cli::{Context, OutputFormat};
use crate::session::Navigation;

pub async fn handle(path: &str, ctx: &Context) -> anyhow::Result<()> {
    let navigation = ctx.guard.navigate(path).await;

    let (outcome, target) = match navigation {
        Navigation::Render(route) => ("render", route.path()),
        Navigation::Redirect(target) => ("redirect", target),
        Navigation::NotFound => anyhow::bail!("No page at '{}'", path),
    };

    match ctx.output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "path": path, "outcome": outcome, "target": target }))?
        ),
        OutputFormat::Text => match navigation {
            Navigation::Redirect(_) => println!("{} -> {}", path, target),
            _ => println!("{}", target),
        },
    }
    Ok(())
}
