use sales_dashboard::console::{self, Command};
use sales_dashboard::{Dashboard, DashboardConfig, init_logger};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env()?;
    init_logger(&config.log_level, config.log_json)?;

    tracing::info!(
        api_url = %config.api_url,
        scope = ?config.stats_scope,
        "Starting sales dashboard"
    );

    let dashboard = Dashboard::from_config(&config)?;
    dashboard.start().await;

    let mut stdout = tokio::io::stdout();
    let first = console::execute(&dashboard, Command::Show).await;
    stdout
        .write_all(format!("{}\n\n{}\n> ", first, "type 'help' for commands").as_bytes())
        .await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let output = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(cmd) => console::execute(&dashboard, cmd).await,
            Err(e) => e.to_string(),
        };
        stdout.write_all(format!("{}\n> ", output).as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("Dashboard closed");
    Ok(())
}
