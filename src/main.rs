use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use research_scribe::cli::{Args, Command};
use research_scribe::console::{Console, InquirePrompter};
use research_scribe::llm::client::LLMClient;
use research_scribe::wizard::{Wizard, WizardContext};

fn init_tracing(verbose: u8) {
    // RUST_LOG优先，其次按-v次数决定
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,research_scribe=info".to_string(),
            2 => "info,research_scribe=debug".to_string(),
            _ => "debug,research_scribe=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env不存在时忽略
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let command = args.selected_command();
    let check_connection = args.check_connection;
    let config = args.into_config()?;

    init_tracing(config.verbose);
    config.validate()?;

    let client = LLMClient::new(config.clone())?;
    if check_connection {
        client.check_connection().await?;
    }
    let context = WizardContext::with_model(config, Arc::new(client));

    let mut wizard = match command {
        Command::Purpose => Wizard::new(context),
        Command::Literature { purpose: Some(purpose) } => {
            Wizard::resume_literature_review(context, purpose)?
        }
        Command::Literature { purpose: None } => {
            let path = context.purpose_store.path().to_path_buf();
            Wizard::resume_from_store(context).context(format!(
                "無法從 {} 讀取研究目的，請先完成研究目的步驟或使用 --purpose",
                path.display()
            ))?
        }
    };

    let mut console = Console::new(InquirePrompter, std::io::stdout());
    console.run(&mut wizard).await
}
