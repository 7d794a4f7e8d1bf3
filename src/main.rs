use clap::Parser;
use dmarc_summary::config::cli::is_cli_context;
use dmarc_summary::utils::{logger, validation::Validate};
use dmarc_summary::{
    ArgumentSet, ChainFormatter, CliConfig, JsonStore, LettreMailer, Result, StoreReportFactory,
    SummaryJob, TomlConfig,
};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 只允許從命令列執行
    if !is_cli_context(|key| std::env::var(key).ok()) {
        println!("Forbidden");
        return ExitCode::FAILURE;
    }

    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting dmarc-summary");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let rendered = e.render(&ChainFormatter);
            if e.is_expected() {
                tracing::warn!("Summary not sent: {}", e);
                println!("{}", rendered);
            } else {
                tracing::error!("❌ Summary job failed: {}", e);
                eprintln!("{}", rendered);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    let args = ArgumentSet::parse(&cli.params);

    // 參數缺漏時不必載入任何設定
    args.domain()?;
    args.period()?;

    tracing::info!("📁 Loading configuration from: {}", cli.config.display());
    let config = TomlConfig::from_file(&cli.config)?;
    config.validate()?;

    let store = JsonStore::load(config.storage_path()).await?;
    let reports = StoreReportFactory::new(store.clone());
    let mailer = LettreMailer::from_config(&config)?;

    let job = SummaryJob::new(store, reports, config, mailer);
    job.run(&args).await?;
    Ok(())
}
