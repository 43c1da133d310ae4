use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use polyglot_converter::cli::Cli;
use polyglot_converter::models::resolve_prompt_catalog;
use polyglot_converter::utils::logging::print_final_stats;
use polyglot_converter::{
    logger, BatchOrchestrator, CompletionLedger, Config, OpenAiTransport, PromptCatalog,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置：默认值 < 环境变量 < 命令行
    let config = cli
        .into_config(Config::from_env())
        .context("解析命令行参数失败")?;

    // 初始化日志
    logger::init(&config.log_level);

    config.validate().context("配置无效")?;

    let catalog = resolve_prompt_catalog(config.prompts_file.as_deref())
        .await
        .context("加载提示词失败")?;
    if !catalog.supports(config.from_lang, config.to_lang) {
        bail!(
            "不支持的转换: {} (没有注册说明或示例)",
            PromptCatalog::pair_key(config.from_lang, config.to_lang)
        );
    }

    let ledger = CompletionLedger::open(&config.db_path)
        .await
        .with_context(|| format!("无法打开账本: {}", config.db_path))?;

    let transport = Arc::new(OpenAiTransport::new(&config));
    let orchestrator = BatchOrchestrator::new(config, Arc::new(catalog), transport, ledger);

    let report = orchestrator.run().await.context("批量处理失败")?;
    print_final_stats(
        report.files_processed,
        report.finalized,
        report.skipped,
        report.aborted,
    );

    orchestrator.ledger().close().await;

    Ok(())
}
