//! 单个文件处理器 - 编排层
//!
//! ## 职责
//!
//! 对一个文件，为每个模型各开一个转换会话，并发执行，全部结束后汇总。
//!
//! - 会话之间互不影响，一个失败不会打断其他会话
//! - 会话错误只记录和计数，不向上抛出

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::clients::LlmTransport;
use crate::config::Config;
use crate::error::ConvertResult;
use crate::models::{LlmModel, PromptCatalog};
use crate::services::{CompletionLedger, ConversationBuilder};
use crate::utils::logging::{log_file_start, truncate_text};
use crate::workflow::{ConversionSession, SessionCtx, SessionOptions, SessionOutcome};

/// 单个文件的会话统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub finalized: usize,
    pub skipped: usize,
    pub aborted: usize,
}

/// 处理单个文件的所有模型
///
/// # 参数
/// - `file_path`: 输入文件
/// - `file_index`: 文件编号（用于日志）
/// - `config`: 配置（语言、模型、分块大小、是否重做）
/// - `catalog`: 提示词目录
/// - `transport`: LLM 传输
/// - `ledger`: 完成账本
pub async fn process_file(
    file_path: &Path,
    file_index: usize,
    config: &Config,
    catalog: &Arc<PromptCatalog>,
    transport: &dyn LlmTransport,
    ledger: &CompletionLedger,
) -> FileStats {
    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    log_file_start(file_index, &file_name, config.models.len());

    let options = SessionOptions {
        max_chunk_size: config.max_chunk_size,
        reprocess: config.reprocess,
    };

    let sessions = config.models.iter().map(|model| {
        let ctx = SessionCtx::new(
            file_path,
            file_index,
            model.clone(),
            config.from_lang,
            config.to_lang,
        );
        run_session(ctx, catalog, transport, ledger, options)
    });

    let mut stats = FileStats::default();
    for (model, result) in config.models.iter().zip(join_all(sessions).await) {
        match result {
            Ok(SessionOutcome::Finalized { .. }) => stats.finalized += 1,
            Ok(SessionOutcome::Skipped) => stats.skipped += 1,
            Err(e) => {
                log_session_error(file_index, &file_name, model, &e.to_string());
                stats.aborted += 1;
            }
        }
    }

    info!(
        "📄 [文件 {}] {} 完成: ✅ {} ⏭️ {} ❌ {}",
        file_index, file_name, stats.finalized, stats.skipped, stats.aborted
    );

    stats
}

async fn run_session(
    ctx: SessionCtx,
    catalog: &Arc<PromptCatalog>,
    transport: &dyn LlmTransport,
    ledger: &CompletionLedger,
    options: SessionOptions,
) -> ConvertResult<SessionOutcome> {
    let builder = ConversationBuilder::new(Arc::clone(catalog), ctx.from, ctx.to)?;
    let mut session = ConversionSession::new(ctx, builder, transport, ledger, options);
    session.run().await
}

fn log_session_error(file_index: usize, file_name: &str, model: &LlmModel, detail: &str) {
    error!(
        "[文件 #{} {} 模型 {}] ❌ 转换失败: {}",
        file_index,
        file_name,
        model.slug,
        truncate_text(detail, 200)
    );
}
