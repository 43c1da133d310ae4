//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **挑选文件**：遍历根目录，按模式匹配并排除备份目录
//! 2. **数量上限**：最多处理 `max_files` 个文件
//! 3. **逐文件处理**：一个文件的所有模型都结束后才开始下一个文件
//! 4. **全局统计**：汇总所有会话的结果
//!
//! 本层只做调度和统计，不关心单个会话的细节。

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::LlmTransport;
use crate::config::Config;
use crate::error::ConvertResult;
use crate::models::PromptCatalog;
use crate::orchestrator::file_processor::{process_file, FileStats};
use crate::orchestrator::file_selector::{collect_candidates, relative_to, should_skip_by_name};
use crate::services::CompletionLedger;
use crate::utils::logging::log_startup;

/// 整个批次的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// 开始处理的文件数
    pub files_processed: usize,
    pub finalized: usize,
    pub skipped: usize,
    pub aborted: usize,
}

impl BatchReport {
    fn add(&mut self, stats: FileStats) {
        self.files_processed += 1;
        self.finalized += stats.finalized;
        self.skipped += stats.skipped;
        self.aborted += stats.aborted;
    }
}

/// 批量编排器
///
/// 持有一次运行所需的全部资源，由调用方显式传入。
pub struct BatchOrchestrator {
    config: Config,
    catalog: Arc<PromptCatalog>,
    transport: Arc<dyn LlmTransport>,
    ledger: CompletionLedger,
}

impl BatchOrchestrator {
    pub fn new(
        config: Config,
        catalog: Arc<PromptCatalog>,
        transport: Arc<dyn LlmTransport>,
        ledger: CompletionLedger,
    ) -> Self {
        Self {
            config,
            catalog,
            transport,
            ledger,
        }
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    /// 运行整个批次
    ///
    /// 只有挑选文件失败（根目录不存在、模式无效）时返回错误，
    /// 会话级错误都计入 `aborted`。
    pub async fn run(&self) -> ConvertResult<BatchReport> {
        log_startup(&self.config);

        let root = &self.config.root_dir;
        let candidates = collect_candidates(root, self.config.effective_glob_pattern())?;
        info!("✓ 找到 {} 个候选文件", candidates.len());

        let mut report = BatchReport::default();
        for path in &candidates {
            if let Some(max_files) = self.config.max_files {
                if report.files_processed >= max_files {
                    info!("📊 已达到文件数上限 {}，停止", max_files);
                    break;
                }
            }

            let relative = relative_to(path, root);
            if should_skip_by_name(relative) {
                debug!("⏭️ 排除: {}", relative.display());
                continue;
            }

            let stats = process_file(
                path,
                report.files_processed + 1,
                &self.config,
                &self.catalog,
                self.transport.as_ref(),
                &self.ledger,
            )
            .await;
            report.add(stats);
        }

        if report.files_processed == 0 {
            warn!("⚠️ 没有需要处理的文件");
        }

        Ok(report)
    }
}
