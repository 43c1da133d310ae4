//! 转换会话 - 流程层
//!
//! 核心职责：定义"一个文件 + 一个模型"的完整转换流程
//!
//! 流程顺序：
//! 1. 查询账本 → 已完成则跳过
//! 2. 读取文件并分块
//! 3. 发送初始说明 → 加入示例 → 逐块转换
//! 4. 全部成功才写出文件并记账
//!
//! 任一分块失败立即中止，不写文件、不记账。

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info, trace};

use crate::clients::LlmTransport;
use crate::error::{ConvertError, ConvertResult};
use crate::models::ConversationTurn;
use crate::services::chunker::split_into_chunks;
use crate::services::reply::strip_code_fence;
use crate::services::{CompletionLedger, ConversationBuilder};
use crate::utils::logging::truncate_text;
use crate::workflow::session_ctx::SessionCtx;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CheckLedger,
    Chunk,
    Converse,
    Finalize,
    /// 终态：账本里已有记录
    Skipped,
    /// 终态：文件已写出并记账
    Finalized,
    /// 终态：中途失败
    Aborted,
}

/// 会话结果（失败通过 `Err` 返回）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 已完成过，未做任何操作
    Skipped,
    /// 转换完成
    Finalized {
        output_path: PathBuf,
        chunk_count: usize,
    },
}

/// 会话参数
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub max_chunk_size: usize,
    pub reprocess: bool,
}

/// 转换会话
///
/// - 独占自己的对话历史，只追加不修改
/// - 分块严格按顺序转换
/// - 不重试，重试由传输层负责
pub struct ConversionSession<'a> {
    ctx: SessionCtx,
    builder: ConversationBuilder,
    transport: &'a dyn LlmTransport,
    ledger: &'a CompletionLedger,
    options: SessionOptions,
    turns: Vec<ConversationTurn>,
    transitions: Vec<SessionState>,
}

impl<'a> ConversionSession<'a> {
    /// 创建新的转换会话
    pub fn new(
        ctx: SessionCtx,
        builder: ConversationBuilder,
        transport: &'a dyn LlmTransport,
        ledger: &'a CompletionLedger,
        options: SessionOptions,
    ) -> Self {
        Self {
            ctx,
            builder,
            transport,
            ledger,
            options,
            turns: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// 当前状态
    pub fn state(&self) -> SessionState {
        self.transitions
            .last()
            .copied()
            .unwrap_or(SessionState::CheckLedger)
    }

    /// 经历过的所有状态（按顺序）
    pub fn transitions(&self) -> &[SessionState] {
        &self.transitions
    }

    /// 到目前为止的对话历史
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// 执行会话
    pub async fn run(&mut self) -> ConvertResult<SessionOutcome> {
        match self.run_steps().await {
            Ok(outcome) => {
                self.enter(match outcome {
                    SessionOutcome::Skipped => SessionState::Skipped,
                    SessionOutcome::Finalized { .. } => SessionState::Finalized,
                });
                Ok(outcome)
            }
            Err(e) => {
                self.enter(SessionState::Aborted);
                Err(e)
            }
        }
    }

    async fn run_steps(&mut self) -> ConvertResult<SessionOutcome> {
        // ========== 1. 查询账本 ==========
        self.enter(SessionState::CheckLedger);
        if !self.options.reprocess && self.is_complete().await? {
            info!("{} ⏭️ 已转换过，跳过", self.ctx);
            return Ok(SessionOutcome::Skipped);
        }

        // ========== 2. 读取并分块 ==========
        self.enter(SessionState::Chunk);
        let content = fs::read_to_string(&self.ctx.file_path)
            .await
            .map_err(|e| ConvertError::io(&self.ctx.file_path, e))?;
        debug!(
            "{} 文件内容: {} ({} 字符)",
            self.ctx,
            truncate_text(&content, 120),
            content.chars().count()
        );

        let chunks = split_into_chunks(&content, self.options.max_chunk_size);
        info!("{} 共 {} 个分块", self.ctx, chunks.len());

        // ========== 3. 对话转换 ==========
        self.enter(SessionState::Converse);
        let converted = if chunks.is_empty() {
            Vec::new()
        } else {
            self.convert_chunks(&chunks).await?
        };

        // ========== 4. 写出并记账 ==========
        self.enter(SessionState::Finalize);
        self.finalize(chunks.len(), converted).await
    }

    fn enter(&mut self, next: SessionState) {
        debug!("{} 状态: {:?} → {:?}", self.ctx, self.state(), next);
        self.transitions.push(next);
    }

    async fn is_complete(&self) -> ConvertResult<bool> {
        self.ledger
            .is_complete(
                &self.ctx.file_name(),
                &self.ctx.model.id,
                self.ctx.from.slug(),
                self.ctx.to.slug(),
            )
            .await
    }

    /// 逐块转换，返回每个分块的结果
    async fn convert_chunks(&mut self, chunks: &[String]) -> ConvertResult<Vec<String>> {
        self.turns.clear();

        // 第一轮只是让模型确认理解了任务，回复不做检查
        self.turns.push(self.builder.initial_turn());
        let ack = self.send().await?;
        trace!("{} 确认回复: {}", self.ctx, truncate_text(&ack, 80));
        self.turns.push(ConversationTurn::assistant(ack));

        // 示例问答直接加入历史，不发送
        self.turns.extend(self.builder.example_turns());

        let mut converted = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            info!(
                "{} 🔄 转换第 {}/{} 个分块",
                self.ctx,
                index + 1,
                chunks.len()
            );

            self.turns.push(self.builder.chunk_turn(chunk, index));
            let reply = self.send().await?;
            if reply.trim().is_empty() {
                return Err(ConvertError::transport(
                    &self.ctx.model.id,
                    format!("第 {} 个分块的回复为空", index + 1),
                ));
            }

            let reply = strip_code_fence(&reply, self.ctx.to);
            self.turns.push(ConversationTurn::assistant(reply.clone()));
            converted.push(reply);
        }

        Ok(converted)
    }

    /// 发送完整历史
    async fn send(&self) -> ConvertResult<String> {
        self.transport
            .send_conversation(&self.turns, &self.ctx.model.id)
            .await
    }

    /// 拼接结果、写出文件、记账
    async fn finalize(
        &self,
        expected: usize,
        converted: Vec<String>,
    ) -> ConvertResult<SessionOutcome> {
        let received = converted.iter().filter(|c| !c.trim().is_empty()).count();
        if converted.len() != expected || received != expected {
            return Err(ConvertError::MalformedReply {
                file: self.ctx.file_name(),
                expected,
                received,
            });
        }

        let content = converted
            .iter()
            .map(|chunk| chunk.trim_end())
            .collect::<Vec<_>>()
            .join("\n");

        let output_path = self.ctx.output_path();
        fs::write(&output_path, content)
            .await
            .map_err(|e| ConvertError::io(&output_path, e))?;

        self.ledger
            .mark_complete(
                &self.ctx.file_name(),
                &self.ctx.model.id,
                self.ctx.from.slug(),
                self.ctx.to.slug(),
            )
            .await?;

        info!("{} ✅ 已写出 {}", self.ctx, output_path.display());

        Ok(SessionOutcome::Finalized {
            output_path,
            chunk_count: expected,
        })
    }
}
