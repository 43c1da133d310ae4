//! # Polyglot Converter
//!
//! 借助大模型把 jupytext "percent" 格式的幻灯片笔记本从一种编程语言转换成另一种
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 语言注册表、模型注册表、对话消息、提示词目录
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有流程状态
//! - `chunker` - 按单元格标记切分文件
//! - `ConversationBuilder` - 构建对话消息
//! - `CompletionLedger` - 记录已完成的转换（SQLite）
//! - `reply` - 清理模型回复的代码围栏
//!
//! ### ③ 客户端（Clients）
//! - `LlmTransport` - 发送对话的唯一能力
//! - `OpenAiTransport` - OpenAI 兼容接口的实现（带重试）
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件 + 一个模型"的完整转换流程
//! - `SessionCtx` - 上下文封装（文件 + 模型 + 语言对）
//! - `ConversionSession` - 状态机（查账本 → 分块 → 对话 → 写出）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理，遵守文件数上限
//! - `orchestrator/file_processor` - 单个文件，多模型并发
//! - `orchestrator/file_selector` - 遍历与排除
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{LlmTransport, OpenAiTransport};
pub use config::Config;
pub use error::{ConvertError, ConvertResult};
pub use models::{ConversationTurn, LlmModel, ProgLang, PromptCatalog, Role};
pub use orchestrator::{BatchOrchestrator, BatchReport};
pub use services::{CompletionLedger, ConversationBuilder};
pub use workflow::{ConversionSession, SessionCtx, SessionOutcome};
