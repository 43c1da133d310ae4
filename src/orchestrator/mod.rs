//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `file_selector` - 文件挑选
//! - 递归遍历根目录，按文件名模式匹配
//! - 排除 old / backup / .ipynb_checkpoints
//!
//! ### `file_processor` - 单个文件处理器
//! - 每个模型一个转换会话，并发执行
//! - 汇总单个文件的结果
//!
//! ### `batch_processor` - 批量处理器
//! - 按顺序逐个文件处理，遵守 `max_files` 上限
//! - 输出全局统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<文件>)
//!     ↓
//! file_processor (处理 Vec<模型>)
//!     ↓
//! workflow::ConversionSession (处理单个 文件 + 模型)
//!     ↓
//! services (能力层：chunker / conversation / ledger / reply)
//!     ↓
//! clients (LlmTransport)
//! ```

pub mod batch_processor;
pub mod file_processor;
pub mod file_selector;

pub use batch_processor::{BatchOrchestrator, BatchReport};
pub use file_processor::{process_file, FileStats};
pub use file_selector::{collect_candidates, should_skip_by_name};
