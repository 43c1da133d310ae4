//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 运行配置
pub fn log_startup(config: &Config) {
    let models: Vec<&str> = config.models.iter().map(|m| m.slug.as_str()).collect();
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {} → {}",
        config.from_lang.name(),
        config.to_lang.name()
    );
    info!("📁 根目录: {}", config.root_dir.display());
    info!("🔎 匹配模式: {}", config.effective_glob_pattern());
    info!("🤖 模型: {}", models.join(", "));
    info!("📏 最大分块: {} 字符", config.max_chunk_size);
    if let Some(max_files) = config.max_files {
        info!("📊 最多处理 {} 个文件", max_files);
    }
    if config.reprocess {
        info!("♻️ 已完成的文件也会重新处理");
    }
    info!("{}", "=".repeat(60));
}

/// 记录文件开始处理
///
/// # 参数
/// - `file_index`: 文件编号（从 1 开始）
/// - `file_name`: 文件名
/// - `model_count`: 并发的模型数
pub fn log_file_start(file_index: usize, file_name: &str, model_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!(
        "📄 [文件 {}] 开始处理 {} ({} 个模型)",
        file_index, file_name, model_count
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `files`: 处理的文件数
/// - `finalized`: 完成的会话数
/// - `skipped`: 跳过的会话数
/// - `aborted`: 失败的会话数
pub fn print_final_stats(files: usize, finalized: usize, skipped: usize, aborted: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 文件: {}", files);
    info!("✅ 完成: {}", finalized);
    info!("⏭️ 跳过: {}", skipped);
    info!("❌ 失败: {}", aborted);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
