//! 会话上下文
//!
//! 封装"我正在用哪个模型转换哪个文件"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::models::{LlmModel, ProgLang};

/// 会话上下文
#[derive(Debug, Clone)]
pub struct SessionCtx {
    /// 输入文件路径
    pub file_path: PathBuf,

    /// 文件编号（仅用于日志显示）
    pub file_index: usize,

    /// 使用的模型
    pub model: LlmModel,

    /// 源语言
    pub from: ProgLang,

    /// 目标语言
    pub to: ProgLang,
}

impl SessionCtx {
    /// 创建新的会话上下文
    pub fn new(
        file_path: impl Into<PathBuf>,
        file_index: usize,
        model: LlmModel,
        from: ProgLang,
        to: ProgLang,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            file_index,
            model,
            from,
            to,
        }
    }

    /// 账本里使用的文件标识（文件名）
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_path.to_string_lossy().into_owned())
    }

    /// 输出文件路径：`<stem>.<模型 slug><目标后缀>`，与输入文件同目录
    pub fn output_path(&self) -> PathBuf {
        output_path_for(&self.file_path, &self.model, self.to)
    }
}

/// 计算输出文件路径
pub fn output_path_for(file_path: &Path, model: &LlmModel, to: ProgLang) -> PathBuf {
    file_path.with_extension(format!("{}{}", model.slug, to.suffix()))
}

impl Display for SessionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文件 #{} {} 模型 {}]",
            self.file_index,
            self.file_name(),
            self.model.slug
        )
    }
}
