//! 语言模型描述
//!
//! `id` 是后端识别的模型名称，`slug` 用于输出文件名和日志。

use crate::error::ConvertError;

/// 一个可用的语言模型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LlmModel {
    /// 后端模型 ID（例如 `anthropic/claude-3.5-sonnet:beta`）
    pub id: String,
    /// 短名称（例如 `claude`）
    pub slug: String,
}

impl LlmModel {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
        }
    }

    /// 所有已知模型
    pub fn known() -> Vec<LlmModel> {
        KNOWN_MODELS
            .iter()
            .map(|(id, slug)| LlmModel::new(*id, *slug))
            .collect()
    }

    /// 未指定 `--models` 时使用的模型
    pub fn defaults() -> Vec<LlmModel> {
        Self::select(DEFAULT_MODEL_SLUGS).unwrap_or_default()
    }

    /// 按 slug 白名单选择模型，保持白名单的顺序
    pub fn select<S: AsRef<str>>(slugs: &[S]) -> Result<Vec<LlmModel>, ConvertError> {
        let known = Self::known();
        slugs
            .iter()
            .map(|slug| {
                let slug = slug.as_ref().trim();
                known
                    .iter()
                    .find(|m| m.slug == slug)
                    .cloned()
                    .ok_or_else(|| ConvertError::configuration(format!("未知的模型: {}", slug)))
            })
            .collect()
    }
}

impl std::fmt::Display for LlmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.slug, self.id)
    }
}

const KNOWN_MODELS: &[(&str, &str)] = &[
    ("anthropic/claude-3.5-sonnet:beta", "claude"),
    ("qwen/qwen-2.5-72b-instruct", "qwen"),
    ("google/gemini-pro-1.5", "gemini"),
    ("openai/chatgpt-4o-latest", "chatgpt"),
];

const DEFAULT_MODEL_SLUGS: &[&str] = &["claude", "qwen", "chatgpt"];
