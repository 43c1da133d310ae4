use crate::error::{ConvertError, ConvertResult};
use crate::models::prompts::{PromptCatalog, DEFAULT_PROMPTS_TOML};
use std::path::Path;
use tokio::fs;

/// 解析 TOML 格式的提示词目录
pub fn parse_prompt_catalog(content: &str) -> ConvertResult<PromptCatalog> {
    toml::from_str(content)
        .map_err(|e| ConvertError::configuration(format!("无法解析提示词文件: {}", e)))
}

/// 内置的默认提示词目录
pub fn default_prompt_catalog() -> ConvertResult<PromptCatalog> {
    parse_prompt_catalog(DEFAULT_PROMPTS_TOML)
}

/// 从 TOML 文件加载提示词目录
pub async fn load_prompt_catalog(path: &Path) -> ConvertResult<PromptCatalog> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ConvertError::io(path, e))?;

    let catalog = parse_prompt_catalog(&content)?;

    tracing::info!(
        "已加载提示词文件 {}: {} 个语言对, {} 个示例",
        path.display(),
        catalog.pairs.len(),
        catalog.examples.len()
    );

    Ok(catalog)
}

/// 加载提示词目录：指定了文件就读文件，否则使用内置默认值
pub async fn resolve_prompt_catalog(path: Option<&Path>) -> ConvertResult<PromptCatalog> {
    match path {
        Some(path) => load_prompt_catalog(path).await,
        None => default_prompt_catalog(),
    }
}
