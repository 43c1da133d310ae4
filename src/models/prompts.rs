//! 提示词目录
//!
//! 保存说明模板、语言对专用说明以及每种语言的示例笔记本。
//! 运行期间只读，由调用方构造后通过 `Arc` 传入会话。

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::language::ProgLang;

/// 内置的默认提示词（TOML 格式）
pub const DEFAULT_PROMPTS_TOML: &str = include_str!("../../prompts/default_prompts.toml");

/// 单个语言对的说明
#[derive(Debug, Clone, Deserialize)]
pub struct PairInstructions {
    pub instructions: String,
}

/// 提示词目录
#[derive(Debug, Clone, Deserialize)]
pub struct PromptCatalog {
    /// 初始说明的开头部分（`{from_lang}` / `{to_lang}`）
    pub initial_prompt_start: String,
    /// 初始说明的结尾部分
    pub initial_prompt_end: String,
    /// 分块转换模板（`{from_lang}` / `{to_lang}` / `{chunk}`）
    pub convert_chunk_prompt: String,
    /// 语言对说明，键为 `<from>_to_<to>`
    #[serde(default)]
    pub pairs: HashMap<String, PairInstructions>,
    /// 示例笔记本，键为语言 slug
    #[serde(default)]
    pub examples: HashMap<String, String>,
}

impl PromptCatalog {
    /// 语言对的查找键
    pub fn pair_key(from: ProgLang, to: ProgLang) -> String {
        format!("{}_to_{}", from.slug(), to.slug())
    }

    /// 获取语言对专用说明
    pub fn pair_instructions(&self, from: ProgLang, to: ProgLang) -> Option<&str> {
        self.pairs
            .get(&Self::pair_key(from, to))
            .map(|p| p.instructions.as_str())
    }

    /// 获取某种语言的示例笔记本
    pub fn example(&self, lang: ProgLang) -> Option<&str> {
        self.examples.get(lang.slug()).map(String::as_str)
    }

    /// 是否可以完成 `from` → `to` 的转换
    pub fn supports(&self, from: ProgLang, to: ProgLang) -> bool {
        self.pair_instructions(from, to).is_some()
            && self.example(from).is_some()
            && self.example(to).is_some()
    }
}

/// 用语言名称填充模板中的占位符
///
/// `{chunk}` 最后替换，分块正文中出现的占位符文本保持原样。
pub fn render_template(template: &str, from: ProgLang, to: ProgLang, chunk: Option<&str>) -> String {
    let rendered = template
        .replace("{from_lang}", from.name())
        .replace("{to_lang}", to.name());
    match chunk {
        Some(chunk) => rendered.replace("{chunk}", chunk),
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_replaces_names() {
        let text = render_template(
            "from {from_lang} to {to_lang}",
            ProgLang::CSharp,
            ProgLang::Python,
            None,
        );
        assert_eq!(text, "from C# to Python");
    }

    #[test]
    fn test_chunk_body_is_not_rendered() {
        let text = render_template(
            "convert {chunk}",
            ProgLang::Java,
            ProgLang::Cpp,
            Some("// {to_lang} stays"),
        );
        assert_eq!(text, "convert // {to_lang} stays");
    }
}
