//! 对话构建服务 - 业务能力层
//!
//! 只负责"生成对话消息"能力，不发送任何请求。
//!
//! 对话结构固定：
//! 1. 初始说明（user）
//! 2. 模型确认（assistant，由会话追加）
//! 3. 示例输入（user）
//! 4. 示例输出（assistant）
//! 5. 之后每个分块一问一答

use std::sync::Arc;

use tracing::trace;

use crate::error::{ConvertError, ConvertResult};
use crate::models::prompts::{render_template, PromptCatalog};
use crate::models::{ConversationTurn, ProgLang};

/// 对话构建器
///
/// 构造时校验语言对已注册，之后的构建操作不会失败。
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    catalog: Arc<PromptCatalog>,
    from: ProgLang,
    to: ProgLang,
}

impl ConversationBuilder {
    /// 创建对话构建器
    ///
    /// 语言对没有注册说明、或任一语言缺少示例时返回配置错误。
    pub fn new(catalog: Arc<PromptCatalog>, from: ProgLang, to: ProgLang) -> ConvertResult<Self> {
        if catalog.pair_instructions(from, to).is_none() {
            return Err(ConvertError::configuration(format!(
                "未注册语言对 {}",
                PromptCatalog::pair_key(from, to)
            )));
        }
        for lang in [from, to] {
            if catalog.example(lang).is_none() {
                return Err(ConvertError::configuration(format!(
                    "缺少 {} 的示例",
                    lang.slug()
                )));
            }
        }

        Ok(Self { catalog, from, to })
    }

    /// 初始说明消息
    pub fn initial_turn(&self) -> ConversationTurn {
        let mut prompt = render_template(&self.catalog.initial_prompt_start, self.from, self.to, None);
        prompt.push_str(self.pair_instructions());
        prompt.push_str(&render_template(
            &self.catalog.initial_prompt_end,
            self.from,
            self.to,
            None,
        ));
        ConversationTurn::user(prompt)
    }

    /// 示例问答（不发送给模型，直接加入历史）
    ///
    /// 示例输出原样使用，不套模板。
    pub fn example_turns(&self) -> [ConversationTurn; 2] {
        [
            self.convert_turn(self.example(self.from)),
            ConversationTurn::assistant(self.example(self.to)),
        ]
    }

    /// 分块转换消息
    pub fn chunk_turn(&self, chunk: &str, chunk_index: usize) -> ConversationTurn {
        trace!(
            "构建第 {} 个分块的消息 ({} → {}, {} 字符)",
            chunk_index + 1,
            self.from.slug(),
            self.to.slug(),
            chunk.len()
        );
        self.convert_turn(chunk)
    }

    fn convert_turn(&self, chunk: &str) -> ConversationTurn {
        ConversationTurn::user(render_template(
            &self.catalog.convert_chunk_prompt,
            self.from,
            self.to,
            Some(chunk),
        ))
    }

    // 构造时已校验，这里取不到时返回空串
    fn pair_instructions(&self) -> &str {
        self.catalog
            .pair_instructions(self.from, self.to)
            .unwrap_or_default()
    }

    fn example(&self, lang: ProgLang) -> &str {
        self.catalog.example(lang).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::loaders::default_prompt_catalog;
    use crate::models::Role;

    fn default_builder(from: ProgLang, to: ProgLang) -> ConvertResult<ConversationBuilder> {
        ConversationBuilder::new(Arc::new(default_prompt_catalog().unwrap()), from, to)
    }

    #[test]
    fn test_initial_prompt_contains_from_and_to_language() {
        let builder = default_builder(ProgLang::CSharp, ProgLang::Python).unwrap();
        let turn = builder.initial_turn();
        assert_eq!(turn.role, Role::User);
        assert!(turn.content.contains("C#"));
        assert!(turn.content.contains("Python"));
        assert!(!turn.content.contains("C++"));
        assert!(!turn.content.contains("Java"));
    }

    #[test]
    fn test_initial_prompt_mentions_test_frameworks() {
        let cases = [
            (ProgLang::Cpp, ProgLang::Python, "Catch2", "pytest"),
            (ProgLang::Java, ProgLang::CSharp, "JUnit", "xUnit.net"),
            (ProgLang::CSharp, ProgLang::Java, "xUnit.net", "JUnit"),
            (ProgLang::Python, ProgLang::TypeScript, "pytest", "Deno"),
        ];
        for (from, to, from_framework, to_framework) in cases {
            let prompt = default_builder(from, to).unwrap().initial_turn().content;
            assert!(prompt.contains(from_framework), "{} -> {}", from, to);
            assert!(prompt.contains(to_framework), "{} -> {}", from, to);
        }
    }

    #[test]
    fn test_example_turns() {
        let catalog = Arc::new(default_prompt_catalog().unwrap());
        let builder =
            ConversationBuilder::new(catalog.clone(), ProgLang::Java, ProgLang::CSharp).unwrap();
        let [input, output] = builder.example_turns();

        assert_eq!(input.role, Role::User);
        assert!(input.content.contains(catalog.example(ProgLang::Java).unwrap()));
        assert_eq!(output.role, Role::Assistant);
        assert_eq!(output.content, catalog.example(ProgLang::CSharp).unwrap());
    }

    #[test]
    fn test_chunk_turn_embeds_chunk() {
        let builder = default_builder(ProgLang::Java, ProgLang::Python).unwrap();
        let turn = builder.chunk_turn("// %%\nint x = 1;\n", 0);
        assert_eq!(turn.role, Role::User);
        assert!(turn.content.contains("// %%\nint x = 1;\n"));
        assert!(turn.content.contains("from Java to Python"));
    }

    #[test]
    fn test_unregistered_pair_is_configuration_error() {
        let err = default_builder(ProgLang::TypeScript, ProgLang::Java).unwrap_err();
        assert!(matches!(err, ConvertError::Configuration { .. }));
        assert!(err.to_string().contains("typescript_to_java"));
    }

    #[test]
    fn test_missing_example_is_configuration_error() {
        let mut catalog = default_prompt_catalog().unwrap();
        catalog.examples.remove("csharp");
        let err =
            ConversationBuilder::new(Arc::new(catalog), ProgLang::Java, ProgLang::CSharp).unwrap_err();
        assert!(matches!(err, ConvertError::Configuration { .. }));
    }
}
