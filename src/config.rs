use std::path::PathBuf;

use crate::error::{ConvertError, ConvertResult};
use crate::models::{LlmModel, ProgLang};
use crate::services::chunker::DEFAULT_MAX_CHUNK_SIZE;

/// 程序配置
///
/// 优先级：命令行参数 > 环境变量 > 默认值。
#[derive(Clone, Debug)]
pub struct Config {
    /// 源语言
    pub from_lang: ProgLang,
    /// 目标语言
    pub to_lang: ProgLang,
    /// 遍历的根目录
    pub root_dir: PathBuf,
    /// 文件匹配模式（为空时使用源语言的默认模式）
    pub glob_pattern: Option<String>,
    /// 最大分块大小（字符数）
    pub max_chunk_size: usize,
    /// 最多处理的文件数
    pub max_files: Option<usize>,
    /// 已完成的文件是否重新处理
    pub reprocess: bool,
    /// 账本数据库路径
    pub db_path: String,
    /// 参与转换的模型
    pub models: Vec<LlmModel>,
    /// 自定义提示词文件
    pub prompts_file: Option<PathBuf>,
    /// 日志级别
    pub log_level: String,
    // --- LLM 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    /// 每次调用的最大尝试次数
    pub max_retries: usize,
    /// 重试间隔（秒）
    pub retry_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from_lang: ProgLang::Java,
            to_lang: ProgLang::CSharp,
            root_dir: PathBuf::from("."),
            glob_pattern: None,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            max_files: None,
            reprocess: false,
            db_path: "converted_files.db".to_string(),
            models: LlmModel::defaults(),
            prompts_file: None,
            log_level: "info".to_string(),
            api_key: String::new(),
            api_base_url: "https://openrouter.ai/api/v1".to_string(),
            max_retries: 3,
            retry_delay_secs: 5,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            db_path: std::env::var("PLC_DB_PATH").unwrap_or(default.db_path),
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("OPENROUTER_API_URL").unwrap_or(default.api_base_url),
            max_retries: env_parse("PLC_MAX_RETRIES").unwrap_or(default.max_retries),
            retry_delay_secs: env_parse("PLC_RETRY_DELAY_SECS").unwrap_or(default.retry_delay_secs),
            ..default
        }
    }

    /// 实际使用的文件匹配模式
    pub fn effective_glob_pattern(&self) -> &str {
        self.glob_pattern
            .as_deref()
            .unwrap_or_else(|| self.from_lang.glob_pattern())
    }

    /// 校验配置
    pub fn validate(&self) -> ConvertResult<()> {
        if self.max_chunk_size == 0 {
            return Err(ConvertError::configuration("最大分块大小必须大于 0"));
        }
        if self.from_lang == self.to_lang {
            return Err(ConvertError::configuration(format!(
                "源语言和目标语言相同: {}",
                self.from_lang.slug()
            )));
        }
        if self.models.is_empty() {
            return Err(ConvertError::configuration("没有选择任何模型"));
        }
        if let Err(e) = glob::Pattern::new(self.effective_glob_pattern()) {
            return Err(ConvertError::configuration(format!(
                "无效的文件匹配模式 {}: {}",
                self.effective_glob_pattern(),
                e
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
