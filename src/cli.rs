//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{ConvertError, ConvertResult};
use crate::models::{LlmModel, ProgLang};

#[derive(Parser, Debug)]
#[command(name = "polyglot_converter")]
#[command(about = "Convert jupytext slide notebooks between programming languages using LLMs", long_about = None)]
pub struct Cli {
    /// 源语言 (cpp | csharp | java | python | typescript)
    #[arg(long = "from", default_value = "java")]
    pub from_lang: String,

    /// 目标语言
    #[arg(long = "to", default_value = "csharp")]
    pub to_lang: String,

    /// 遍历的根目录
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// 文件匹配模式（默认使用源语言的模式）
    #[arg(long)]
    pub glob_pattern: Option<String>,

    /// 最大分块大小（字符数）
    #[arg(long)]
    pub max_chunk_size: Option<usize>,

    /// 最多处理的文件数
    #[arg(long)]
    pub max_files: Option<usize>,

    /// 重新处理已经完成的文件
    #[arg(long, default_value_t = false)]
    pub reprocess: bool,

    /// 账本数据库路径
    #[arg(long)]
    pub db_path: Option<String>,

    /// 使用的模型（逗号分隔的 slug，例如 claude,qwen）
    #[arg(long, value_delimiter = ',')]
    pub models: Vec<String>,

    /// 自定义提示词 TOML 文件
    #[arg(long)]
    pub prompts: Option<PathBuf>,

    /// OpenAI 兼容 API 的地址
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// API 密钥
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// 每次调用的最大尝试次数
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// 重试间隔（秒）
    #[arg(long)]
    pub retry_delay_secs: Option<u64>,

    /// 日志级别 (trace | debug | info | warn | error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// 合并到环境变量配置之上
    pub fn into_config(self, base: Config) -> ConvertResult<Config> {
        let from_lang = parse_lang(&self.from_lang)?;
        let to_lang = parse_lang(&self.to_lang)?;
        let models = if self.models.is_empty() {
            base.models.clone()
        } else {
            LlmModel::select(&self.models)?
        };

        Ok(Config {
            from_lang,
            to_lang,
            root_dir: self.root,
            glob_pattern: self.glob_pattern.or(base.glob_pattern),
            max_chunk_size: self.max_chunk_size.unwrap_or(base.max_chunk_size),
            max_files: self.max_files.or(base.max_files),
            reprocess: self.reprocess,
            db_path: self.db_path.unwrap_or(base.db_path),
            models,
            prompts_file: self.prompts.or(base.prompts_file),
            log_level: self.log_level,
            api_key: self.api_key.unwrap_or(base.api_key),
            api_base_url: self.api_base_url.unwrap_or(base.api_base_url),
            max_retries: self.max_retries.unwrap_or(base.max_retries),
            retry_delay_secs: self.retry_delay_secs.unwrap_or(base.retry_delay_secs),
        })
    }
}

fn parse_lang(slug: &str) -> ConvertResult<ProgLang> {
    ProgLang::from_slug(slug).ok_or_else(|| {
        ConvertError::configuration(format!(
            "未知的语言: {} (可选: cpp, csharp, java, python, typescript)",
            slug
        ))
    })
}
