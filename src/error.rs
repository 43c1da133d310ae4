use std::path::Path;

/// 转换过程中的错误类型
///
/// 所有错误都只影响当前会话（一个文件 + 一个模型），
/// 由编排层记录后继续处理其他会话。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// 配置错误（未注册的语言对、缺少示例、未知模型等）
    #[error("配置错误: {message}")]
    Configuration { message: String },

    /// 模型调用失败或返回空结果
    #[error("模型调用失败 (模型: {model}): {detail}")]
    Transport { model: String, detail: String },

    /// 输入文件无法读取或输出文件无法写入
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 分块转换结果缺失，拒绝写出被截断的文件
    #[error("转换结果不完整 ({file}): 期望 {expected} 个分块，实际 {received} 个")]
    MalformedReply {
        file: String,
        expected: usize,
        received: usize,
    },

    /// 账本读写失败
    #[error("账本错误: {0}")]
    Ledger(#[from] sqlx::Error),
}

// ========== 便捷构造函数 ==========

impl ConvertError {
    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        ConvertError::Configuration {
            message: message.into(),
        }
    }

    /// 创建模型调用错误
    pub fn transport(model: impl Into<String>, detail: impl Into<String>) -> Self {
        ConvertError::Transport {
            model: model.into(),
            detail: detail.into(),
        }
    }

    /// 创建文件操作错误
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 转换结果类型
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_identity() {
        let err = ConvertError::transport("qwen/qwen-2.5-72b-instruct", "502 Bad Gateway");
        let msg = err.to_string();
        assert!(msg.contains("qwen/qwen-2.5-72b-instruct"));
        assert!(msg.contains("502 Bad Gateway"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConvertError::io(Path::new("slides/a.java"), source);
        assert!(err.to_string().contains("slides/a.java"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
