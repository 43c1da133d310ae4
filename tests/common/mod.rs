//! 集成测试共用的桩实现

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use polyglot_converter::{ConversationTurn, ConvertError, ConvertResult, LlmTransport};

/// 回复 "Received N message(s)" 的传输桩（N 为发送时的历史长度）
#[derive(Default)]
pub struct StubTransport {
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
}

impl StubTransport {
    /// 第 `call` 次调用（从 1 开始）返回错误
    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on_call: Some(call),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmTransport for StubTransport {
    async fn send_conversation(
        &self,
        turns: &[ConversationTurn],
        model_id: &str,
    ) -> ConvertResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_call == Some(call) {
            return Err(ConvertError::transport(model_id, "500 Internal Server Error"));
        }
        Ok(format!("Received {} message(s)", turns.len()))
    }
}

/// 一个单块的 Java 笔记本
pub const JAVA_NOTEBOOK: &str = "// %% [markdown]\n// # Topic\n\n// %%\nclass Topic { }\n";

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
