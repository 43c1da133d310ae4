//! 模型回复清理
//!
//! 模型经常把整段回复包在一个代码块里，这里只去掉"整段被一个围栏包住"
//! 的那一层，其他情况原样返回。

use regex::Regex;

use crate::models::ProgLang;

/// 去掉包住整段回复的代码围栏
///
/// 只处理 "```<目标语言>\n正文\n```" 这种形式，围栏必须覆盖整个回复。
/// 正文可以包含任意内容，包括以 ``` 开头的行。
pub fn strip_code_fence(reply: &str, target: ProgLang) -> String {
    let tags = target
        .fence_tags()
        .iter()
        .map(|tag| regex::escape(tag))
        .collect::<Vec<_>>()
        .join("|");

    // 正则只由固定的标记拼成，构造失败时退回原文
    let Ok(re) = Regex::new(&format!(r"\A```(?:{})\n((?s).*)\n```\z", tags)) else {
        return reply.to_string();
    };

    match re.captures(reply).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().to_string(),
        None => reply.to_string(),
    }
}
