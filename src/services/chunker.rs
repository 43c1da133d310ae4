//! 分块服务 - 业务能力层
//!
//! 只负责把笔记本文本切成大小受限的分块，不做任何 I/O。
//!
//! 1. 按单元格标记行（`# %%` / `// %%`）切成原始片段
//! 2. 贪心地把相邻片段合并到 `max_chunk_size` 以内
//!
//! 超过上限的单个片段原样输出，不再拆分。

/// 默认的最大分块大小（字符数）
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 8192;

/// 单元格标记前缀（两种注释风格）
const CELL_MARKERS: [&str; 2] = ["# %%", "// %%"];

/// 把文件内容切成有序分块
///
/// 所有分块按顺序直接拼接即可还原输入。
pub fn split_into_chunks(content: &str, max_chunk_size: usize) -> Vec<String> {
    let segments = split_at_cell_markers(content);
    pack_segments(segments, max_chunk_size)
}

/// 判断一行是否为单元格标记
pub fn is_cell_marker(line: &str) -> bool {
    let line = line.trim_start();
    CELL_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// 按单元格标记切成原始片段（保留原始换行符）
fn split_at_cell_markers(content: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        if is_cell_marker(line) && offset > start {
            segments.push(&content[start..offset]);
            start = offset;
        }
        offset += line.len();
    }

    if offset > start {
        segments.push(&content[start..offset]);
    }

    segments
}

/// 贪心合并片段
fn pack_segments(segments: Vec<&str>, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for segment in segments {
        let segment_len = segment.chars().count();

        if segment_len > max_chunk_size {
            // 超大片段：先输出累积内容，再单独输出
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.push(segment.to_string());
        } else if current_len + segment_len <= max_chunk_size {
            current.push_str(segment);
            current_len += segment_len;
        } else {
            chunks.push(std::mem::replace(&mut current, segment.to_string()));
            current_len = segment_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
