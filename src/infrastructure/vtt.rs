//! WebVTT 字幕文本提取

use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

/// 从 VTT 内容中提取纯文本
///
/// - 丢弃文件头、NOTE/STYLE/REGION 块、cue 标识和时间轴
/// - 去掉内联标签（`<c>`、`<00:00:01.000>`、`<v Speaker>`）
/// - 合并相邻重复行（自动字幕的滚动显示会重复上一行）
/// - 用单个空格连接
pub fn extract_text(content: &str) -> String {
    let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut lines_out: Vec<String> = Vec::new();

    for block in normalized.split("\n\n") {
        let lines: Vec<&str> = block.lines().collect();
        let Some(head) = lines.iter().map(|l| l.trim()).find(|l| !l.is_empty()) else {
            continue;
        };
        if head.starts_with("NOTE") || head.starts_with("STYLE") || head.starts_with("REGION") {
            continue;
        }
        let Some(timing_idx) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        for raw in &lines[timing_idx + 1..] {
            let text = clean_line(raw);
            if text.is_empty() {
                continue;
            }
            if lines_out.last() == Some(&text) {
                continue;
            }
            lines_out.push(text);
        }
    }

    lines_out.join(" ").trim().to_string()
}

fn clean_line(raw: &str) -> String {
    let stripped = tag_regex().replace_all(raw, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
