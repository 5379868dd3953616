//! 文本处理辅助函数

/// 以空白分隔的词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 截取前 `max_chars` 个字符，超出时追加 `...`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// 返回末尾不超过 `max_chars` 个字符的切片
pub fn tail(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    match text.char_indices().nth(total - max_chars) {
        Some((byte_index, _)) => &text[byte_index..],
        None => text,
    }
}

/// 将文件系统不允许的字符替换为下划线，空名称或全部由点组成的名称返回 `untitled`
pub fn sanitize_path_component(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // "." 与 ".." 会指向当前或上级目录
    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        String::from("untitled")
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests;
