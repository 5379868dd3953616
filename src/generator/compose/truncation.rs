//! 生成内容的截断检测

use crate::utils::tail;

const TAIL_WINDOW_CHARS: usize = 200;
const VALID_ENDINGS: &[char] = &['.', '!', '?', ':', ')', ']', '"', '\'', '`', '*', '_'];

/// 判定为截断的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruncationReason {
    Empty,
    UnbalancedCodeFences,
    EndsMidSentence(String),
    UnclosedBold,
    UnclosedLink,
}

impl std::fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TruncationReason::Empty => write!(f, "content is empty"),
            TruncationReason::UnbalancedCodeFences => write!(f, "unbalanced code fences"),
            TruncationReason::EndsMidSentence(ending) => write!(f, "ends mid-sentence: '{}'", ending),
            TruncationReason::UnclosedBold => write!(f, "unclosed bold"),
            TruncationReason::UnclosedLink => write!(f, "unclosed link"),
        }
    }
}

/// 检测内容是否被截断，未截断时返回 None
pub fn detect_truncation(content: &str) -> Option<TruncationReason> {
    let content = content.trim();
    if content.is_empty() {
        return Some(TruncationReason::Empty);
    }

    if content.matches("```").count() % 2 != 0 {
        return Some(TruncationReason::UnbalancedCodeFences);
    }

    let last_line = content
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .unwrap_or_default();

    if !is_structural_line(last_line) && !last_line.ends_with(VALID_ENDINGS) {
        return Some(TruncationReason::EndsMidSentence(
            tail(last_line, 40).to_string(),
        ));
    }

    // 粗体与链接可能跨行，检查整段内容的结尾窗口
    let window = tail(content, TAIL_WINDOW_CHARS);
    if window.matches("**").count() % 2 != 0 {
        return Some(TruncationReason::UnclosedBold);
    }
    if let Some(open) = window.rfind('[')
        && window.rfind(']').is_none_or(|close| close < open)
    {
        return Some(TruncationReason::UnclosedLink);
    }

    None
}

/// 标题、表格行、代码围栏、分隔线、列表项不要求以标点结尾
fn is_structural_line(line: &str) -> bool {
    is_heading(line)
        || (line.len() >= 2 && line.starts_with('|') && line.ends_with('|'))
        || line.starts_with("```")
        || line == "---"
        || is_bullet(line)
        || is_numbered(line)
}

fn is_heading(line: &str) -> bool {
    let rest = line.trim_start_matches('#');
    rest.len() < line.len() && rest.starts_with(char::is_whitespace)
}

fn is_bullet(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('-' | '*' | '+')) && chars.next().is_some_and(char::is_whitespace)
}

fn is_numbered(line: &str) -> bool {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.len() < line.len()
        && rest
            .strip_prefix('.')
            .is_some_and(|after| after.starts_with(char::is_whitespace))
}
