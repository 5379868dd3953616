//! 项目输入的隐私扫描
//!
//! 在把项目描述发送给任何模型之前，先识别其中的邮箱、电话、社保号等敏感信息，
//! 并给出用占位标签替换后的脱敏文本。

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;

/// 可识别的敏感信息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensitiveDataType {
    Email,
    Phone,
    Ssn,
}

impl SensitiveDataType {
    /// 脱敏文本中使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            SensitiveDataType::Email => "EMAIL_ADDRESS",
            SensitiveDataType::Phone => "PHONE_NUMBER",
            SensitiveDataType::Ssn => "US_SSN",
        }
    }
}

impl Display for SensitiveDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 一处命中的敏感信息，`start`/`end`为原文中的字节偏移
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivacyFlag {
    pub data_type: SensitiveDataType,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f64,
}

/// 扫描结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrivacyScan {
    pub flags: Vec<PrivacyFlag>,
    pub sanitized_text: String,
}

impl PrivacyScan {
    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }
}

pub trait PrivacyScanner: Send + Sync {
    fn scan(&self, text: &str) -> PrivacyScan;
}

/// 不做任何识别，原样返回
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughScanner;

impl PrivacyScanner for PassthroughScanner {
    fn scan(&self, text: &str) -> PrivacyScan {
        PrivacyScan {
            flags: Vec::new(),
            sanitized_text: text.to_string(),
        }
    }
}

/// 基于正则的扫描器
pub struct PatternScanner {
    patterns: Vec<(SensitiveDataType, Regex, f64)>,
}

impl PatternScanner {
    pub fn new() -> Result<Self> {
        let table = [
            (
                SensitiveDataType::Email,
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
                0.95,
            ),
            (
                SensitiveDataType::Phone,
                r"(?:\+1[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
                0.85,
            ),
            (
                SensitiveDataType::Ssn,
                r"\b[0-9]{3}[-\s]?[0-9]{2}[-\s]?[0-9]{4}\b",
                0.75,
            ),
        ];

        let mut patterns = Vec::with_capacity(table.len());
        for (data_type, pattern, confidence) in table {
            let regex = Regex::new(pattern)
                .with_context(|| format!("无法编译{}识别规则", data_type))?;
            patterns.push((data_type, regex, confidence));
        }
        Ok(Self { patterns })
    }

    /// 所有命中，按位置排序，重叠时保留先出现且置信度更高的那一处
    fn detect(&self, text: &str) -> Vec<PrivacyFlag> {
        let mut candidates: Vec<PrivacyFlag> = self
            .patterns
            .iter()
            .flat_map(|(data_type, regex, confidence)| {
                regex.find_iter(text).map(move |m| PrivacyFlag {
                    data_type: *data_type,
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    confidence: *confidence,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });

        let mut flags: Vec<PrivacyFlag> = Vec::with_capacity(candidates.len());
        for flag in candidates {
            if flags.last().is_some_and(|prev| flag.start < prev.end) {
                continue;
            }
            flags.push(flag);
        }
        flags
    }
}

impl PrivacyScanner for PatternScanner {
    fn scan(&self, text: &str) -> PrivacyScan {
        let flags = self.detect(text);

        let mut sanitized = String::with_capacity(text.len());
        let mut cursor = 0;
        for flag in &flags {
            sanitized.push_str(&text[cursor..flag.start]);
            sanitized.push('[');
            sanitized.push_str(flag.data_type.label());
            sanitized.push(']');
            cursor = flag.end;
        }
        sanitized.push_str(&text[cursor..]);

        PrivacyScan {
            flags,
            sanitized_text: sanitized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> PatternScanner {
        PatternScanner::new().unwrap()
    }

    #[test]
    fn test_passthrough_returns_text_unchanged() {
        let scan = PassthroughScanner.scan("Call 605-555-0100");
        assert!(!scan.has_flags());
        assert_eq!(scan.sanitized_text, "Call 605-555-0100");
    }

    #[test]
    fn test_detects_email() {
        let scan = scanner().scan("Contact jane.doe@example.org for intake.");
        assert_eq!(scan.flags.len(), 1);
        assert_eq!(scan.flags[0].data_type, SensitiveDataType::Email);
        assert_eq!(scan.flags[0].text, "jane.doe@example.org");
        assert_eq!(scan.sanitized_text, "Contact [EMAIL_ADDRESS] for intake.");
    }

    #[test]
    fn test_detects_phone_and_ssn() {
        let scan = scanner().scan("Phone 605-555-0100, SSN 123-45-6789.");
        let types: Vec<_> = scan.flags.iter().map(|f| f.data_type).collect();
        assert_eq!(types, vec![SensitiveDataType::Phone, SensitiveDataType::Ssn]);
        assert_eq!(scan.sanitized_text, "Phone [PHONE_NUMBER], SSN [US_SSN].");
    }

    #[test]
    fn test_offsets_point_into_original_text() {
        let text = "Reach me at a@b.io today";
        let scan = scanner().scan(text);
        let flag = &scan.flags[0];
        assert_eq!(&text[flag.start..flag.end], "a@b.io");
        assert!(flag.confidence > 0.9);
    }

    #[test]
    fn test_clean_text_has_no_flags() {
        let text = "A youth mentorship program serving 120 students in 3 schools.";
        let scan = scanner().scan(text);
        assert!(scan.flags.is_empty());
        assert_eq!(scan.sanitized_text, text);
    }
}
