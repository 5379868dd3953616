use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// 项目输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    /// 项目分类（如 01_Personal、04_Iyeska）
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default)]
    pub additional_context: Option<String>,
    /// 输出格式，目前只支持 filesystem
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

fn default_area() -> String {
    "04_Iyeska".to_string()
}

fn default_output_format() -> String {
    "filesystem".to_string()
}

impl ProjectInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            area: default_area(),
            additional_context: None,
            output_format: default_output_format(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = Some(context.into());
        self
    }

    /// 校验输入长度限制
    pub fn validate(&self) -> Result<()> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > 200 {
            bail!("项目名称长度必须在1到200个字符之间，当前为{}", name_len);
        }
        let description_len = self.description.chars().count();
        if !(10..=10_000).contains(&description_len) {
            bail!(
                "项目描述长度必须在10到10000个字符之间，当前为{}",
                description_len
            );
        }
        if let Some(context) = &self.additional_context
            && context.chars().count() > 5_000
        {
            bail!("附加上下文不能超过5000个字符");
        }
        Ok(())
    }

    /// 交给隐私扫描的全部项目文本
    pub fn context_text(&self) -> String {
        match &self.additional_context {
            Some(context) if !context.trim().is_empty() => {
                format!("{}\n\n{}\n\n{}", self.name, self.description, context)
            }
            _ => format!("{}\n\n{}", self.name, self.description),
        }
    }

    /// 对名称、描述、附加上下文逐字段脱敏，返回新的输入
    pub fn with_sanitized_fields(&self, sanitize: impl Fn(&str) -> String) -> Self {
        Self {
            name: sanitize(&self.name),
            description: sanitize(&self.description),
            additional_context: self.additional_context.as_deref().map(&sanitize),
            ..self.clone()
        }
    }
}
