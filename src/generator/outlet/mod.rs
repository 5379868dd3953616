use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::document::GeneratedProject;
use crate::utils::sanitize_path_component;

/// 项目目录下固定创建的分类目录
pub const PROJECT_FOLDERS: [&str; 6] = [
    "00-Overview",
    "10-Discovery",
    "20-Planning",
    "30-Execution",
    "40-Comms",
    "90-Archive",
];

pub trait OutputWriter {
    /// 写出全部文档，返回写入的文件路径
    async fn write(&self, project: &GeneratedProject) -> Result<Vec<String>>;
}

/// 写入本地文件系统：`{output_dir}/{项目名}/{folder}/{filename}`
pub struct FilesystemWriter {
    output_dir: PathBuf,
}

impl FilesystemWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        self.output_dir.join(sanitize_path_component(project_name))
    }

    fn create_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("无法创建目录: {}", path.display()))
    }
}

impl OutputWriter for FilesystemWriter {
    async fn write(&self, project: &GeneratedProject) -> Result<Vec<String>> {
        info!("🖊️ 文档存储中...");
        let project_dir = self.project_dir(&project.project_name);
        Self::create_dir(&project_dir)?;
        for folder in PROJECT_FOLDERS {
            Self::create_dir(&project_dir.join(folder))?;
        }

        let mut paths = Vec::with_capacity(project.documents.len());
        for doc in &project.documents {
            let output_file_path = project_dir
                .join(sanitize_path_component(&doc.folder))
                .join(sanitize_path_component(&doc.filename));

            if let Some(parent_dir) = output_file_path.parent()
                && !parent_dir.exists()
            {
                Self::create_dir(parent_dir)?;
            }

            fs::write(&output_file_path, &doc.content)
                .with_context(|| format!("无法写入文档: {}", output_file_path.display()))?;

            info!("💾 已保存文档: {}", output_file_path.display());
            paths.push(output_file_path.display().to_string());
        }

        info!("💾 文档保存完成，输出目录: {}", project_dir.display());
        Ok(paths)
    }
}

#[cfg(test)]
mod tests;
