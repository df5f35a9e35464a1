use crate::error::{AppError, AppResult, FileError};
use crate::models::question::{ExamMeta, Question};
use crate::orchestrator::exam_source::ExamRepository;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 试卷目录文件名
pub const CATALOG_FILE: &str = "exams.toml";

/// `exams.toml` 的结构：`[[exams]]` 列表
#[derive(Debug, Deserialize)]
struct ExamCatalog {
    #[serde(default)]
    exams: Vec<ExamMeta>,
}

/// `<exam id>.toml` 的结构：`[[questions]]` 列表
#[derive(Debug, Deserialize)]
struct QuestionFile {
    #[serde(default)]
    questions: Vec<Question>,
}

/// 从文件夹中读取试卷目录
pub async fn load_exam_catalog(folder: &Path) -> AppResult<Vec<ExamMeta>> {
    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }));
    }

    let catalog_path = folder.join(CATALOG_FILE);
    let content = fs::read_to_string(&catalog_path)
        .await
        .map_err(|e| AppError::file_read_failed(catalog_path.display().to_string(), e))?;

    let catalog: ExamCatalog = toml::from_str(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: catalog_path.display().to_string(),
            source: Box::new(e),
        })
    })?;

    tracing::info!("✓ 试卷目录中共有 {} 张试卷", catalog.exams.len());
    Ok(catalog.exams)
}

/// 读取单张试卷的题目
///
/// 题目文件不存在时返回空列表；校验失败的题目会被丢弃并记录警告
pub async fn load_exam_questions(folder: &Path, exam_id: &str) -> Result<Vec<Question>> {
    if !is_safe_file_stem(exam_id) {
        anyhow::bail!("非法的试卷ID: {:?}", exam_id);
    }

    let path = folder.join(format!("{}.toml", exam_id));
    if !path.exists() {
        tracing::warn!("⚠️ 试卷 {} 没有题目文件: {}", exam_id, path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", path.display()))?;

    let file: QuestionFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", path.display()))?;

    let total = file.questions.len();
    let questions: Vec<Question> = file
        .questions
        .into_iter()
        .filter(|q| match q.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[试卷 {}] 丢弃无效题目: {}", exam_id, e);
                false
            }
        })
        .collect();

    tracing::debug!(
        "[试卷 {}] 成功加载 {}/{} 个题目",
        exam_id,
        questions.len(),
        total
    );

    Ok(questions)
}

/// 试卷ID直接作为文件名使用，不允许路径分隔符和上级目录
fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

/// 基于 TOML 文件夹的试卷数据源
///
/// 目录结构：
/// ```text
/// <folder>/exams.toml       [[exams]] id / title / weightPercent
/// <folder>/<exam id>.toml   [[questions]] id / text / options / correctAnswer / ...
/// ```
#[derive(Debug, Clone)]
pub struct TomlExamRepository {
    folder: PathBuf,
}

impl TomlExamRepository {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl ExamRepository for TomlExamRepository {
    async fn list_exams(&self) -> Result<Vec<ExamMeta>> {
        Ok(load_exam_catalog(&self.folder).await?)
    }

    async fn questions_for(&self, exam: &ExamMeta) -> Result<Vec<Question>> {
        load_exam_questions(&self.folder, &exam.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_exam_ids() {
        assert!(is_safe_file_stem("exam-01"));
        assert!(!is_safe_file_stem(""));
        assert!(!is_safe_file_stem(".."));
        assert!(!is_safe_file_stem("../etc/passwd"));
        assert!(!is_safe_file_stem("a\\b"));
    }

    #[test]
    fn parses_question_file_layout() {
        let content = r#"
            [[questions]]
            id = "q1"
            text = "阅读材料，回答问题"
            options = ["A", "B", "C"]
            correctAnswer = 2
            groupId = "reading-1"
            order = 1

            [[questions]]
            id = "q2"
            text = "单独的题"
            options = ["对", "错"]
            correctAnswer = 0
            image = "img/q2.png"
        "#;
        let file: QuestionFile = toml::from_str(content).unwrap();
        assert_eq!(file.questions.len(), 2);
        assert_eq!(file.questions[0].group_key(), Some("reading-1"));
        assert_eq!(file.questions[0].effective_order(), 1.0);
        assert_eq!(file.questions[1].image.as_deref(), Some("img/q2.png"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let folder = std::env::temp_dir().join("exam_assembly_missing_dir_for_test");
        let err = tokio_test::block_on(load_exam_catalog(&folder)).unwrap_err();
        assert!(matches!(
            err,
            AppError::File(FileError::DirectoryNotFound { .. })
        ));
    }
}
