//! 试卷数据源
//!
//! 组卷核心从不直接访问存储，由这里把试卷和题目一次性取齐。
//! 先取试卷列表，再并发获取每张试卷的题目（fan-out + join-all），
//! 并发数由 Semaphore 限制。任何一张试卷获取失败，整个请求失败。

use anyhow::Result;
use futures::future::try_join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{AppError, SourceError};
use crate::models::{Exam, ExamMeta, Question};

/// 试卷数据源
#[allow(async_fn_in_trait)]
pub trait ExamRepository {
    /// 列出所有参与组卷的试卷（不含题目）
    async fn list_exams(&self) -> Result<Vec<ExamMeta>>;

    /// 获取单张试卷的全部题目
    async fn questions_for(&self, exam: &ExamMeta) -> Result<Vec<Question>>;
}

/// 取齐所有试卷及其题目
///
/// 返回顺序与 `list_exams` 一致；完成顺序不影响结果
pub async fn fetch_exam_pool<S>(source: &S, max_concurrent: usize) -> Result<Vec<Exam>>
where
    S: ExamRepository,
{
    let metas = source.list_exams().await.map_err(|e| {
        AppError::Source(SourceError::ListFailed { source: e.into() })
    })?;

    if metas.is_empty() {
        info!("⚠️ 数据源中没有任何试卷");
        return Ok(Vec::new());
    }

    let semaphore = Semaphore::new(max_concurrent.max(1));
    let semaphore = &semaphore;

    info!(
        "📥 正在并发获取 {} 张试卷的题目 (最大并发数: {})",
        metas.len(),
        max_concurrent.max(1)
    );

    let fetches = metas.into_iter().map(|meta| async move {
        let _permit = semaphore.acquire().await.map_err(|e| {
            AppError::Source(SourceError::TaskFailed {
                exam_id: meta.id.clone(),
                message: e.to_string(),
            })
        })?;

        let questions = source
            .questions_for(&meta)
            .await
            .map_err(|e| AppError::questions_failed(meta.id.clone(), e))?;

        debug!("[试卷 {}] ✓ 获取到 {} 个题目", meta.id, questions.len());
        Ok::<Exam, anyhow::Error>(Exam::from_meta(meta, questions))
    });

    try_join_all(fetches).await
}

/// 内存数据源
///
/// 用于测试，或调用方已经自行取好数据的场景
#[derive(Debug, Clone, Default)]
pub struct InMemoryExamRepository {
    exams: Vec<Exam>,
}

impl InMemoryExamRepository {
    pub fn new(exams: Vec<Exam>) -> Self {
        Self { exams }
    }
}

impl ExamRepository for InMemoryExamRepository {
    async fn list_exams(&self) -> Result<Vec<ExamMeta>> {
        Ok(self
            .exams
            .iter()
            .map(|exam| ExamMeta {
                id: exam.id.clone(),
                title: exam.title.clone(),
                weight_percent: exam.weight_percent,
            })
            .collect())
    }

    async fn questions_for(&self, exam: &ExamMeta) -> Result<Vec<Question>> {
        self.exams
            .iter()
            .find(|e| e.id == exam.id)
            .map(|e| e.questions.clone())
            .ok_or_else(|| anyhow::anyhow!("试卷不存在: {}", exam.id))
    }
}
