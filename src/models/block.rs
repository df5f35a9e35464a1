use crate::models::question::Question;

/// 不可拆分的题目单元
///
/// 要么是同一题组的全部题目（已按 order 排好序），要么是单个未分组题目。
/// 构建后成员不可变，选题时只能整体接受或整体拒绝。
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    group_id: Option<String>,
    questions: Vec<Question>,
}

impl Block {
    /// 包装单个未分组题目
    pub fn single(question: Question) -> Self {
        Self {
            group_id: None,
            questions: vec![question],
        }
    }

    /// 题组块；调用方保证 `questions` 非空且已排序
    pub(crate) fn group(group_id: String, questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty());
        Self {
            group_id: Some(group_id),
            questions,
        }
    }

    /// 块内题目数
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
