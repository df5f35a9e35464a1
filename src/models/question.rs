use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// 单个题目
///
/// 线上格式使用 camelCase：`id, text, options, correctAnswer, image, groupId, order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 所属题组；同一题组的题目必须整体入选或整体落选
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// 题组内排序；缺失时按 0 处理
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
}

impl Question {
    /// 创建一个不属于任何题组的题目
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options: Vec::new(),
            correct_answer: 0,
            image: None,
            group_id: None,
            order: None,
        }
    }

    pub fn with_options(mut self, options: Vec<String>, correct_answer: i64) -> Self {
        self.options = options;
        self.correct_answer = correct_answer;
        self
    }

    pub fn with_group(mut self, group_id: impl Into<String>, order: f64) -> Self {
        self.group_id = Some(group_id.into());
        self.order = Some(order);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// 题组键；空白的 groupId 视为未分组
    pub fn group_key(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// 实际用于排序的 order，缺失或非有限值按 0 处理
    pub fn effective_order(&self) -> f64 {
        self.order.filter(|o| o.is_finite()).unwrap_or(0.0)
    }

    /// 录入层校验
    ///
    /// 组卷核心不调用此方法，只有数据加载时会用它过滤坏数据
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyQuestionId);
        }
        if self.options.is_empty() {
            return Err(ValidationError::NoOptions {
                question_id: self.id.clone(),
            });
        }
        let in_range = usize::try_from(self.correct_answer)
            .map(|idx| idx < self.options.len())
            .unwrap_or(false);
        if !in_range {
            return Err(ValidationError::AnswerOutOfRange {
                question_id: self.id.clone(),
                index: self.correct_answer,
                option_count: self.options.len(),
            });
        }
        Ok(())
    }
}

/// 试卷元数据（不含题目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMeta {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// 占基准题量的百分比，不做归一化，各卷之和可以超过 100
    #[serde(default)]
    pub weight_percent: f64,
}

/// 一张试卷及其全部题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub weight_percent: f64,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Exam {
    pub fn new(id: impl Into<String>, weight_percent: f64, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            weight_percent,
            questions,
        }
    }

    /// 由元数据和题目组装试卷
    pub fn from_meta(meta: ExamMeta, questions: Vec<Question>) -> Self {
        Self {
            id: meta.id,
            title: meta.title,
            weight_percent: meta.weight_percent,
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("选项{}", i)).collect()
    }

    #[test]
    fn blank_group_id_is_ungrouped() {
        let mut q = Question::new("q1", "题干");
        q.group_id = Some("   ".to_string());
        assert_eq!(q.group_key(), None);

        let q = q.with_group(" g1 ", 1.0);
        assert_eq!(q.group_key(), Some("g1"));
    }

    #[test]
    fn non_finite_order_is_zero() {
        let mut q = Question::new("q1", "题干");
        assert_eq!(q.effective_order(), 0.0);
        q.order = Some(f64::NAN);
        assert_eq!(q.effective_order(), 0.0);
        q.order = Some(f64::INFINITY);
        assert_eq!(q.effective_order(), 0.0);
        q.order = Some(3.0);
        assert_eq!(q.effective_order(), 3.0);
    }

    #[test]
    fn validate_checks_answer_index() {
        let ok = Question::new("q1", "题干").with_options(options(4), 3);
        assert!(ok.validate().is_ok());

        let too_big = Question::new("q2", "题干").with_options(options(4), 4);
        assert_eq!(
            too_big.validate(),
            Err(ValidationError::AnswerOutOfRange {
                question_id: "q2".to_string(),
                index: 4,
                option_count: 4,
            })
        );

        let negative = Question::new("q3", "题干").with_options(options(2), -1);
        assert!(negative.validate().is_err());

        let no_options = Question::new("q4", "题干");
        assert!(matches!(
            no_options.validate(),
            Err(ValidationError::NoOptions { .. })
        ));
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{
            "id": "q1",
            "text": "题干",
            "options": ["A", "B"],
            "correctAnswer": 1,
            "groupId": "g7",
            "order": 2
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.group_key(), Some("g7"));
        assert_eq!(q.correct_answer, 1);
        assert_eq!(q.effective_order(), 2.0);
        assert_eq!(q.image, None);
    }
}
