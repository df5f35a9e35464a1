use serde::Serialize;

use crate::models::question::Question;

/// 未指定或非正数时使用的基准题量
pub const DEFAULT_BASE: usize = 25;
/// 未指定或非正数时使用的总题量上限
pub const DEFAULT_MAX: usize = 100;

/// 归一化后的组卷参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyParams {
    pub base: usize,
    pub max: usize,
}

impl AssemblyParams {
    /// 缺失或非正数的输入静默替换为默认值，从不报错
    pub fn new(base: Option<i64>, max: Option<i64>) -> Self {
        Self {
            base: positive_or(base, DEFAULT_BASE),
            max: positive_or(max, DEFAULT_MAX),
        }
    }
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            max: DEFAULT_MAX,
        }
    }
}

fn positive_or(value: Option<i64>, default: usize) -> usize {
    value
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// 组卷结果
///
/// `questions` 保持最终的合并顺序（全局洗牌顺序，块内顺序不变）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledExam {
    pub base: usize,
    pub max: usize,
    pub count: usize,
    pub questions: Vec<Question>,
}

impl AssembledExam {
    pub fn new(params: AssemblyParams, questions: Vec<Question>) -> Self {
        Self {
            base: params.base,
            max: params.max,
            count: questions.len(),
            questions,
        }
    }

    pub fn empty(params: AssemblyParams) -> Self {
        Self::new(params, Vec::new())
    }
}

/// 单张试卷的选题统计
#[derive(Debug, Clone, PartialEq)]
pub struct ExamStats {
    pub exam_id: String,
    pub block_count: usize,
    pub target: usize,
    /// 该卷被选中的题目数（全局截断前）
    pub selected: usize,
    /// 是否触发了单卷兜底规则
    pub fallback: bool,
}

/// 一次组卷的统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyStats {
    pub exams: Vec<ExamStats>,
    /// 合并后、截断前的块数
    pub pooled_blocks: usize,
    /// 截断时被丢弃的块数
    pub dropped_blocks: usize,
    /// 是否触发了全局兜底规则
    pub global_fallback: bool,
}

impl AssemblyStats {
    /// 各卷目标题量之和；不做归一化，可能偏离 base
    pub fn total_target(&self) -> usize {
        self.exams.iter().map(|e| e.target).sum()
    }
}
