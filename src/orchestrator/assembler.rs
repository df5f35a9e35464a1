//! 组卷器 - 编排层
//!
//! ## 流程
//!
//! ```text
//! 每张试卷: build_blocks → target_for → select_blocks
//!     ↓
//! 合并所有试卷选中的题块（不记录来源）
//!     ↓
//! 全局二次洗牌
//!     ↓
//! 按 max 贪心截断（放不下的块跳过，继续尝试后面的块）
//!     ↓
//! 展开为题目列表（块内顺序不变）
//! ```
//!
//! 全局兜底：截断后一个块都没有，但合并池非空时，接受洗牌后的第一个块并立即停止。
//!
//! 各卷目标独立取整，不会根据目标之和与 base 的偏差做修正。
//! 整个过程是无状态的纯计算，随机源由调用方注入。

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::models::{AssembledExam, AssemblyParams, AssemblyStats, Block, Exam, ExamStats};
use crate::services::block_builder::build_blocks;
use crate::services::block_selector::{greedy_fill, select_blocks, Fill};
use crate::services::quota::target_for;

/// 组卷器
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    params: AssemblyParams,
}

impl Assembler {
    pub fn new(params: AssemblyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> AssemblyParams {
        self.params
    }

    /// 组卷
    pub fn assemble<R>(&self, exams: &[Exam], rng: &mut R) -> AssembledExam
    where
        R: Rng + ?Sized,
    {
        self.assemble_with_stats(exams, rng).0
    }

    /// 组卷，同时返回每张试卷的选题统计
    pub fn assemble_with_stats<R>(
        &self,
        exams: &[Exam],
        rng: &mut R,
    ) -> (AssembledExam, AssemblyStats)
    where
        R: Rng + ?Sized,
    {
        let AssemblyParams { base, max } = self.params;
        let mut stats = AssemblyStats::default();
        let mut pool: Vec<Block> = Vec::new();

        for exam in exams {
            let blocks = build_blocks(&exam.questions);
            let block_count = blocks.len();
            let target = target_for(base, exam.weight_percent);
            let selection = select_blocks(blocks, target, rng);
            let selected = selection.question_count();

            debug!(
                "[试卷 {}] 权重 {}% → 目标 {} 题，{} 个题块中选出 {} 题{}",
                exam.id,
                exam.weight_percent,
                target,
                block_count,
                selected,
                if selection.fallback { " (兜底)" } else { "" }
            );

            stats.exams.push(ExamStats {
                exam_id: exam.id.clone(),
                block_count,
                target,
                selected,
                fallback: selection.fallback,
            });
            pool.extend(selection.blocks);
        }

        stats.pooled_blocks = pool.len();
        if pool.is_empty() {
            return (AssembledExam::empty(self.params), stats);
        }

        pool.shuffle(rng);
        let Fill {
            accepted, rejected, ..
        } = greedy_fill(pool, max);

        let kept: Vec<Block> = if accepted.is_empty() {
            // 每个块都超过 max，说明 rejected 保持洗牌顺序且非空
            stats.global_fallback = true;
            stats.dropped_blocks = rejected.len() - 1;
            rejected.into_iter().take(1).collect()
        } else {
            stats.dropped_blocks = rejected.len();
            accepted
        };

        let questions: Vec<_> = kept.into_iter().flat_map(Block::into_questions).collect();

        if stats.global_fallback {
            info!(
                "⚠️ 所有题块都超过上限 {}，兜底接受一个 {} 题的题块",
                max,
                questions.len()
            );
        }

        (AssembledExam::new(self.params, questions), stats)
    }
}
