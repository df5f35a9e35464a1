//! 题块选择 - 业务能力层
//!
//! 随机贪心填充：打乱题块后顺序遍历一次，能放下就接受，放不下就跳过继续。
//! 这不是最优装箱，而是故意让多次组卷得到不同的题目组合。
//!
//! 兜底规则：目标为正、题块非空但一个都没接受时，接受（洗牌后首个遇到的）最小题块，
//! 即使它超出目标。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Block;

/// 单张试卷的选择结果
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// 按接受顺序排列的题块
    pub blocks: Vec<Block>,
    /// 是否由兜底规则选出
    pub fallback: bool,
}

impl Selection {
    /// 选中的题目总数
    pub fn question_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }
}

/// 贪心填充的结果
#[derive(Debug, Default)]
pub(crate) struct Fill {
    pub accepted: Vec<Block>,
    /// 被跳过的题块，保持遍历顺序
    pub rejected: Vec<Block>,
    pub total: usize,
}

/// 顺序遍历一次，累计不超过 `budget` 的题块都接受
pub(crate) fn greedy_fill(blocks: impl IntoIterator<Item = Block>, budget: usize) -> Fill {
    blocks.into_iter().fold(Fill::default(), |mut fill, block| {
        if fill.total + block.len() <= budget {
            fill.total += block.len();
            fill.accepted.push(block);
        } else {
            fill.rejected.push(block);
        }
        fill
    })
}

/// 从一张试卷的题块中随机选出总题量不超过 `target` 的子集
pub fn select_blocks<R>(mut blocks: Vec<Block>, target: usize, rng: &mut R) -> Selection
where
    R: Rng + ?Sized,
{
    if target == 0 || blocks.is_empty() {
        return Selection::default();
    }

    blocks.shuffle(rng);
    let fill = greedy_fill(blocks, target);

    if !fill.accepted.is_empty() {
        return Selection {
            blocks: fill.accepted,
            fallback: false,
        };
    }

    // 一个都放不下，说明每个块都比 target 大；min_by_key 在并列时返回第一个
    let smallest = fill.rejected.into_iter().min_by_key(Block::len);

    Selection {
        blocks: smallest.into_iter().collect(),
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;
    use crate::services::block_builder::build_blocks;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn group(id: &str, size: usize) -> Vec<Question> {
        (0..size)
            .map(|i| Question::new(format!("{}-{}", id, i), "").with_group(id, i as f64))
            .collect()
    }

    fn singles(prefix: &str, n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("{}{}", prefix, i), ""))
            .collect()
    }

    #[test]
    fn zero_target_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let blocks = build_blocks(&singles("q", 5));

        let selection = select_blocks(blocks, 0, &mut rng);

        assert!(selection.blocks.is_empty());
        assert!(!selection.fallback);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = select_blocks(Vec::new(), 10, &mut rng);
        assert!(selection.blocks.is_empty());
        assert!(!selection.fallback);
    }

    #[test]
    fn singletons_sample_without_replacement_up_to_target() {
        let blocks = build_blocks(&singles("q", 10));

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_blocks(blocks.clone(), 4, &mut rng);

            assert_eq!(selection.question_count(), 4);
            assert!(!selection.fallback);
            let unique: HashSet<&str> = selection
                .blocks
                .iter()
                .flat_map(|b| b.questions())
                .map(|q| q.id.as_str())
                .collect();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn target_larger_than_pool_takes_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut questions = group("g", 3);
        questions.extend(singles("s", 2));
        let blocks = build_blocks(&questions);

        let selection = select_blocks(blocks, 50, &mut rng);

        assert_eq!(selection.question_count(), 5);
        assert_eq!(selection.blocks.len(), 2 + 1);
    }

    #[test]
    fn never_exceeds_target_without_fallback() {
        let mut questions = group("a", 4);
        questions.extend(group("b", 3));
        questions.extend(group("c", 2));
        questions.extend(singles("s", 3));
        let blocks = build_blocks(&questions);

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_blocks(blocks.clone(), 6, &mut rng);

            assert!(!selection.fallback);
            assert!(selection.question_count() <= 6);
            assert!(selection.question_count() > 0);
        }
    }

    #[test]
    fn skips_oversized_blocks_and_keeps_walking() {
        // 只有一个 1 题块能放进 target=1，无论洗牌顺序如何都必须找到它
        let mut questions = group("big", 5);
        questions.extend(group("mid", 3));
        questions.extend(singles("s", 1));
        let blocks = build_blocks(&questions);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_blocks(blocks.clone(), 1, &mut rng);

            assert!(!selection.fallback);
            assert_eq!(selection.blocks.len(), 1);
            assert_eq!(selection.blocks[0].questions()[0].id, "s0");
        }
    }

    #[test]
    fn fallback_takes_single_smallest_block() {
        let mut questions = group("five", 5);
        questions.extend(group("four", 4));
        questions.extend(group("six", 6));
        let blocks = build_blocks(&questions);

        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selection = select_blocks(blocks.clone(), 3, &mut rng);

            assert!(selection.fallback);
            assert_eq!(selection.blocks.len(), 1);
            assert_eq!(selection.blocks[0].group_id(), Some("four"));
            assert_eq!(selection.question_count(), 4);
        }
    }

    #[test]
    fn single_oversized_group_is_returned_whole() {
        let mut rng = StdRng::seed_from_u64(7);
        let blocks = build_blocks(&group("reading", 5));

        let selection = select_blocks(blocks, 3, &mut rng);

        assert!(selection.fallback);
        let ids: Vec<&str> = selection.blocks[0]
            .questions()
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["reading-0", "reading-1", "reading-2", "reading-3", "reading-4"]
        );
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let mut questions = group("a", 2);
        questions.extend(singles("s", 12));
        let blocks = build_blocks(&questions);

        let pick = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            select_blocks(blocks.clone(), 7, &mut rng)
                .blocks
                .into_iter()
                .flat_map(Block::into_questions)
                .map(|q| q.id)
                .collect::<Vec<_>>()
        };

        assert_eq!(pick(42), pick(42));
    }

    #[test]
    fn greedy_fill_respects_budget() {
        let blocks = build_blocks(&{
            let mut q = group("a", 3);
            q.extend(group("b", 3));
            q.extend(singles("s", 1));
            q
        });

        let fill = greedy_fill(blocks, 4);

        assert_eq!(fill.total, 4);
        assert_eq!(fill.accepted.len(), 2);
        assert_eq!(fill.rejected.len(), 1);
        assert_eq!(fill.rejected[0].group_id(), Some("b"));
    }
}
