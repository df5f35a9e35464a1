//! 题块构建 - 业务能力层
//!
//! 把一张试卷的题目划分成不可拆分的题块：
//! - 同一 `groupId` 的题目合成一个块，按 `order` 升序排列（相同 order 保持原始顺序）
//! - 未分组的题目各自成为单题块
//!
//! 块的输出顺序为首次出现顺序，题组块占据其第一道题的位置，保证固定随机种子时结果可复现。

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Block, Question};

/// 构建一张试卷的题块
pub fn build_blocks(questions: &[Question]) -> Vec<Block> {
    enum Slot<'a> {
        Single(&'a Question),
        Group(usize),
    }

    let mut slots: Vec<Slot<'_>> = Vec::with_capacity(questions.len());
    let mut groups: Vec<(String, Vec<&Question>)> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for question in questions {
        match question.group_key() {
            Some(key) => {
                let idx = *group_index.entry(key).or_insert_with(|| {
                    groups.push((key.to_string(), Vec::new()));
                    slots.push(Slot::Group(groups.len() - 1));
                    groups.len() - 1
                });
                groups[idx].1.push(question);
            }
            None => slots.push(Slot::Single(question)),
        }
    }

    // sort_by 是稳定排序，相同 order 保持插入顺序
    for (_, members) in groups.iter_mut() {
        members.sort_by(|a, b| {
            a.effective_order()
                .partial_cmp(&b.effective_order())
                .unwrap_or(Ordering::Equal)
        });
    }

    let mut groups: Vec<Option<(String, Vec<&Question>)>> = groups.into_iter().map(Some).collect();

    slots
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Single(q) => Some(Block::single(q.clone())),
            Slot::Group(idx) => groups[idx].take().map(|(id, members)| {
                Block::group(id, members.into_iter().cloned().collect())
            }),
        })
        .collect()
}
