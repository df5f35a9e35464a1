//! 图片地址补全
//!
//! 组卷之后的可选后处理：把相对图片路径拼接到配置的基础地址上。
//! 已经是绝对地址（`http://`、`https://`、`//`、`data:`）的引用保持不变。

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Question;

fn absolute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:https?:)?//|^data:").expect("图片地址正则无效")
    })
}

/// 图片地址补全服务
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
}

impl ImageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 是否已经是绝对地址
    pub fn is_absolute(reference: &str) -> bool {
        absolute_pattern().is_match(reference.trim())
    }

    /// 补全单个图片引用
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if self.base_url.is_empty() || reference.is_empty() || Self::is_absolute(reference) {
            return reference.to_string();
        }
        format!("{}/{}", self.base_url, reference.trim_start_matches('/'))
    }

    /// 原地补全所有题目的图片引用，返回改写的数量
    pub fn apply(&self, questions: &mut [Question]) -> usize {
        let mut rewritten = 0;
        for image in questions.iter_mut().filter_map(|q| q.image.as_mut()) {
            let resolved = self.resolve(image);
            if resolved != *image {
                *image = resolved;
                rewritten += 1;
            }
        }
        rewritten
    }
}
