//! 组卷请求处理 - 编排层
//!
//! 请求边界：归一化参数 → 并发取数 → 组卷 → 可选的图片地址补全。
//! 每个请求持有自己的随机源，请求之间没有共享可变状态。

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{AssembledExam, AssemblyParams};
use crate::orchestrator::assembler::Assembler;
use crate::orchestrator::exam_source::{fetch_exam_pool, ExamRepository};
use crate::services::ImageResolver;
use crate::utils::logging::{log_exam_stats, print_assembly_summary, truncate_text};

/// 组卷请求参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyRequest {
    /// 基准题量；缺失或非正数时为 25
    #[serde(default)]
    pub base: Option<i64>,
    /// 总题量上限；缺失或非正数时为 100
    #[serde(default)]
    pub max: Option<i64>,
    /// 是否把相对图片路径补全为绝对地址
    #[serde(default)]
    pub absolute_images: bool,
    /// 固定随机种子
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AssemblyRequest {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base: Some(config.base_size),
            max: Some(config.max_size),
            absolute_images: config.absolute_images,
            seed: config.random_seed,
        }
    }

    pub fn params(&self) -> AssemblyParams {
        AssemblyParams::new(self.base, self.max)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// 组卷服务
pub struct AssemblyService<S> {
    source: S,
    image_resolver: ImageResolver,
    max_concurrent_fetches: usize,
    verbose_logging: bool,
}

impl<S: ExamRepository> AssemblyService<S> {
    /// 创建新的组卷服务
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            image_resolver: ImageResolver::new(config.image_base_url.clone()),
            max_concurrent_fetches: config.max_concurrent_fetches,
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 处理一次组卷请求
    pub async fn handle(&self, request: &AssemblyRequest) -> Result<AssembledExam> {
        let params = request.params();

        let exams = fetch_exam_pool(&self.source, self.max_concurrent_fetches)
            .await
            .context("获取试卷数据失败")?;

        info!(
            "🧩 开始组卷: {} 张试卷, base={}, max={}",
            exams.len(),
            params.base,
            params.max
        );

        let mut rng = request.rng();
        let (mut assembled, stats) = Assembler::new(params).assemble_with_stats(&exams, &mut rng);

        log_exam_stats(&stats);

        if request.absolute_images {
            let rewritten = self.image_resolver.apply(&mut assembled.questions);
            debug!("🖼️ 补全了 {} 个图片地址", rewritten);
        }

        if self.verbose_logging {
            for (i, q) in assembled.questions.iter().enumerate() {
                debug!("  {}. [{}] {}", i + 1, q.id, truncate_text(&q.text, 40));
            }
        }

        print_assembly_summary(&assembled, &stats);

        Ok(assembled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_defaults() {
        let request: AssemblyRequest = serde_json::from_str(r#"{ "max": 0 }"#).unwrap();

        assert_eq!(request.base, None);
        assert_eq!(request.max, Some(0));
        assert!(!request.absolute_images);
        assert_eq!(request.params(), AssemblyParams::default());
    }

    #[test]
    fn request_reads_camel_case_flags() {
        let request: AssemblyRequest =
            serde_json::from_str(r#"{ "base": 30, "absoluteImages": true, "seed": 9 }"#).unwrap();

        assert_eq!(request.params().base, 30);
        assert!(request.absolute_images);
        assert_eq!(request.seed, Some(9));
    }
}
