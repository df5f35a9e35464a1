/// 日志工具模块
///
/// 提供日志初始化和组卷过程的格式化输出
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{AssembledExam, AssemblyStats};

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，详细模式下为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 随机组卷");
    info!("📁 试卷目录: {}", config.exam_folder);
    info!(
        "📊 基准题量: {} / 上限: {}",
        config.base_size, config.max_size
    );
    if let Some(seed) = config.random_seed {
        info!("🎲 固定随机种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 记录每张试卷的选题情况
pub fn log_exam_stats(stats: &AssemblyStats) {
    for exam in &stats.exams {
        debug!(
            "[试卷 {}] 目标 {} 题 / 选中 {} 题 / 共 {} 个题块{}",
            exam.exam_id,
            exam.target,
            exam.selected,
            exam.block_count,
            if exam.fallback { " ⚠️ 兜底" } else { "" }
        );
    }
}

/// 打印组卷结果统计
pub fn print_assembly_summary(assembled: &AssembledExam, stats: &AssemblyStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 组卷完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📚 参与试卷: {}", stats.exams.len());
    info!(
        "🎯 目标题量之和: {} (基准 {})",
        stats.total_target(),
        assembled.base
    );
    info!(
        "✅ 最终题量: {}/{} (合并 {} 个题块，截断丢弃 {} 个)",
        assembled.count, assembled.max, stats.pooled_blocks, stats.dropped_blocks
    );
    if stats.global_fallback {
        info!("⚠️ 触发全局兜底：结果为单个超过上限的题块");
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_text_counts_chars() {
        assert_eq!(truncate_text("阅读下面的材料", 4), "阅读下面...");
        assert_eq!(truncate_text("短", 4), "短");
    }
}
