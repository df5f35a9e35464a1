//! # Exam Assembly
//!
//! 按权重从多张试卷中随机抽题组卷
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、试卷、题块、组卷结果
//! - `models/loaders` - 基于 TOML 文件夹的数据源
//!
//! ### ② 业务能力层（Services）
//! - `block_builder` - 把题目划分为不可拆分的题块
//! - `quota` - 由权重和基准题量计算单卷目标
//! - `block_selector` - 随机贪心选块（含兜底规则）
//! - `image_resolver` - 图片地址补全（组卷后的可选后处理）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/exam_source` - 取数接口与并发获取
//! - `orchestrator/assembler` - 合并、全局洗牌、按上限截断
//! - `orchestrator/assembly_service` - 请求边界
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    AssembledExam, AssemblyParams, Block, Exam, ExamMeta, Question, TomlExamRepository,
};
pub use orchestrator::{
    fetch_exam_pool, Assembler, AssemblyRequest, AssemblyService, ExamRepository,
    InMemoryExamRepository,
};
