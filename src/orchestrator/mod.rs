//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `exam_source` - 试卷数据源
//! - 定义 `ExamRepository` 取数接口
//! - 并发获取每张试卷的题目（Semaphore 限流）
//!
//! ### `assembler` - 组卷器
//! - 逐卷构建题块、计算目标、随机选块
//! - 合并、全局洗牌、按上限截断
//!
//! ### `assembly_service` - 请求处理
//! - 参数归一化、随机源创建、图片地址后处理
//!
//! ## 层次关系
//!
//! ```text
//! assembly_service (处理一次请求)
//!     ↓
//! exam_source (取数) + assembler (组卷)
//!     ↓
//! services (能力层：block_builder / quota / block_selector / image_resolver)
//!     ↓
//! models
//! ```

pub mod assembler;
pub mod assembly_service;
pub mod exam_source;

// 重新导出主要类型
pub use assembler::Assembler;
pub use assembly_service::{AssemblyRequest, AssemblyService};
pub use exam_source::{fetch_exam_pool, ExamRepository, InMemoryExamRepository};
