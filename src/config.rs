use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::assembled::{DEFAULT_BASE, DEFAULT_MAX};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 试卷数据目录（包含 exams.toml 和各试卷的题目文件）
    pub exam_folder: String,
    /// 基准题量
    pub base_size: i64,
    /// 总题量上限
    pub max_size: i64,
    /// 随机种子；不设置时每次组卷结果不同
    pub random_seed: Option<u64>,
    /// 是否把相对图片路径补全为绝对地址
    pub absolute_images: bool,
    /// 图片基础地址
    pub image_base_url: String,
    /// 同时获取题目的试卷数量
    pub max_concurrent_fetches: usize,
    /// 组卷结果输出文件
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_folder: "exams".to_string(),
            base_size: DEFAULT_BASE as i64,
            max_size: DEFAULT_MAX as i64,
            random_seed: None,
            absolute_images: false,
            image_base_url: String::new(),
            max_concurrent_fetches: 16,
            output_file: "assembled_exam.json".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            exam_folder: std::env::var("EXAM_FOLDER").unwrap_or(default.exam_folder),
            base_size: env_or("BASE_SIZE", default.base_size),
            max_size: env_or("MAX_SIZE", default.max_size),
            random_seed: parse_env("RANDOM_SEED").unwrap_or_else(|e| {
                tracing::warn!("⚠️ {}，不使用固定种子", e);
                None
            }),
            absolute_images: env_or("ABSOLUTE_IMAGES", default.absolute_images),
            image_base_url: std::env::var("IMAGE_BASE_URL").unwrap_or(default.image_base_url),
            max_concurrent_fetches: env_or(
                "MAX_CONCURRENT_FETCHES",
                default.max_concurrent_fetches,
            ),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging),
        }
    }
}

/// 读取并解析环境变量；未设置时返回 `Ok(None)`
pub fn parse_env<T: FromStr>(var_name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => parse_value(var_name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(var_name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: std::any::type_name::<T>().to_string(),
        })
}

fn env_or<T: FromStr>(var_name: &str, default: T) -> T {
    match parse_env(var_name) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("⚠️ {}，使用默认值", e);
            default
        }
    }
}
