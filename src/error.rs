use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 数据源错误
    #[error("数据源错误: {0}")]
    Source(#[from] SourceError),
    /// 题目校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 数据源错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 试卷列表获取失败
    #[error("无法获取试卷列表: {source}")]
    ListFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 单个试卷的题目获取失败
    #[error("无法获取试卷 {exam_id} 的题目: {source}")]
    QuestionsFailed {
        exam_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 并发任务执行失败
    #[error("获取任务执行失败 (试卷: {exam_id}): {message}")]
    TaskFailed { exam_id: String, message: String },
}

/// 题目校验错误（仅用于数据录入层）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 题目ID为空
    #[error("题目ID不能为空")]
    EmptyQuestionId,
    /// 没有选项
    #[error("题目 {question_id} 没有任何选项")]
    NoOptions { question_id: String },
    /// 正确答案索引超出范围
    #[error("题目 {question_id} 的正确答案索引 {index} 超出范围 [0, {option_count})")]
    AnswerOutOfRange {
        question_id: String,
        index: i64,
        option_count: usize,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建题目获取失败错误
    pub fn questions_failed(
        exam_id: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AppError::Source(SourceError::QuestionsFailed {
            exam_id: exam_id.into(),
            source: source.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
