use anyhow::Result;
use exam_assembly::utils::logging;
use exam_assembly::{AppError, AssemblyRequest, AssemblyService, Config, TomlExamRepository};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let service = AssemblyService::new(TomlExamRepository::new(&config.exam_folder), &config);
    let request = AssemblyRequest::from_config(&config);

    let assembled = service.handle(&request).await?;

    let json = serde_json::to_string_pretty(&assembled)?;
    tokio::fs::write(&config.output_file, json)
        .await
        .map_err(|e| AppError::file_write_failed(&config.output_file, e))?;

    info!("\n组卷结果已保存至: {}", config.output_file);

    Ok(())
}
