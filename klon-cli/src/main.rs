//! Klon CLI - Command line interface
//!
//! Project-based execution - all configuration from klon.json

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

mod config;
mod input;
mod logging;
mod platform;
mod showcase;

use crate::platform::print_error_with_source;
use klon_api::{copy_with_config, init_config, KlonError, RunConfig};

/// klon.json 结构
#[derive(Debug, serde::Deserialize)]
struct KlonJson {
    /// 输入文档路径
    entry: String,
    /// 拷贝配置
    copy: Option<CopyOptions>,
}

/// 拷贝配置
#[derive(Debug, serde::Deserialize)]
struct CopyOptions {
    /// 是否打印运行统计
    show_stats: Option<bool>,
    /// 是否输出拷贝结果
    dump_value: Option<bool>,
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    log_level: Option<String>,
}

#[derive(Parser)]
#[command(
    name = "klon",
    about = "Klon structural deep-copy engine - Project-based execution",
    version = "0.1.0"
)]
struct Cli {
    /// Configuration file path (default: ./klon.json)
    #[arg(value_name = "CONFIG", default_value = "klon.json")]
    config: PathBuf,

    /// Run the built-in showcase graphs (cycles, aliasing, buffers, host nodes)
    #[arg(long)]
    showcase: bool,

    /// Enable CLI-side tracing diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init(&config::LogConfig::default(), logging::LogFormat::Compact);
    }

    if cli.showcase {
        let run_config = RunConfig::from_options(true, false, None);
        init_config(run_config.clone());
        showcase::run(&run_config);
        return;
    }

    // Read klon.json
    let project = match read_klon_json(&cli.config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Resolve entry file path (relative to klon.json directory)
    let entry_path = resolve_entry_path(&cli.config, &project.entry);
    tracing::debug!(target: "klon::cli", "entry resolved to {}", entry_path.display());

    // Read input document
    let source = match std::fs::read_to_string(&entry_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "Error: Cannot read entry file '{}': {}",
                entry_path.display(),
                e
            );
            process::exit(1);
        }
    };

    // Build run configuration from klon.json
    let run_config = build_run_config(&project);

    // Initialize API config (global singleton for convenience)
    init_config(run_config.clone());

    handle_run(&source, run_config);
}

/// Read and parse klon.json
fn read_klon_json(path: &Path) -> Result<KlonJson, String> {
    if !path.exists() {
        return Err(format!(
            "未找到 '{}'\n\n当前目录不是一个 Klon 项目。\n提示: 创建 '{}' 文件并指定 'entry' 字段",
            path.display(),
            path.display()
        ));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("无法读取 '{}': {}", path.display(), e))?;

    let project: KlonJson = serde_json::from_str(&content)
        .map_err(|e| format!("解析 '{}' 失败: {}", path.display(), e))?;

    if project.entry.is_empty() {
        return Err(format!("'{}' 中的 'entry' 字段不能为空", path.display()));
    }

    Ok(project)
}

/// Resolve entry file path relative to klon.json directory
fn resolve_entry_path(project_path: &Path, entry: &str) -> PathBuf {
    let base_dir = project_path.parent().unwrap_or(Path::new("."));
    base_dir.join(entry)
}

/// Build run configuration from klon.json
fn build_run_config(project: &KlonJson) -> RunConfig {
    let options = project.copy.as_ref();

    let show_stats = options.and_then(|c| c.show_stats).unwrap_or(false);
    let dump_value = options.and_then(|c| c.dump_value).unwrap_or(false);

    let log_level = options
        .and_then(|c| c.log_level.as_ref())
        .and_then(|s| parse_log_level(s));

    RunConfig::from_options(show_stats, dump_value, log_level)
}

/// Parse log level string
fn parse_log_level(s: &str) -> Option<klon_api::LogLevel> {
    use klon_api::LogLevel;
    match s.to_lowercase().as_str() {
        "silent" => Some(LogLevel::Error), // silent = only errors
        "error" => Some(LogLevel::Error),
        "warn" => Some(LogLevel::Warn),
        "info" => Some(LogLevel::Info),
        "debug" => Some(LogLevel::Debug),
        "trace" => Some(LogLevel::Trace),
        _ => None,
    }
}

fn handle_run(source: &str, config: RunConfig) {
    tracing::debug!(target: "klon::cli", "parsing input document");

    let value = match input::parse_document(source) {
        Ok(value) => value,
        Err(e) => {
            let (line, column) = (e.line, e.column);
            let err: KlonError = e.into();
            print_error_with_source(&err, source, line, column);
            process::exit(1);
        }
    };

    let output = copy_with_config(&value, &config);

    // 拷贝结果是程序的输出本身；统计信息按需附加
    if config.dump_value || !config.show_stats {
        println!("{}", output.value);
    }
    if config.show_stats {
        println!("✅ Copy successful ({})", output.stats);
    }
}
