//! skins2type 命令行入口
//! 执行流程：
//! 1. 初始化日志系统
//! 2. 加载规则表（嵌入式或外部JSON）
//! 3. 加载物品目录并逐条校验
//! 4. 执行分类与覆盖率统计
//! 5. 写出汇总JSON并按覆盖率决定退出码

use clap::Parser;
use env_logger::{Builder, Env, Target};
use std::path::PathBuf;
use std::process;

use skins2type::error::{EXIT_LOW_COVERAGE, EXIT_OK};
use skins2type::{
    build_summaries, load_catalog, write_report, ClassifyConfig, Classifier, ClsResult, RuleTable,
};

#[derive(Parser, Debug)]
#[command(
    name = "skins2type",
    version,
    about = "Classify a game item catalog into Russian category buckets and report coverage"
)]
struct Cli {
    /// 物品目录输入路径（JSON数组）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 分类汇总输出路径
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 外部规则表路径（缺省使用嵌入式规则表）
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// 覆盖率阈值（百分比），低于该值退出码为2
    #[arg(short, long)]
    threshold: Option<f64>,
}

impl Cli {
    /// CLI参数合并到运行配置，未指定项保持默认值
    fn into_config(self) -> ClassifyConfig {
        let mut builder = ClassifyConfig::custom().rules_path(self.rules);
        if let Some(input) = self.input {
            builder = builder.input_path(input);
        }
        if let Some(output) = self.output {
            builder = builder.output_path(output);
        }
        if let Some(threshold) = self.threshold {
            builder = builder.coverage_threshold(threshold);
        }
        builder.build()
    }
}

/// 规则表加载：外部路径优先，其次嵌入式规则表
fn load_rule_table(config: &ClassifyConfig) -> ClsResult<RuleTable> {
    match &config.rules_path {
        Some(path) => {
            log::info!("加载外部规则表：{}", path.display());
            RuleTable::from_json_file(path)
        }
        None => default_rule_table(),
    }
}

#[cfg(feature = "embedded-rules")]
fn default_rule_table() -> ClsResult<RuleTable> {
    Ok(skins2type::builtin_table())
}

#[cfg(not(feature = "embedded-rules"))]
fn default_rule_table() -> ClsResult<RuleTable> {
    Err(skins2type::ClassifyError::RuleConfigError(
        "embedded-rules feature未启用，必须通过--rules指定规则表".into(),
    ))
}

fn run(config: &ClassifyConfig) -> ClsResult<i32> {
    // ========== 1. 规则表加载与分类器构建 ==========
    let table = load_rule_table(config)?;
    let classifier = Classifier::new(table)?;

    // ========== 2. 目录加载 ==========
    let items = load_catalog(&config.input_path)?;
    println!("Loaded {} items from {}", items.len(), config.input_path.display());

    // ========== 3. 分类与覆盖率统计 ==========
    let (results, report) = classifier.classify(&items);

    // ========== 4. 汇总写出 ==========
    let summaries = build_summaries(&results);
    write_report(&config.output_path, &summaries)?;
    println!("Successfully updated {}", config.output_path.display());

    // ========== 5. 控制台汇报 ==========
    println!("Total categories: {}", summaries.len());
    println!(
        "Unique covered: {}/{}",
        report.total_unique_matched, report.total_items
    );
    println!("Coverage: {:.2}%", report.coverage_pct);
    if !report.missing_ids.is_empty() {
        let missing = report
            .missing_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!("Missing IDs ({}): {}", report.missing_ids.len(), missing);
    }

    // 低覆盖不是错误：输出已写出，仅以退出码2提示
    if report.is_below(config.coverage_threshold) {
        println!(
            "Warning: coverage is below {:.2}%!",
            config.coverage_threshold
        );
        return Ok(EXIT_LOW_COVERAGE);
    }

    Ok(EXIT_OK)
}

fn main() {
    // 日志级别默认info，输出到标准输出
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let config = Cli::parse().into_config();

    match run(&config) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    }
}
