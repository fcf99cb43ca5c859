//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认覆盖率阈值（百分比）
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 90.0;

/// 运行配置
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    // 物品目录输入路径
    pub input_path: PathBuf,
    // 分类汇总输出路径
    pub output_path: PathBuf,
    // 覆盖率阈值（百分比），低于该值进程以退出码2结束
    pub coverage_threshold: f64,
    // 外部规则表路径（None时使用嵌入式规则表）
    pub rules_path: Option<PathBuf>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/data.json"),
            output_path: PathBuf::from("data/id2type.json"),
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            rules_path: None,
        }
    }
}

impl ClassifyConfig {
    /// 自定义配置
    pub fn custom() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: ClassifyConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClassifyConfig::default(),
        }
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.config.input_path = path;
        self
    }

    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.config.output_path = path;
        self
    }

    pub fn coverage_threshold(mut self, threshold: f64) -> Self {
        self.config.coverage_threshold = threshold;
        self
    }

    pub fn rules_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.rules_path = path;
        self
    }

    pub fn build(self) -> ClassifyConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
