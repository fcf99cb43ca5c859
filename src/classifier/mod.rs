//! 分类模块：规则表驱动的目录分类与覆盖率统计
pub mod classifier;

pub use classifier::{ClassificationResult, Classifier, CoverageReport};
