//! 汇总输出模块
//! 分类结果到输出JSON模型的转换与落盘
//! 输出数组已按item_count降序（排序在classifier完成），ids为升序逗号串

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::classifier::ClassificationResult;
use crate::error::ClsResult;

/// 单个分类的输出行
/// 字段名与既有下游消费方约定保持一致（type_ru / ids / item_count）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// 升序逗号拼接的ID串，空分类为空串
    pub ids: String,
    /// 俄语分类标签
    pub type_ru: String,
    pub item_count: usize,
}

impl From<&ClassificationResult> for CategorySummary {
    fn from(result: &ClassificationResult) -> Self {
        let ids = result
            .ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            ids,
            type_ru: result.label.clone(),
            item_count: result.item_count,
        }
    }
}

/// 分类结果批量转输出行
pub fn build_summaries(results: &[ClassificationResult]) -> Vec<CategorySummary> {
    results.iter().map(CategorySummary::from).collect()
}

/// 渲染输出JSON文本
/// 2空格缩进，非ASCII字符不转义（Cyrillic标签按原样输出）
pub fn render_report(summaries: &[CategorySummary]) -> ClsResult<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// 写出汇总文件
/// 父目录不存在时自动创建
pub fn write_report(path: &Path, summaries: &[CategorySummary]) -> ClsResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let rendered = render_report(summaries)?;
    fs::write(path, rendered)?;
    log::debug!("汇总写入完成：{}", path.display());
    Ok(())
}
