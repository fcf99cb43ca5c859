//! 目录加载器
//! 从本地JSON文件读取物品目录，逐条校验记录并拒绝重复ID
//! 任何一条记录非法即整体失败，不产生部分结果

use rustc_hash::FxHashSet;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{ClassifyError, ClsResult};

use super::{Item, ItemId};

/// 记录预览最大长度（错误信息用）
const RECORD_PREVIEW_LEN: usize = 120;

/// 截断记录文本用于错误提示
fn preview(value: &Value) -> String {
    let raw = value.to_string();
    if raw.chars().count() <= RECORD_PREVIEW_LEN {
        return raw;
    }
    let truncated: String = raw.chars().take(RECORD_PREVIEW_LEN).collect();
    format!("{}...", truncated)
}

/// 从JSON文本解析物品目录
/// 逐条校验：id必须为非负整数、name必须为字符串；额外字段忽略
/// 重复id视为非法输入（详见DESIGN.md的开放问题裁定）
pub fn parse_catalog(json: &str) -> ClsResult<Vec<Item>> {
    let records: Vec<Value> = serde_json::from_str(json)?;

    let mut items = Vec::with_capacity(records.len());
    let mut seen_ids: FxHashSet<ItemId> = FxHashSet::default();

    for (index, record) in records.iter().enumerate() {
        let obj = record.as_object().ok_or_else(|| ClassifyError::MalformedRecord {
            index,
            detail: format!("记录不是JSON对象：{}", preview(record)),
        })?;

        let id = obj
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| ItemId::try_from(id).ok())
            .ok_or_else(|| ClassifyError::MalformedRecord {
                index,
                detail: format!("缺少或非法的id字段：{}", preview(record)),
            })?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ClassifyError::MalformedRecord {
                index,
                detail: format!("缺少或非法的name字段：{}", preview(record)),
            })?;

        if !seen_ids.insert(id) {
            return Err(ClassifyError::DuplicateId { id, index });
        }

        items.push(Item::new(id, name));
    }

    log::debug!("目录解析完成：记录数={}", items.len());
    Ok(items)
}

/// 从本地文件加载物品目录
/// 文件不存在直接返回InputNotFound，不做任何兜底
pub fn load_catalog(path: &Path) -> ClsResult<Vec<Item>> {
    if !path.exists() {
        return Err(ClassifyError::InputNotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;
    parse_catalog(&raw)
}
