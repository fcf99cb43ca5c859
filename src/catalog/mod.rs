//! 目录模块：物品数据模型与加载校验
pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{load_catalog, parse_catalog};

/// 物品ID类型
pub type ItemId = u32;

/// 目录物品记录（不可变输入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
