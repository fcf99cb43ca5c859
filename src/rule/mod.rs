//! 规则模块：分类规则模型定义、规则表加载与启动期校验
pub mod matcher;

#[cfg(feature = "embedded-rules")]
pub mod builtin;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use crate::error::{ClassifyError, ClsResult};

pub use matcher::Matcher;

/// 匹配方式枚举，标记每条规则的匹配语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// 大小写敏感的字面子串匹配
    Substring,
    /// 忽略大小写的整词匹配（字面量转义后包裹词边界）
    WholeWord,
}

impl Default for MatchKind {
    fn default() -> Self {
        MatchKind::Substring
    }
}

impl Display for MatchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Substring => write!(f, "substring"),
            MatchKind::WholeWord => write!(f, "whole_word"),
        }
    }
}

/// 单条声明式匹配规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    #[serde(default)]
    pub kind: MatchKind,
    pub text: String,
}

impl MatchRule {
    pub fn substring(text: impl Into<String>) -> Self {
        Self {
            kind: MatchKind::Substring,
            text: text.into(),
        }
    }

    pub fn whole_word(text: impl Into<String>) -> Self {
        Self {
            kind: MatchKind::WholeWord,
            text: text.into(),
        }
    }
}

/// 分类定义：俄语标签 + 有序规则列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub rules: Vec<MatchRule>,
}

/// 规则表：按配置顺序排列的分类集合
/// 处理顺序即配置顺序，输出排序是另一回事（见report模块）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub categories: Vec<Category>,
}

impl RuleTable {
    /// 启动期校验规则表
    /// 1. 非空检查
    /// 2. 标签唯一性检查
    /// 3. 每个分类至少一条规则、规则文本非空
    /// 4. 整词规则前置编译（正则错误提前暴露）
    pub fn validate(&self) -> ClsResult<()> {
        if self.categories.is_empty() {
            return Err(ClassifyError::RuleConfigError("规则表为空".into()));
        }

        let mut seen_labels: FxHashSet<&str> = FxHashSet::default();
        for category in &self.categories {
            if category.label.is_empty() {
                return Err(ClassifyError::RuleConfigError("分类标签为空".into()));
            }
            if !seen_labels.insert(category.label.as_str()) {
                return Err(ClassifyError::RuleConfigError(format!(
                    "重复的分类标签：{}",
                    category.label
                )));
            }
            if category.rules.is_empty() {
                return Err(ClassifyError::RuleConfigError(format!(
                    "分类[{}]没有任何规则",
                    category.label
                )));
            }
            for rule in &category.rules {
                if rule.text.is_empty() {
                    return Err(ClassifyError::RuleConfigError(format!(
                        "分类[{}]存在空规则文本",
                        category.label
                    )));
                }
                Matcher::precompile(rule)?;
            }
        }

        log::debug!(
            "规则表校验通过：分类数={}, 规则总数={}",
            self.categories.len(),
            self.categories.iter().map(|c| c.rules.len()).sum::<usize>()
        );
        Ok(())
    }

    /// 从JSON文本解析规则表（含校验）
    pub fn from_json_str(json: &str) -> ClsResult<Self> {
        let table: RuleTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// 从本地JSON文件加载规则表（含校验）
    pub fn from_json_file(path: &Path) -> ClsResult<Self> {
        if !path.exists() {
            return Err(ClassifyError::RuleConfigError(format!(
                "规则表文件不存在：{}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// 分类数量
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
