use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

use crate::error::ClsResult;

use super::{MatchKind, MatchRule};

/// 全局空正则常量（预编译，用于错误回退）
/// 零拷贝、零分配，全局复用
pub static EMPTY_REGEX_ARC: Lazy<Arc<Regex>> = Lazy::new(|| Arc::new(Regex::new(r"^$").unwrap()));

/// 全局整词正则缓存
/// Key: 规则字面量字符串
/// Value: 编译后的正则Arc（避免重复编译）
pub static REGEX_CACHE: Lazy<RwLock<FxHashMap<Arc<String>, Arc<Regex>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// 构建整词匹配的正则模式文本
/// 字面量先转义再包裹词边界，杜绝把规则文本当正则语法解释
#[inline]
fn word_boundary_pattern(literal: &str) -> String {
    format!(r"\b{}\b", regex::escape(literal))
}

/// 运行时匹配器（非序列化）
/// 核心特性：
/// 1. 子串匹配零开销（直接contains）
/// 2. 整词正则懒加载编译（首次匹配时编译）
/// 3. 全局正则缓存（避免重复编译）
/// 4. Arc封装字符串（零拷贝）
#[derive(Debug, Clone)]
pub enum Matcher {
    /// 包含匹配（大小写敏感子串）
    Contains(Arc<String>),
    /// 懒加载整词正则匹配（忽略大小写）
    LazyWholeWord {
        /// 规则字面量（Arc封装）
        literal: Arc<String>,
    },
}

impl Matcher {
    /// 从声明式规则构建运行时匹配器
    pub fn from_rule(rule: &MatchRule) -> Self {
        match rule.kind {
            MatchKind::Substring => Self::Contains(Arc::new(rule.text.clone())),
            MatchKind::WholeWord => Self::LazyWholeWord {
                literal: Arc::new(rule.text.clone()),
            },
        }
    }

    /// 执行匹配（核心匹配逻辑）
    /// 参数：input - 待匹配的物品名称
    /// 返回：匹配结果（bool）
    #[inline(always)]
    pub fn matches(&self, input: &str) -> bool {
        match self {
            Matcher::Contains(s) => input.contains(s.as_str()),
            Matcher::LazyWholeWord { .. } => self.get_compiled_regex().is_match(input),
        }
    }

    /// 获取编译后的正则（懒加载+全局缓存）
    /// 核心逻辑：读锁查缓存 → 未命中则写锁编译并缓存
    #[inline(always)]
    fn get_compiled_regex(&self) -> Arc<Regex> {
        match self {
            Matcher::LazyWholeWord { literal } => {
                // Arc clone仅增加引用计数，零拷贝
                let cache_key = literal.clone();

                // 1. 读锁查询缓存（无锁竞争）
                let cache_read = REGEX_CACHE.read().unwrap();
                if let Some(re) = cache_read.get(&cache_key) {
                    return re.clone();
                }
                drop(cache_read); // 显式释放读锁

                // 2. 写锁编译并插入缓存（仅缓存未命中时执行）
                let mut cache_write = REGEX_CACHE.write().unwrap();
                cache_write
                    .entry(cache_key)
                    .or_insert_with(|| Self::compile_regex(literal.as_str()))
                    .clone()
            }
            // 非正则类型返回全局空正则（零拷贝）
            _ => EMPTY_REGEX_ARC.clone(),
        }
    }

    /// 正则编译公共逻辑（带错误处理）
    /// 字面量经过转义，正常情况下编译不会失败；失败则回退空正则并记录告警
    #[inline]
    fn compile_regex(literal: &str) -> Arc<Regex> {
        RegexBuilder::new(&word_boundary_pattern(literal))
            .case_insensitive(true)
            .build()
            .map_or_else(
                |e| {
                    log::warn!("Regex compilation failed: literal={} error={}", literal, e);
                    EMPTY_REGEX_ARC.clone()
                },
                |re| Arc::new(re),
            )
    }

    /// 规则表校验用的前置编译检查
    /// 启动期逐条编译整词规则，把正则错误提前暴露为配置错误
    pub fn precompile(rule: &MatchRule) -> ClsResult<()> {
        if rule.kind == MatchKind::WholeWord {
            RegexBuilder::new(&word_boundary_pattern(&rule.text))
                .case_insensitive(true)
                .build()?;
        }
        Ok(())
    }

    /// 描述匹配器规则（用于日志/调试输出）
    #[inline(always)]
    pub fn describe(&self) -> String {
        match self {
            Matcher::Contains(s) => format!("contains: {}", s),
            Matcher::LazyWholeWord { literal } => format!("whole_word: {}", literal),
        }
    }
}
