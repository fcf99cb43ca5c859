//! 分类核心逻辑
//! 对不可变的物品目录做只读扫描：每个分类独立累积命中ID，
//! 之后统一做去重、排序、哨兵剔除与全局覆盖率统计

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::catalog::{Item, ItemId};
use crate::error::ClsResult;
use crate::rule::{Matcher, RuleTable};

/// 手工剔除的哨兵ID：无论是否命中规则，都从"Контейнеры"分类移除
/// 单点特例，不做通用机制
const CONTAINERS_LABEL: &str = "Контейнеры";
const CONTAINER_SENTINEL_ID: ItemId = 5101;

/// 单个分类的命中结果
/// ids已去重并升序排列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub label: String,
    pub ids: Vec<ItemId>,
    pub item_count: usize,
}

/// 全目录覆盖率报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub total_items: usize,
    pub total_unique_matched: usize,
    pub missing_ids: Vec<ItemId>,
    pub coverage_pct: f64,
}

impl CoverageReport {
    /// 覆盖率是否低于阈值（百分比）
    /// 阈值本身算达标，严格小于才算低覆盖
    #[inline]
    pub fn is_below(&self, threshold: f64) -> bool {
        self.coverage_pct < threshold
    }
}

impl std::fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "覆盖率 {:.2}%（{}/{}，缺失{}项）",
            self.coverage_pct,
            self.total_unique_matched,
            self.total_items,
            self.missing_ids.len()
        )
    }
}

/// 编译后的分类（标签 + 运行时匹配器列表）
#[derive(Debug, Clone)]
struct CompiledCategory {
    label: String,
    matchers: Vec<Matcher>,
}

/// 目录分类器
/// 持有编译后的规则表，classify本身是纯函数：同一输入必得同一输出
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<CompiledCategory>,
}

impl Classifier {
    /// 从规则表构建分类器
    /// 构建期完成规则表校验与匹配器编译，运行期不再失败
    pub fn new(table: RuleTable) -> ClsResult<Self> {
        table.validate()?;

        let categories = table
            .categories
            .iter()
            .map(|category| CompiledCategory {
                label: category.label.clone(),
                matchers: category.rules.iter().map(Matcher::from_rule).collect(),
            })
            .collect();

        Ok(Self { categories })
    }

    /// 执行分类
    /// 返回：按item_count降序（稳定排序，平局保持配置顺序）的分类结果 + 覆盖率报告
    pub fn classify(&self, items: &[Item]) -> (Vec<ClassificationResult>, CoverageReport) {
        let mut results = Vec::with_capacity(self.categories.len());
        let mut global_matched: FxHashSet<ItemId> = FxHashSet::default();

        // 按配置顺序逐分类扫描，各分类累积器相互独立
        for category in &self.categories {
            let mut matched: FxHashSet<ItemId> = FxHashSet::default();
            for matcher in &category.matchers {
                for item in items {
                    if matcher.matches(&item.name) {
                        matched.insert(item.id);
                    }
                }
            }

            // 哨兵剔除：仅作用于"Контейнеры"分类
            if category.label == CONTAINERS_LABEL {
                matched.remove(&CONTAINER_SENTINEL_ID);
            }

            global_matched.extend(matched.iter().copied());

            let mut ids: Vec<ItemId> = matched.into_iter().collect();
            ids.sort_unstable();

            results.push(ClassificationResult {
                label: category.label.clone(),
                item_count: ids.len(),
                ids,
            });
        }

        // 全局统计：缺失ID集合与去重覆盖率
        let mut missing_ids: Vec<ItemId> = items
            .iter()
            .map(|item| item.id)
            .filter(|id| !global_matched.contains(id))
            .collect();
        missing_ids.sort_unstable();

        let total_items = items.len();
        let coverage_pct = if total_items == 0 {
            // 空目录覆盖率定义为0，不触发除零
            0.0
        } else {
            global_matched.len() as f64 * 100.0 / total_items as f64
        };

        let report = CoverageReport {
            total_items,
            total_unique_matched: global_matched.len(),
            missing_ids,
            coverage_pct,
        };

        // 输出排序：item_count降序，稳定排序保证平局时维持配置顺序
        results.sort_by(|a, b| b.item_count.cmp(&a.item_count));

        log::debug!(
            "分类完成：分类数={}, 唯一覆盖={}, 覆盖率={:.2}%",
            results.len(),
            report.total_unique_matched,
            report.coverage_pct
        );

        (results, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::builtin::builtin_table;
    use crate::rule::{Category, MatchRule, RuleTable};

    fn builtin_classifier() -> Classifier {
        Classifier::new(builtin_table()).unwrap()
    }

    fn find<'a>(results: &'a [ClassificationResult], label: &str) -> &'a ClassificationResult {
        results.iter().find(|r| r.label == label).unwrap()
    }

    #[test]
    fn test_end_to_end_example() {
        let items = vec![
            Item::new(1, "Karambit | Doppler"),
            Item::new(2, "Gold Medal"),
            Item::new(3, "Unknown Thing"),
        ];
        let (results, report) = builtin_classifier().classify(&items);

        assert_eq!(find(&results, "Ножи").ids, vec![1]);
        assert_eq!(find(&results, "Медали").ids, vec![2]);
        assert_eq!(report.missing_ids, vec![3]);
        assert_eq!(report.total_unique_matched, 2);
        assert!((report.coverage_pct - 66.6666).abs() < 0.001);
        assert!(report.is_below(90.0));
    }

    #[test]
    fn test_whole_word_does_not_match_partial() {
        let items = vec![
            Item::new(1, "Gold Medal"),
            Item::new(2, "Medallion of the Deep"),
        ];
        let (results, _) = builtin_classifier().classify(&items);
        assert_eq!(find(&results, "Медали").ids, vec![1]);
    }

    #[test]
    fn test_container_sentinel_excluded() {
        let items = vec![
            Item::new(5101, "Winter Gift Box"),
            Item::new(5102, "Winter Gift Box II"),
        ];
        let (results, report) = builtin_classifier().classify(&items);

        let containers = find(&results, "Контейнеры");
        assert_eq!(containers.ids, vec![5102]);
        assert_eq!(containers.item_count, 1);
        // 剔除出分类的哨兵也不计入全局覆盖
        assert!(report.missing_ids.contains(&5101));
    }

    #[test]
    fn test_ids_deduplicated_and_sorted() {
        // "Fragment Box"同时命中Контейнеры的多条规则（" Box"与"Fragment Box"）
        let items = vec![
            Item::new(30, "Ancient Fragment Box"),
            Item::new(10, "Mystery Gift Box"),
        ];
        let (results, _) = builtin_classifier().classify(&items);
        let containers = find(&results, "Контейнеры");
        assert_eq!(containers.ids, vec![10, 30]);
    }

    #[test]
    fn test_overlap_counts_once_globally() {
        // 同时命中Контейнеры与Фрагменты，两个分类各计一次，全局只计一次
        let items = vec![Item::new(1, "Ancient Fragment Box")];
        let (results, report) = builtin_classifier().classify(&items);

        let per_category_sum: usize = results.iter().map(|r| r.item_count).sum();
        assert_eq!(per_category_sum, 2);
        assert_eq!(report.total_unique_matched, 1);
        assert!(per_category_sum >= report.total_unique_matched);
    }

    #[test]
    fn test_missing_and_matched_partition_input() {
        let items = vec![
            Item::new(1, "Karambit | Fade"),
            Item::new(2, "Gold Medal"),
            Item::new(3, "Unknown Thing"),
            Item::new(4, "Another Unknown"),
        ];
        let (results, report) = builtin_classifier().classify(&items);

        let mut matched: Vec<ItemId> = results.iter().flat_map(|r| r.ids.iter().copied()).collect();
        matched.sort_unstable();
        matched.dedup();

        // missing ∩ matched = ∅
        assert!(report.missing_ids.iter().all(|id| !matched.contains(id)));
        // missing ∪ matched = 全部输入ID
        let mut union: Vec<ItemId> = matched
            .iter()
            .chain(report.missing_ids.iter())
            .copied()
            .collect();
        union.sort_unstable();
        assert_eq!(union, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_catalog_coverage_zero() {
        let (results, report) = builtin_classifier().classify(&[]);
        assert_eq!(results.len(), 15);
        assert_eq!(report.coverage_pct, 0.0);
        assert_eq!(report.total_items, 0);
        assert!(report.missing_ids.is_empty());
    }

    #[test]
    fn test_output_sorted_by_count_desc_stable() {
        let table = RuleTable {
            categories: vec![
                Category {
                    label: "Первый".into(),
                    rules: vec![MatchRule::substring("alpha")],
                },
                Category {
                    label: "Второй".into(),
                    rules: vec![MatchRule::substring("beta")],
                },
                Category {
                    label: "Третий".into(),
                    rules: vec![MatchRule::substring("gamma")],
                },
            ],
        };
        let classifier = Classifier::new(table).unwrap();
        let items = vec![
            Item::new(1, "beta one"),
            Item::new(2, "beta two"),
            Item::new(3, "alpha one"),
            Item::new(4, "gamma one"),
        ];
        let (results, _) = classifier.classify(&items);

        assert_eq!(results[0].label, "Второй");
        // 平局（各1项）保持配置顺序：Первый在Третий之前
        assert_eq!(results[1].label, "Первый");
        assert_eq!(results[2].label, "Третий");
    }

    #[test]
    fn test_coverage_threshold_boundary() {
        // 90/100命中 → 恰好90.00%，不算低覆盖
        let mut items: Vec<Item> = (0..90)
            .map(|i| Item::new(i, format!("Karambit | Fade {i}")))
            .collect();
        items.extend((90..100).map(|i| Item::new(i, format!("Unknown {i}"))));

        let (_, report) = builtin_classifier().classify(&items);
        assert_eq!(report.coverage_pct, 90.0);
        assert!(!report.is_below(90.0));

        // 89/100命中 → 低于阈值
        let mut items: Vec<Item> = (0..89)
            .map(|i| Item::new(i, format!("Karambit | Fade {i}")))
            .collect();
        items.extend((89..100).map(|i| Item::new(i, format!("Unknown {i}"))));

        let (_, report) = builtin_classifier().classify(&items);
        assert!(report.is_below(90.0));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let items = vec![
            Item::new(5, "Sticker | Team Alpha"),
            Item::new(3, "AWM | Dragon"),
            Item::new(9, "Gold Medal"),
        ];
        let classifier = builtin_classifier();
        let first = classifier.classify(&items);
        let second = classifier.classify(&items);
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }
}
