//! 嵌入式默认规则表
//! 物品分类的固定配置：15个俄语分类桶与各自的名称匹配规则
//! 配置顺序即处理顺序，不随输入数据变化

use super::{Category, MatchKind, MatchRule, RuleTable};

/// 默认分类配置（标签、匹配方式、规则字面量）
/// 仅"Медали"与"Фрагменты"两类使用整词匹配，其余均为大小写敏感子串
const BUILTIN_CATEGORIES: &[(&str, MatchKind, &[&str])] = &[
    ("Брелоки", MatchKind::Substring, &["Chibi ", "Charm "]),
    (
        "Винтовки",
        MatchKind::Substring,
        &[
            "AKR ", "AKR12 ", "FAMAS ", "FN FAL ", "M16 ", "M4 ", "M4A1 ", "VAL ",
        ],
    ),
    (
        "Гранаты",
        MatchKind::Substring,
        &["HE ", "Smoke ", "Flash ", "Molotov ", "Thermite "],
    ),
    ("Граффити", MatchKind::Substring, &["Graffiti "]),
    (
        "Контейнеры",
        MatchKind::Substring,
        &[
            " Box",
            " Case",
            "Charm Pack",
            "Gift Box",
            "Gloves Case",
            "Graffiti Pack",
            "Knife Case",
            "Sticker Pack",
            "Weapon Box",
            "Weapon Case",
            " Crate",
            "Gift Case",
            "Fragment Box",
        ],
    ),
    ("Наклейки", MatchKind::Substring, &["Sticker "]),
    (
        "Ножи",
        MatchKind::Substring,
        &[
            "Butterfly ",
            "Dual Daggers ",
            "Fang ",
            "Flip ",
            "jKommando ",
            "Karambit ",
            "Kukri ",
            "Kunai ",
            "M9 Bayonet ",
            "Mantis ",
            "Scorpion ",
            "Stiletto ",
            "Sting ",
            "Tanto ",
        ],
    ),
    ("Перчатки", MatchKind::Substring, &["Gloves "]),
    (
        "Пистолеты",
        MatchKind::Substring,
        &[
            "Berettas ",
            "Desert Eagle ",
            "F/S ",
            "G22 ",
            "P350 ",
            "TEC-9 ",
            "USP ",
        ],
    ),
    (
        "ПП",
        MatchKind::Substring,
        &["Akimbo Uzi ", "MAC10 ", "MP5 ", "MP7 ", "P90 ", "UMP45 "],
    ),
    ("Снайперские", MatchKind::Substring, &["AWM ", "M110 ", "M40 "]),
    (
        "Тяжелое",
        MatchKind::Substring,
        &["FabM ", "M60 ", "SM1014 ", "SPAS "],
    ),
    ("Фрагменты", MatchKind::WholeWord, &["Fragment"]),
    ("Медали", MatchKind::WholeWord, &["Medal"]),
];

/// 获取嵌入式默认规则表
pub fn builtin_table() -> RuleTable {
    let categories = BUILTIN_CATEGORIES
        .iter()
        .map(|(label, kind, patterns)| Category {
            label: (*label).to_string(),
            rules: patterns
                .iter()
                .map(|text| MatchRule {
                    kind: *kind,
                    text: (*text).to_string(),
                })
                .collect(),
        })
        .collect();

    RuleTable { categories }
}
