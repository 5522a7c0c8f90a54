//! Built-in rule table for Japanese supplement copy
//!
//! Covers claims that the Pharmaceutical and Medical Device Act (薬機法)
//! reserves for approved drugs: curing, treating or preventing disease,
//! pharmacological effects, body alteration, efficacy guarantees, absolute
//! safety and equivalence with medicines.
//!
//! Each pattern is a word root followed by an explicit alternation of its
//! inflectional endings, longest ending first so that leftmost-first
//! alternation consumes the whole predicate. Every documented surface form is
//! verified at compile time to be matched in full by its own rule.
//!
//! Known gap: the hiragana spelling やせる is not covered because the same
//! kana sequence occurs inside 増やせる and 燃やせる.

use crate::rule::{Rule, RulePack};
use claimguard_core::{Category, Severity};

/// Version of the built-in table
pub const BUILTIN_VERSION: &str = "2024.2";

/// Name reported for the built-in table
pub const BUILTIN_NAME: &str = "pmd-act-supplements";

struct BuiltinRule {
    name: &'static str,
    category: Category,
    severity: Severity,
    pattern: &'static str,
    replacement: &'static str,
    description: &'static str,
    surface_forms: &'static [&'static str],
}

const RULES: &[BuiltinRule] = &[
    BuiltinRule {
        name: "cure-verb",
        category: Category::DiseaseTreatment,
        severity: Severity::Critical,
        pattern: "治(?:りません|りました|ります|らない|らず|った|って|れば|ろう|る|り|しません|しました|します|さない|さず|した|して|せません|せました|せます|せない|せた|せて|せる|せば|そう|す|し)",
        replacement: "健やかな毎日をサポートします",
        description: "Claims that a product cures a disease are reserved for approved pharmaceuticals (薬機法 Art. 68).",
        surface_forms: &[
            "治る", "治ります", "治りました", "治りません", "治った", "治って", "治らない",
            "治れば", "治らず", "治す", "治します", "治した", "治して", "治さない", "治さず",
            "治せる", "治せます", "治せません", "治せない", "治せた", "治せて",
        ],
    },
    BuiltinRule {
        name: "treatment-noun",
        category: Category::DiseaseTreatment,
        severity: Severity::Critical,
        pattern: "(?:完治|根治|治癒|治療)(?:させます|させる|しました|します|する|した|して|できます|できる)?",
        replacement: "体調管理",
        description: "Treatment and complete-recovery wording describes a medical procedure, not a food.",
        surface_forms: &[
            "治療", "治療します", "治療する", "治療できます", "完治します", "完治する",
            "根治できる", "治癒しました",
        ],
    },
    BuiltinRule {
        name: "disease-name",
        category: Category::DiseaseReference,
        severity: Severity::High,
        pattern: "(?:糖尿病|高血圧症?|脂質異常症|高脂血症|動脈硬化症?|心筋梗塞|脳梗塞|がん細胞|癌|認知症|アルツハイマー病?|うつ病|アトピー(?:性皮膚炎)?|花粉症|骨粗しょう症|骨粗鬆症|リウマチ|痛風|不眠症|便秘症)",
        replacement: "体調",
        description: "Naming a disease in supplement copy implies the product acts on it.",
        surface_forms: &[
            "糖尿病", "高血圧", "高血圧症", "認知症", "アトピー", "アトピー性皮膚炎", "花粉症",
            "骨粗しょう症", "癌", "がん細胞",
        ],
    },
    BuiltinRule {
        name: "prevention",
        category: Category::DiseasePrevention,
        severity: Severity::Critical,
        pattern: "予防(?:できます|できる|します|しました|する|して|効果)?",
        replacement: "健康維持",
        description: "Disease prevention claims are pharmaceutical efficacy claims.",
        surface_forms: &["予防", "予防します", "予防しました", "予防できる", "予防効果"],
    },
    BuiltinRule {
        name: "efficacy-verb",
        category: Category::MedicalEffect,
        severity: Severity::High,
        pattern: "効(?:きません|きました|きます|かせます|かせる|かせた|かせて|かない|いた|いて|けば|く|き)",
        replacement: "お役立ていただけます",
        description: "Saying a product 'works' on the body asserts a pharmacological effect.",
        surface_forms: &[
            "効く", "効きます", "効きました", "効かない", "効いた", "効いて", "効けば", "効かせる",
            "効かせます",
        ],
    },
    BuiltinRule {
        name: "improvement",
        category: Category::MedicalEffect,
        severity: Severity::High,
        pattern: "改善(?:されます|される|させます|させる|しました|します|する|した|して|できます|できる|効果)?",
        replacement: "コンディション維持",
        description: "Improvement of symptoms or constitution is a medical effect claim.",
        surface_forms: &["改善", "改善します", "改善する", "改善される", "改善できる", "改善効果"],
    },
    BuiltinRule {
        name: "weight-loss",
        category: Category::BodyAlteration,
        severity: Severity::High,
        pattern: "痩せ(?:られます|られる|やすい|やすく|ましょう|ません|ました|ます|ない|よう|た|て|る|れば)",
        replacement: "美容と健康づくりを応援します",
        description: "Claims of losing weight alter the structure of the body.",
        surface_forms: &[
            "痩せる", "痩せます", "痩せました", "痩せられる", "痩せない", "痩せた", "痩せて",
            "痩せよう", "痩せましょう", "痩せやすい", "痩せやすく",
        ],
    },
    BuiltinRule {
        name: "efficacy-guarantee",
        category: Category::EfficacyGuarantee,
        severity: Severity::Critical,
        pattern: "(?:必ず|絶対に?|確実に|100%|１００％)(?:効きます|効く|効果があります|効果がある|効果が出ます|効果が出る|良くなります|良くなる|よくなります|よくなる)",
        replacement: "実感には個人差があります",
        description: "Guaranteed efficacy is prohibited for any product (薬機法 Art. 66).",
        surface_forms: &["必ず効きます", "絶対に効く", "確実に効果があります", "100%効果が出る", "必ずよくなります"],
    },
    BuiltinRule {
        name: "absolute-safety",
        category: Category::SafetyClaim,
        severity: Severity::High,
        pattern: "副作用(?:の心配)?(?:は|が)?(?:一切)?(?:ありません|ない|なし|ゼロ)|(?:100%|１００％|完全に|絶対に?)安全(?:です|な)?",
        replacement: "品質管理を徹底しています",
        description: "Absolute safety and no-side-effect claims cannot be substantiated.",
        surface_forms: &[
            "副作用なし", "副作用はありません", "副作用の心配はありません", "副作用が一切ない",
            "100%安全です", "完全に安全",
        ],
    },
    BuiltinRule {
        name: "drug-equivalence",
        category: Category::DrugEquivalence,
        severity: Severity::High,
        pattern: "(?:医薬品|薬)(?:と同じ|と同等|並み|のような|みたいな|以上の)(?:効果|効き目|作用)?",
        replacement: "毎日の栄養補給に",
        description: "Comparing a supplement with medicine implies pharmaceutical efficacy.",
        surface_forms: &["薬と同じ効果", "医薬品と同等", "医薬品並み", "薬のような効き目", "薬みたいな", "薬以上の効果"],
    },
    BuiltinRule {
        name: "biomarker",
        category: Category::MedicalEffect,
        severity: Severity::High,
        pattern: "(?:血圧|血糖値?|コレステロール値?|中性脂肪|尿酸値)(?:を|が)(?:下げます|下げました|下げる|下げた|下げて|下がります|下がる|下がった|低下させます|低下させる|抑えます|抑える)",
        replacement: "健康的な生活を応援します",
        description: "Lowering clinical markers is a therapeutic claim.",
        surface_forms: &[
            "血圧を下げる", "血圧が下がります", "血糖値を下げます", "コレステロールを下げる",
            "中性脂肪を抑えます", "尿酸値が下がった",
        ],
    },
    BuiltinRule {
        name: "immunity",
        category: Category::MedicalEffect,
        severity: Severity::Medium,
        pattern: "免疫力?(?:を|が)?(?:高めます|高める|高めた|高まります|高まる|上げます|上げる|アップします|アップする|アップ)",
        replacement: "元気な毎日を応援します",
        description: "Boosting immunity implies a physiological effect.",
        surface_forms: &["免疫力を高めます", "免疫力が高まる", "免疫を上げる", "免疫力アップ"],
    },
    BuiltinRule {
        name: "rejuvenation",
        category: Category::MedicalEffect,
        severity: Severity::Medium,
        pattern: "若返(?:ります|りました|らせます|らせる|らせた|らせて|る|った|って|り)",
        replacement: "いきいきとした毎日を応援します",
        description: "Rejuvenation implies reversing physiological ageing.",
        surface_forms: &["若返る", "若返ります", "若返った", "若返り", "若返らせる", "若返らせます"],
    },
    BuiltinRule {
        name: "detox",
        category: Category::MedicalEffect,
        severity: Severity::Low,
        pattern: "デトックス(?:効果)?",
        replacement: "すっきり習慣",
        description: "Detox wording suggests removal of toxins; soften for review.",
        surface_forms: &["デトックス", "デトックス効果"],
    },
];

/// The built-in rules, in declaration order
pub fn builtin_rules() -> Vec<Rule> {
    RULES
        .iter()
        .map(|r| {
            Rule::new(r.name, r.category, r.severity, r.pattern, r.replacement)
                .with_description(r.description)
                .with_surface_forms(r.surface_forms.iter().copied())
        })
        .collect()
}

/// The built-in table as a rule pack
pub fn builtin_pack() -> RulePack {
    RulePack {
        name: BUILTIN_NAME.to_string(),
        description: "Regulated health claims in Japanese supplement copy".to_string(),
        version: BUILTIN_VERSION.to_string(),
        regulation: Some("薬機法 (PMD Act)".to_string()),
        extend_builtin: false,
        rules: builtin_rules(),
    }
}
