//! Property tests for matcher ordering, overlap resolution and remediation

use claimguard_rules::{
    builtin_rules, compile, remediate, scan, Category, CompileOptions, CompiledRuleSet, Rule,
    RuleCompiler, Severity,
};
use proptest::prelude::*;
use std::sync::OnceLock;

const FILLERS: &[&str] = &[
    "この商品で",
    "が",
    "は",
    "、",
    "。",
    "毎日",
    "ビタミンCを",
    "飲むと",
    "健康維持をサポートします",
    "おいしい",
    " ",
];

fn builtin() -> &'static CompiledRuleSet {
    static SET: OnceLock<CompiledRuleSet> = OnceLock::new();
    SET.get_or_init(|| {
        RuleCompiler::with_options(CompileOptions::strict())
            .compile(&builtin_rules())
            .expect("built-in rules must compile")
    })
}

fn fragments() -> Vec<String> {
    builtin_rules()
        .into_iter()
        .flat_map(|r| r.surface_forms)
        .chain(FILLERS.iter().map(|s| s.to_string()))
        .collect()
}

fn copy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(fragments()), 0..12).prop_map(|parts| parts.concat())
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

proptest! {
    #[test]
    fn scan_output_sorted_and_disjoint(text in prop_oneof![copy_text(), "\\PC{0,40}"]) {
        let matches = scan(&text, builtin());

        for pair in matches.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for m in &matches {
            prop_assert!(m.start < m.end);
            prop_assert_eq!(&text[m.start..m.end], m.matched_text.as_str());
        }
    }

    #[test]
    fn remediation_is_idempotent(text in copy_text()) {
        let first = remediate(&text, builtin(), 3);
        prop_assert!(first.converged());
        prop_assert!(first.iterations <= 1);

        let second = remediate(&first.corrected_text, builtin(), 3);
        prop_assert_eq!(second.iterations, 0);
        prop_assert_eq!(&second.corrected_text, &first.corrected_text);
    }

    #[test]
    fn higher_severity_wins_regardless_of_order(
        a in severity(),
        b in severity(),
        flipped in any::<bool>(),
    ) {
        prop_assume!(a != b);

        let mut rules = vec![
            Rule::new("left", Category::MedicalEffect, a, "abc", "X"),
            Rule::new("right", Category::MedicalEffect, b, "bcd", "Y"),
        ];
        if flipped {
            rules.reverse();
        }
        let set = compile(&rules).unwrap();

        let matches = scan("abcd", &set);
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].severity(), a.max(b));
    }

    #[test]
    fn compliant_text_has_no_matches(text in copy_text()) {
        let set = builtin();
        prop_assert_eq!(set.is_compliant(&text), scan(&text, set).is_empty());
    }
}
