//! End-to-end checks against the built-in rule table

use claimguard_rules::{
    builtin_rules, check, remediate, scan, Category, CheckOptions, CompileOptions,
    CompiledRuleSet, Disposition, Rule, RuleCompiler, Severity, Verdict,
};

fn builtin() -> CompiledRuleSet {
    RuleCompiler::with_options(CompileOptions::strict())
        .compile(&builtin_rules())
        .expect("built-in rules must compile")
}

fn replacement_of(set: &CompiledRuleSet, name: &str) -> String {
    set.find(name)
        .unwrap_or_else(|| panic!("missing rule {}", name))
        .suggested_replacement()
        .to_string()
}

#[test]
fn test_every_surface_form_yields_one_match() {
    let set = builtin();

    for rule in builtin_rules() {
        for form in &rule.surface_forms {
            let matches = scan(form, &set);
            assert_eq!(matches.len(), 1, "{} / {}: {:?}", rule.name, form, matches);

            let m = &matches[0];
            assert_eq!(m.rule.name, rule.name, "form {}", form);
            assert_eq!(m.category(), rule.category);
            assert_eq!(m.severity(), rule.severity);
            assert_eq!(m.matched_text, *form);
        }
    }
}

#[test]
fn test_potential_causative_and_volitional_forms_flagged() {
    let set = builtin();

    for (form, rule) in [
        ("治せます", "cure-verb"),
        ("治せない", "cure-verb"),
        ("治せた", "cure-verb"),
        ("治らず", "cure-verb"),
        ("治さず", "cure-verb"),
        ("痩せよう", "weight-loss"),
        ("痩せやすい", "weight-loss"),
        ("効かせる", "efficacy-verb"),
        ("若返らせる", "rejuvenation"),
    ] {
        let matches = scan(form, &set);
        assert_eq!(matches.len(), 1, "{}: {:?}", form, matches);
        assert_eq!(matches[0].rule.name, rule, "{}", form);
        assert_eq!(matches[0].matched_text, form);
        assert!(!set.is_compliant(form), "{}", form);
    }

    let report = check("飲むだけで治せます", &set, CheckOptions::report_only());
    assert_eq!(
        report.verdict,
        Verdict::Flagged {
            highest_severity: Severity::Critical
        }
    );
}

#[test]
fn test_diabetes_cure_claim_is_flagged_critical() {
    let set = builtin();
    let report = check("この商品で糖尿病が治ります", &set, CheckOptions::report_only());

    assert!(report.matches.len() >= 2);
    assert!(report.matches.iter().any(|m| m.rule == "disease-name" && m.matched_text == "糖尿病"));
    assert!(report.matches.iter().any(|m| m.rule == "cure-verb" && m.matched_text == "治ります"));
    assert_eq!(
        report.verdict,
        Verdict::Flagged {
            highest_severity: Severity::Critical
        }
    );
    assert!(report.corrected_text.is_none());
}

#[test]
fn test_compliant_phrasing_passes() {
    let set = builtin();
    let report = check("健康維持をサポートします", &set, CheckOptions::autofix());

    assert!(report.matches.is_empty());
    assert_eq!(report.verdict, Verdict::Compliant);
    assert!(report.corrected_text.is_none());
    assert_eq!(report.disposition(), Disposition::ServeOriginal);
}

#[test]
fn test_empty_input_is_compliant() {
    let set = builtin();
    let report = check("", &set, CheckOptions::autofix());
    assert!(report.matches.is_empty());
    assert_eq!(report.verdict, Verdict::Compliant);
}

#[test]
fn test_autofix_rewrites_diabetes_cure_claim() {
    let set = builtin();
    let report = check("この商品で糖尿病が治ります", &set, CheckOptions::autofix());

    let corrected = report.corrected_text.as_deref().expect("corrected text");
    assert!(corrected.contains(&replacement_of(&set, "disease-name")));
    assert!(corrected.contains(&replacement_of(&set, "cure-verb")));
    assert_eq!(corrected, "この商品で体調が健やかな毎日をサポートします");

    let rescan = check(corrected, &set, CheckOptions::report_only());
    assert_eq!(rescan.verdict, Verdict::Compliant);
    assert_eq!(report.disposition(), Disposition::ServeCorrected);
}

#[test]
fn test_builtin_remediation_converges_in_one_pass() {
    let set = builtin();
    let text = "必ず効きます！薬のような効き目で血圧を下げる。副作用はありません。免疫力アップで若返り、痩せられる。";
    let result = remediate(text, &set, 5);

    assert_eq!(result.iterations, 1);
    assert!(result.converged());
    assert!(scan(&result.corrected_text, &set).is_empty());
}

#[test]
fn test_seeded_retrigger_leaves_residual_at_bound() {
    // The seeded replacement reintroduces the cure claim
    let mut rules = builtin_rules();
    rules.push(Rule::new(
        "seeded",
        Category::EfficacyGuarantee,
        Severity::High,
        "奇跡のサプリ",
        "治ります",
    ));

    let set = RuleCompiler::new()
        .verify_replacements(false)
        .compile(&rules)
        .unwrap();

    let result = remediate("奇跡のサプリ", &set, 1);
    assert_eq!(result.iterations, 1);
    assert!(!result.converged());
    assert_eq!(result.residual_matches[0].rule.name, "cure-verb");

    let report = check("奇跡のサプリ", &set, CheckOptions::autofix().with_max_iterations(1));
    assert!(report.corrected_text.is_some());
    assert_eq!(report.disposition(), Disposition::Block);
    assert_eq!(report.servable_text(), None);

    let strict = RuleCompiler::new().verify_replacements(true).compile(&rules);
    assert!(strict.is_err());
}

#[test]
fn test_cyclic_replacements_never_converge() {
    let rules = [
        Rule::new("miracle", Category::EfficacyGuarantee, Severity::High, "奇跡", "万能"),
        Rule::new("panacea", Category::EfficacyGuarantee, Severity::High, "万能", "奇跡"),
    ];
    let set = RuleCompiler::new()
        .verify_replacements(false)
        .compile(&rules)
        .unwrap();

    for bound in [1, 2, 5, 10] {
        let result = remediate("奇跡の一粒", &set, bound);
        assert_eq!(result.iterations, bound);
        assert!(!result.converged());
    }
}

#[test]
fn test_negated_claim_still_matches() {
    let set = builtin();
    let report = check("この商品で病気は治りません", &set, CheckOptions::report_only());
    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].category, Category::DiseaseTreatment);
}

#[test]
fn test_guarantee_outranks_embedded_efficacy_verb() {
    let set = builtin();
    let matches = scan("このサプリは絶対に効く", &set);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].rule.name, "efficacy-guarantee");
    assert_eq!(matches[0].severity(), Severity::Critical);
}

#[test]
fn test_ordinary_words_not_flagged() {
    let set = builtin();
    for text in [
        "ガンマリノレン酸を配合",
        "水分を増やせる",
        "効果的な摂取タイミング",
        "政治の話はしません",
        "予算に合わせて選べます",
    ] {
        assert!(set.is_compliant(text), "{}", text);
        assert!(scan(text, &set).is_empty(), "{}", text);
    }
}
