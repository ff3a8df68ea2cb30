//! Integration tests for the assessment engine.
//!
//! These tests drive complete runs over the built-in question banks and
//! over banks loaded from TOML.

use careerwise_core::assessment::{catalog, resolver};
use careerwise_core::{
    AssessmentDefinition, AssessmentKind, AssessmentRun, DefinitionError, RunError, ScoreMap,
};

fn run_to_completion<'d>(def: &'d AssessmentDefinition, picks: &[usize]) -> AssessmentRun<'d> {
    let mut run = AssessmentRun::start(def).unwrap();
    for pick in picks {
        run.answer(*pick).unwrap();
    }
    assert!(run.is_complete());
    run
}

#[test]
fn test_values_scenario_tie_break_follows_canonical_order() {
    let def = catalog::builtin(AssessmentKind::Values);
    // achievement, leadership, learning, creativity, achievement
    let run = run_to_completion(&def, &[0, 0, 0, 0, 0]);
    let result = run.result().unwrap();

    let scores: Vec<(String, u32)> = result
        .scores
        .iter()
        .map(|(id, score)| (id.clone(), score))
        .collect();
    assert_eq!(
        scores,
        vec![
            ("achievement".to_string(), 2),
            ("autonomy".to_string(), 0),
            ("creativity".to_string(), 1),
            ("security".to_string(), 0),
            ("service".to_string(), 0),
            ("leadership".to_string(), 1),
            ("learning".to_string(), 1),
            ("balance".to_string(), 0),
        ]
    );
    assert_eq!(result.top, vec!["achievement", "creativity", "leadership"]);
}

#[test]
fn test_personality_scenario_produces_estj() {
    let def = catalog::builtin(AssessmentKind::Personality);
    let run = run_to_completion(&def, &[0, 0, 0, 0, 0]);
    let result = run.result().unwrap();

    assert_eq!(result.scores.get("E"), Some(3));
    assert_eq!(result.scores.get("S"), Some(2));
    assert_eq!(result.scores.get("T"), Some(2));
    assert_eq!(result.scores.get("J"), Some(2));
    assert_eq!(result.scores.get("I"), Some(0));
    assert_eq!(result.type_code.as_deref(), Some("ESTJ"));
    assert_eq!(result.top, vec!["E", "S", "T", "J"]);
    assert_eq!(
        catalog::personality_profile("ESTJ").map(|p| p.name),
        Some("The Executive")
    );
}

#[test]
fn test_personality_pole_tie_goes_to_first_pole() {
    let def = catalog::builtin(AssessmentKind::Personality);
    let mut scores = ScoreMap::initialize(def.category_ids().cloned());
    for question in &def.questions[1..4] {
        scores.apply_choice(&question.choices[1]).unwrap();
    }
    // E and I both zero.
    assert_eq!(
        resolver::resolve_type_code(&scores, &dichotomies(&def)).unwrap(),
        "ENFP"
    );
}

fn dichotomies(def: &AssessmentDefinition) -> Vec<careerwise_core::assessment::Dichotomy> {
    match &def.resolution {
        careerwise_core::Resolution::TypeCode { dichotomies } => dichotomies.clone(),
        other => panic!("not a type-code assessment: {other:?}"),
    }
}

#[test]
fn test_learning_style_single_winner() {
    let def = catalog::builtin(AssessmentKind::LearningStyle);
    let run = run_to_completion(&def, &[0, 0, 0, 0, 0]);
    let result = run.result().unwrap();
    assert_eq!(result.top, vec!["visual"]);
    assert_eq!(result.share("visual"), 100);
    let top = result.top_categories(&def);
    assert_eq!(top.len(), 1);
    assert!(!top[0].strategies.is_empty());
}

#[test]
fn test_interest_top_three_with_ties() {
    let def = catalog::builtin(AssessmentKind::Interest);
    // realistic 3, investigative 2, artistic 2, social 1, enterprising 2
    let run = run_to_completion(&def, &[0, 1, 2, 3, 4]);
    let result = run.result().unwrap();
    assert_eq!(result.top, vec!["realistic", "investigative", "artistic"]);
    assert_eq!(
        result.ranking,
        vec![
            "realistic",
            "investigative",
            "artistic",
            "enterprising",
            "social",
            "conventional"
        ]
    );
}

#[test]
fn test_retake_resets_every_score_to_zero() {
    let def = catalog::builtin(AssessmentKind::Values);
    let mut run = run_to_completion(&def, &[0, 1, 2, 3, 0]);
    run.retake();
    assert!(!run.is_complete());
    assert_eq!(run.current_index(), 0);
    assert_eq!(run.scores().len(), def.categories.len());
    assert!(run.scores().iter().all(|(_, score)| score == 0));
    assert!(run.answers().is_empty());
}

#[test]
fn test_same_answers_give_same_result() {
    for def in catalog::all() {
        let picks = vec![1; def.question_count()];
        let a = run_to_completion(&def, &picks).into_result().unwrap();
        let b = run_to_completion(&def, &picks).into_result().unwrap();
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.ranking, b.ranking);
        assert_eq!(a.top, b.top);
        assert_eq!(a.type_code, b.type_code);
    }
}

#[test]
fn test_answering_completed_run_is_rejected() {
    let def = catalog::builtin(AssessmentKind::LearningStyle);
    let mut run = run_to_completion(&def, &[0, 0, 0, 0, 0]);
    assert_eq!(run.answer(0), Err(RunError::AlreadyCompleted));
}

#[test]
fn test_out_of_range_choice_leaves_run_unchanged() {
    let def = catalog::builtin(AssessmentKind::Personality);
    let mut run = AssessmentRun::start(&def).unwrap();
    let err = run.answer(2).unwrap_err();
    assert!(matches!(err, RunError::InvalidChoice { choice: 2, available: 2, .. }));
    assert_eq!(run.current_index(), 0);
    assert_eq!(run.scores().total(), 0);
}

const CUSTOM_BANK: &str = r#"
kind = "learning-style"
title = "Workshop Preferences"
estimated_minutes = 2

[resolution]
rule = "top_n"
n = 2

[[categories]]
id = "solo"
name = "Solo"

[[categories]]
id = "pair"
name = "Pair"

[[categories]]
id = "group"
name = "Group"

[[questions]]
text = "How do you prefer to tackle a new problem?"
choices = [
    { text = "Alone", category = "solo", weight = 2 },
    { text = "With one colleague", category = "pair" },
    { text = "With the whole team", category = "group", weight = 3 },
]

[[questions]]
text = "Where do you do your best work?"
choices = [
    { text = "Quiet room", category = "solo" },
    { text = "Shared desk", category = "pair" },
]
"#;

#[test]
fn test_toml_bank_runs_through_the_same_engine() {
    let def = AssessmentDefinition::from_toml_str(CUSTOM_BANK).unwrap();
    assert_eq!(def.question_count(), 2);
    assert_eq!(def.questions[0].choices[1].weight, 1);

    let run = run_to_completion(&def, &[2, 1]);
    let result = run.result().unwrap();
    assert_eq!(result.scores.get("group"), Some(3));
    assert_eq!(result.scores.get("pair"), Some(1));
    assert_eq!(result.top, vec!["group", "pair"]);
}

#[test]
fn test_toml_bank_with_unknown_category_is_rejected() {
    let broken = CUSTOM_BANK.replace(r#"category = "pair" },"#, r#"category = "trio" },"#);
    assert!(matches!(
        AssessmentDefinition::from_toml_str(&broken),
        Err(DefinitionError::UnknownCategory { question: 0, choice: 1, .. })
    ));
}

#[test]
fn test_toml_bank_parse_error_is_reported() {
    assert!(matches!(
        AssessmentDefinition::from_toml_str("kind = 42"),
        Err(DefinitionError::Parse(_))
    ));
}

#[test]
fn test_toml_bank_with_oversized_weight_is_rejected() {
    let heavy = CUSTOM_BANK.replace("weight = 3", "weight = 50000000");
    assert!(matches!(
        AssessmentDefinition::from_toml_str(&heavy),
        Err(DefinitionError::WeightTooLarge { question: 0, choice: 2, weight: 50_000_000, .. })
    ));
}

#[test]
fn test_max_weight_bank_reports_shares() {
    let heavy = CUSTOM_BANK
        .replace("weight = 2", "weight = 100")
        .replace("weight = 3", "weight = 100");
    let def = AssessmentDefinition::from_toml_str(&heavy).unwrap();
    let run = run_to_completion(&def, &[0, 0]);
    let result = run.result().unwrap();
    assert_eq!(result.scores.total(), 101);
    assert_eq!(result.share("solo"), 100);
    assert_eq!(result.share("group"), 0);
}
