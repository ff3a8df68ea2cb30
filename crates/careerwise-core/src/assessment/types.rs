//! Assessment definition types: categories, choices, questions and the
//! resolution rule that turns a completed score map into a result.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::DefinitionError;

/// Identifier of a result category (e.g. "realistic", "visual", "E").
pub type CategoryId = String;

/// The four assessment types offered to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentKind {
    /// Holland RIASEC career interests.
    Interest,
    /// Four-letter personality type.
    Personality,
    /// Visual / auditory / kinesthetic / reading preference.
    LearningStyle,
    /// Core work values.
    Values,
}

impl AssessmentKind {
    pub const ALL: [AssessmentKind; 4] = [
        AssessmentKind::Interest,
        AssessmentKind::Personality,
        AssessmentKind::LearningStyle,
        AssessmentKind::Values,
    ];

    /// Stable slug used on the command line and as a profile key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentKind::Interest => "interest",
            AssessmentKind::Personality => "personality",
            AssessmentKind::LearningStyle => "learning-style",
            AssessmentKind::Values => "values",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "interest" | "interests" => Ok(AssessmentKind::Interest),
            "personality" => Ok(AssessmentKind::Personality),
            "learning-style" | "learning" => Ok(AssessmentKind::LearningStyle),
            "values" | "value" => Ok(AssessmentKind::Values),
            other => Err(format!(
                "unknown assessment '{other}' (expected one of: interest, personality, learning-style, values)"
            )),
        }
    }
}

/// A result category with its descriptive metadata.
///
/// The metadata is static lookup data for display; it plays no part in
/// scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Example careers associated with this category.
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default)]
    pub traits: Vec<String>,
    /// Study or work strategies (used by learning styles).
    #[serde(default)]
    pub strategies: Vec<String>,
}

impl Category {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            careers: Vec::new(),
            traits: Vec::new(),
            strategies: Vec::new(),
        }
    }

    pub fn with_careers(mut self, careers: &[&str]) -> Self {
        self.careers = careers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_traits(mut self, traits: &[&str]) -> Self {
        self.traits = traits.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_strategies(mut self, strategies: &[&str]) -> Self {
        self.strategies = strategies.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text.
    pub text: String,
    /// Category credited when this choice is selected.
    pub category: CategoryId,
    /// Points added to the category.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// Largest weight a single choice may carry.
pub const MAX_CHOICE_WEIGHT: u32 = 100;

fn default_weight() -> u32 {
    1
}

impl Choice {
    pub fn new(text: &str, category: &str, weight: u32) -> Self {
        Self {
            text: text.to_string(),
            category: category.to_string(),
            weight,
        }
    }
}

/// A question in a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn new(text: &str, choices: Vec<Choice>) -> Self {
        Self {
            text: text.to_string(),
            choices,
        }
    }
}

/// Two opposing categories; the higher-scoring pole contributes its id to
/// a type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dichotomy {
    pub first: CategoryId,
    pub second: CategoryId,
}

impl Dichotomy {
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

/// How a completed score map becomes a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Resolution {
    /// The single highest-scoring category.
    Top,
    /// The `n` highest-scoring categories.
    TopN { n: usize },
    /// One winner per dichotomy, concatenated into a type code.
    TypeCode { dichotomies: Vec<Dichotomy> },
}

impl Resolution {
    /// Number of categories reported as the headline result.
    pub fn headline_len(&self) -> usize {
        match self {
            Resolution::Top => 1,
            Resolution::TopN { n } => *n,
            Resolution::TypeCode { dichotomies } => dichotomies.len(),
        }
    }
}

/// A complete assessment: category table, question bank and resolution rule.
///
/// The order of `categories` is the canonical order used to break ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDefinition {
    pub kind: AssessmentKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_minutes: u32,
    pub resolution: Resolution,
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
}

impl AssessmentDefinition {
    /// Parse a definition from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionError> {
        let definition: AssessmentDefinition =
            toml::from_str(content).map_err(|e| DefinitionError::Parse(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Read and parse a definition file.
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Category ids in canonical order.
    pub fn category_ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories.iter().map(|c| &c.id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Check that the definition can be scored without missing-key lookups.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let label = self.kind.as_str().to_string();
        if self.categories.is_empty() {
            return Err(DefinitionError::NoCategories(label));
        }
        if self.questions.is_empty() {
            return Err(DefinitionError::NoQuestions(label));
        }

        let mut known: HashSet<&str> = HashSet::new();
        for category in &self.categories {
            if !known.insert(category.id.as_str()) {
                return Err(DefinitionError::DuplicateCategory(category.id.clone()));
            }
        }

        for (qi, question) in self.questions.iter().enumerate() {
            if question.choices.len() < 2 {
                return Err(DefinitionError::TooFewChoices {
                    index: qi,
                    count: question.choices.len(),
                });
            }
            for (ci, choice) in question.choices.iter().enumerate() {
                if !known.contains(choice.category.as_str()) {
                    return Err(DefinitionError::UnknownCategory {
                        question: qi,
                        choice: ci,
                        category: choice.category.clone(),
                    });
                }
                if choice.weight == 0 {
                    return Err(DefinitionError::ZeroWeight {
                        question: qi,
                        choice: ci,
                    });
                }
                if choice.weight > MAX_CHOICE_WEIGHT {
                    return Err(DefinitionError::WeightTooLarge {
                        question: qi,
                        choice: ci,
                        weight: choice.weight,
                        max: MAX_CHOICE_WEIGHT,
                    });
                }
            }
        }

        match &self.resolution {
            Resolution::Top => {}
            Resolution::TopN { n } => {
                if *n == 0 {
                    return Err(DefinitionError::EmptyTopN);
                }
            }
            Resolution::TypeCode { dichotomies } => {
                for pole in dichotomies.iter().flat_map(|d| [&d.first, &d.second]) {
                    if !known.contains(pole.as_str()) {
                        return Err(DefinitionError::UnknownPole(pole.clone()));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> AssessmentDefinition {
        AssessmentDefinition {
            kind: AssessmentKind::LearningStyle,
            title: "Tiny".into(),
            description: String::new(),
            estimated_minutes: 1,
            resolution: Resolution::Top,
            categories: vec![Category::new("a", "A", ""), Category::new("b", "B", "")],
            questions: vec![Question::new(
                "Pick one",
                vec![Choice::new("first", "a", 1), Choice::new("second", "b", 2)],
            )],
        }
    }

    #[test]
    fn valid_definition_passes() {
        assert!(tiny().validate().is_ok());
    }

    #[test]
    fn unknown_choice_category_is_rejected() {
        let mut def = tiny();
        def.questions[0].choices[1].category = "zzz".into();
        assert_eq!(
            def.validate(),
            Err(DefinitionError::UnknownCategory {
                question: 0,
                choice: 1,
                category: "zzz".into()
            })
        );
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let mut def = tiny();
        def.categories.push(Category::new("a", "Again", ""));
        assert_eq!(
            def.validate(),
            Err(DefinitionError::DuplicateCategory("a".into()))
        );
    }

    #[test]
    fn single_choice_question_is_rejected() {
        let mut def = tiny();
        def.questions[0].choices.truncate(1);
        assert!(matches!(
            def.validate(),
            Err(DefinitionError::TooFewChoices { index: 0, count: 1 })
        ));
    }

    #[test]
    fn zero_weight_is_rejected() {
        let mut def = tiny();
        def.questions[0].choices[0].weight = 0;
        assert!(matches!(
            def.validate(),
            Err(DefinitionError::ZeroWeight { .. })
        ));
    }

    #[test]
    fn oversized_weight_is_rejected() {
        let mut def = tiny();
        def.questions[0].choices[1].weight = MAX_CHOICE_WEIGHT;
        assert!(def.validate().is_ok());

        def.questions[0].choices[1].weight = 50_000_000;
        assert_eq!(
            def.validate(),
            Err(DefinitionError::WeightTooLarge {
                question: 0,
                choice: 1,
                weight: 50_000_000,
                max: MAX_CHOICE_WEIGHT,
            })
        );
    }

    #[test]
    fn empty_question_bank_is_rejected() {
        let mut def = tiny();
        def.questions.clear();
        assert!(matches!(def.validate(), Err(DefinitionError::NoQuestions(_))));
    }

    #[test]
    fn top_n_of_zero_is_rejected() {
        let mut def = tiny();
        def.resolution = Resolution::TopN { n: 0 };
        assert_eq!(def.validate(), Err(DefinitionError::EmptyTopN));
    }

    #[test]
    fn unknown_dichotomy_pole_is_rejected() {
        let mut def = tiny();
        def.resolution = Resolution::TypeCode {
            dichotomies: vec![Dichotomy::new("a", "c")],
        };
        assert_eq!(def.validate(), Err(DefinitionError::UnknownPole("c".into())));
    }

    #[test]
    fn kind_parses_slugs_and_aliases() {
        assert_eq!("learning-style".parse(), Ok(AssessmentKind::LearningStyle));
        assert_eq!("learning_style".parse(), Ok(AssessmentKind::LearningStyle));
        assert_eq!("Interests".parse(), Ok(AssessmentKind::Interest));
        assert!("astrology".parse::<AssessmentKind>().is_err());
    }

    #[test]
    fn definition_parses_from_toml() {
        let toml_src = r#"
kind = "values"
title = "Mini values"
estimated_minutes = 2

[resolution]
rule = "top_n"
n = 2

[[categories]]
id = "security"
name = "Security"

[[categories]]
id = "autonomy"
name = "Autonomy"

[[questions]]
text = "You prefer"

[[questions.choices]]
text = "Stable routines"
category = "security"

[[questions.choices]]
text = "Freedom"
category = "autonomy"
weight = 2
"#;
        let def = AssessmentDefinition::from_toml_str(toml_src).unwrap();
        assert_eq!(def.kind, AssessmentKind::Values);
        assert_eq!(def.resolution, Resolution::TopN { n: 2 });
        assert_eq!(def.questions[0].choices[0].weight, 1);
        assert_eq!(def.questions[0].choices[1].weight, 2);
        assert_eq!(
            def.category_ids().cloned().collect::<Vec<_>>(),
            vec!["security".to_string(), "autonomy".to_string()]
        );
    }

    #[test]
    fn toml_with_unknown_category_fails_validation() {
        let toml_src = r#"
kind = "values"
title = "Broken"

[resolution]
rule = "top"

[[categories]]
id = "security"
name = "Security"

[[questions]]
text = "Q"

[[questions.choices]]
text = "a"
category = "security"

[[questions.choices]]
text = "b"
category = "fame"
"#;
        assert!(matches!(
            AssessmentDefinition::from_toml_str(toml_src),
            Err(DefinitionError::UnknownCategory { .. })
        ));
    }
}
