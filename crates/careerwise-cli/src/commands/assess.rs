use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use careerwise_core::assessment::catalog;
use careerwise_core::{
    AssessmentDefinition, AssessmentKind, AssessmentResult, AssessmentRun, ProfileStore,
};

use crate::common::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum AssessAction {
    /// List available assessments
    List,
    /// Show an assessment's categories and questions
    Show {
        /// interest, personality, learning-style or values
        kind: AssessmentKind,
        /// Load the question bank from a TOML file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Take an assessment interactively
    Take {
        kind: AssessmentKind,
        #[arg(long)]
        file: Option<PathBuf>,
        /// Do not save the result to the profile
        #[arg(long)]
        no_save: bool,
    },
    /// Score a complete answer sheet
    Score {
        kind: AssessmentKind,
        /// Choice numbers, one per question, starting at 1 (e.g. "1,3,2,4,1")
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
        #[arg(long)]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_save: bool,
    },
}

pub fn run(action: AssessAction) -> CliResult {
    match action {
        AssessAction::List => {
            for def in catalog::all() {
                println!(
                    "{:<16} {:<32} {} questions, ~{} min",
                    def.kind.as_str(),
                    def.title,
                    def.question_count(),
                    def.estimated_minutes
                );
            }
        }
        AssessAction::Show { kind, file } => {
            let def = definition(kind, file.as_deref())?;
            println!("{}", def.title);
            if !def.description.is_empty() {
                println!("{}", def.description);
            }
            println!();
            println!("Categories:");
            for category in &def.categories {
                println!("  {:<14} {}", category.id, category.name);
            }
            println!();
            for (i, question) in def.questions.iter().enumerate() {
                println!("{}. {}", i + 1, question.text);
                for (j, choice) in question.choices.iter().enumerate() {
                    println!("   {}) {}", j + 1, choice.text);
                }
            }
        }
        AssessAction::Take {
            kind,
            file,
            no_save,
        } => {
            let def = definition(kind, file.as_deref())?;
            let stdin = std::io::stdin();
            let result = take_interactive(&def, &mut stdin.lock(), &mut std::io::stdout())?;
            print_result(&def, &result);
            if !no_save {
                save(&result)?;
                println!("\nResult saved to profile.");
            }
        }
        AssessAction::Score {
            kind,
            answers,
            file,
            json,
            no_save,
        } => {
            let def = definition(kind, file.as_deref())?;
            let result = score(&def, &answers)?;
            if !no_save {
                save(&result)?;
            }
            if json {
                print_json(&result)?;
            } else {
                print_result(&def, &result);
            }
        }
    }
    Ok(())
}

fn definition(
    kind: AssessmentKind,
    file: Option<&Path>,
) -> Result<AssessmentDefinition, Box<dyn std::error::Error>> {
    let Some(path) = file else {
        return Ok(catalog::builtin(kind));
    };
    let def = AssessmentDefinition::from_path(path)?;
    if def.kind != kind {
        return Err(format!("{} defines a {} assessment, not {kind}", path.display(), def.kind).into());
    }
    Ok(def)
}

/// Score 1-based answers in one pass.
fn score(
    def: &AssessmentDefinition,
    answers: &[usize],
) -> Result<AssessmentResult, Box<dyn std::error::Error>> {
    if answers.len() != def.question_count() {
        return Err(format!(
            "expected {} answers, got {}",
            def.question_count(),
            answers.len()
        )
        .into());
    }

    let mut run = AssessmentRun::start(def)?;
    for (i, (answer, question)) in answers.iter().zip(&def.questions).enumerate() {
        let choices = question.choices.len();
        if *answer == 0 || *answer > choices {
            return Err(
                format!("answer {answer} for question {} must be 1-{choices}", i + 1).into(),
            );
        }
        run.answer(answer - 1)?;
    }
    run.into_result()
        .ok_or_else(|| "assessment did not complete".into())
}

fn take_interactive(
    def: &AssessmentDefinition,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<AssessmentResult, Box<dyn std::error::Error>> {
    let mut run = AssessmentRun::start(def)?;
    writeln!(out, "{} ({} questions)\n", def.title, def.question_count())?;

    while let Some(question) = run.current_question() {
        let progress = run.progress();
        writeln!(out, "[{}/{}] {}", progress.answered + 1, progress.total, question.text)?;
        for (j, choice) in question.choices.iter().enumerate() {
            writeln!(out, "  {}) {}", j + 1, choice.text)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err("input ended before the assessment was complete".into());
            }
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=question.choices.len()).contains(&n) => {
                    run.answer(n - 1)?;
                    break;
                }
                _ => writeln!(out, "Enter a number from 1 to {}.", question.choices.len())?,
            }
        }
        writeln!(out)?;
    }

    run.into_result()
        .ok_or_else(|| "assessment did not complete".into())
}

fn save(result: &AssessmentResult) -> CliResult {
    ProfileStore::new(open_store()?).record_result(result)?;
    Ok(())
}

fn print_result(def: &AssessmentDefinition, result: &AssessmentResult) {
    println!("{}", def.title);

    if let Some(code) = &result.type_code {
        match catalog::personality_profile(code) {
            Some(profile) => println!(
                "Type: {code} - {} ({})",
                profile.name, profile.description
            ),
            None => println!("Type: {code}"),
        }
    }

    let top = result.top_categories(def);
    let names: Vec<&str> = top.iter().map(|c| c.name.as_str()).collect();
    println!("Top: {}", names.join(", "));

    for category in &top {
        if !category.careers.is_empty() {
            println!("  {} careers: {}", category.name, category.careers.join(", "));
        }
        if !category.strategies.is_empty() {
            println!("  {} strategies: {}", category.name, category.strategies.join("; "));
        }
    }

    println!("Scores:");
    for (id, points) in result.scores.iter() {
        println!("  {id:<14} {points:>3}  {:>3}%", result.share(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn score_uses_one_based_answers() {
        let def = catalog::builtin(AssessmentKind::Values);
        let result = score(&def, &[1, 1, 1, 1, 1]).unwrap();
        assert_eq!(result.top, vec!["achievement", "creativity", "leadership"]);
    }

    #[test]
    fn score_rejects_wrong_count_and_range() {
        let def = catalog::builtin(AssessmentKind::Personality);
        assert!(score(&def, &[1, 1]).is_err());
        assert!(score(&def, &[1, 1, 1, 1, 3]).is_err());
        assert!(score(&def, &[0, 1, 1, 1, 1]).is_err());
    }

    #[test]
    fn interactive_run_reprompts_on_bad_input() {
        let def = catalog::builtin(AssessmentKind::Personality);
        let mut input = Cursor::new("1\nfoo\n9\n1\n1\n1\n1\n");
        let mut out = Vec::new();
        let result = take_interactive(&def, &mut input, &mut out).unwrap();
        assert_eq!(result.type_code.as_deref(), Some("ESTJ"));
        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(transcript.matches("Enter a number from 1 to 2.").count(), 2);
    }

    #[test]
    fn interactive_run_fails_on_early_eof() {
        let def = catalog::builtin(AssessmentKind::Values);
        let mut input = Cursor::new("1\n2\n");
        let err = take_interactive(&def, &mut input, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }
}
