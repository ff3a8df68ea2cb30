use clap::Subcommand;
use careerwise_core::assessment::catalog;
use careerwise_core::ProfileStore;

use crate::common::{open_store, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark onboarding as completed
    CompleteOnboarding,
    /// Delete the stored profile and assessment results
    Clear,
}

pub fn run(action: ProfileAction) -> CliResult {
    let profiles = ProfileStore::new(open_store()?);
    match action {
        ProfileAction::Show { json } => {
            let profile = profiles.load()?;
            if json {
                return print_json(&profile);
            }
            println!(
                "Onboarding: {}",
                if profile.onboarding_completed {
                    "completed"
                } else {
                    "pending"
                }
            );
            if profile.assessments.is_empty() {
                println!("No assessments taken yet.");
                return Ok(());
            }
            for (slug, record) in &profile.assessments {
                let def = catalog::builtin(record.kind);
                let top: Vec<&str> = record
                    .top
                    .iter()
                    .map(|id| def.category(id).map_or(id.as_str(), |c| c.name.as_str()))
                    .collect();
                match &record.type_code {
                    Some(code) => println!("{slug:<16} {code} ({})", top.join(", ")),
                    None => println!("{slug:<16} {}", top.join(", ")),
                }
                println!(
                    "{:<16} taken {}",
                    "",
                    record.completed_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
        }
        ProfileAction::CompleteOnboarding => {
            profiles.mark_onboarding_completed()?;
            println!("onboarding marked as completed");
        }
        ProfileAction::Clear => {
            profiles.clear()?;
            println!("profile cleared");
        }
    }
    Ok(())
}
