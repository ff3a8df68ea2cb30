use clap::Subcommand;
use careerwise_core::auth::ProfileUpdate;
use careerwise_core::{AuthOutcome, AuthUser, Config};

use crate::common::{auth_service, open_store, print_json, runtime, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Full name
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign in to an existing account
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the local session
    Signout,
    /// Check authentication status
    Status,
    /// Show the signed-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields of the signed-in user
    Update {
        #[arg(long)]
        name: Option<String>,
        /// student, graduate, professional or entrepreneur
        #[arg(long)]
        user_type: Option<String>,
        #[arg(long)]
        career_stage: Option<String>,
        #[arg(long)]
        experience_level: Option<String>,
        /// Comma-separated goals
        #[arg(long, value_delimiter = ',')]
        goals: Option<Vec<String>>,
        /// Comma-separated industries
        #[arg(long, value_delimiter = ',')]
        industries: Option<Vec<String>>,
        /// Comma-separated skills
        #[arg(long, value_delimiter = ',')]
        skills: Option<Vec<String>>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        linkedin_url: Option<String>,
        #[arg(long)]
        portfolio_url: Option<String>,
    },
    /// Exchange the stored token for a fresh one
    Refresh,
}

pub fn run(action: AuthAction) -> CliResult {
    let config = Config::load()?;
    let auth = auth_service(&config, open_store()?)?;
    let rt = runtime()?;

    match action {
        AuthAction::Signup {
            email,
            password,
            name,
        } => {
            let outcome = rt.block_on(auth.sign_up(&email, &password, name.as_deref()))?;
            note_fallback(&outcome);
            println!("signed up as {}", outcome.value().display_name());
        }
        AuthAction::Signin { email, password } => {
            let outcome = rt.block_on(auth.sign_in(&email, &password))?;
            note_fallback(&outcome);
            println!("signed in as {}", outcome.value().display_name());
        }
        AuthAction::Signout => {
            rt.block_on(auth.sign_out())?;
            println!("signed out");
        }
        AuthAction::Status => {
            let user = auth.stored_user()?;
            match (auth.is_authenticated()?, user) {
                (true, Some(user)) => println!("authenticated as {} ({})", user.display_name(), user.email),
                (true, None) => println!("authenticated"),
                (false, _) => println!("not authenticated"),
            }
            println!("mode: {}", auth.mode());
        }
        AuthAction::Whoami { json } => match rt.block_on(auth.current_user())? {
            Some(outcome) => {
                note_fallback(&outcome);
                if json {
                    print_json(outcome.value())?;
                } else {
                    print_user(outcome.value());
                }
            }
            None => return Err("not signed in".into()),
        },
        AuthAction::Update {
            name,
            user_type,
            career_stage,
            experience_level,
            goals,
            industries,
            skills,
            location,
            bio,
            linkedin_url,
            portfolio_url,
        } => {
            let update = ProfileUpdate {
                full_name: name,
                user_type,
                career_stage,
                experience_level,
                primary_goals: goals,
                industry_interests: industries,
                skills,
                location,
                bio,
                linkedin_url,
                portfolio_url,
            };
            if update.is_empty() {
                return Err("nothing to update".into());
            }
            let outcome = rt.block_on(auth.update_profile(&update))?;
            note_fallback(&outcome);
            print_user(outcome.value());
        }
        AuthAction::Refresh => match rt.block_on(auth.refresh_token())? {
            Some(outcome) => {
                note_fallback(&outcome);
                println!("token refreshed");
            }
            None => return Err("not signed in".into()),
        },
    }
    Ok(())
}

fn note_fallback<T>(outcome: &AuthOutcome<T>) {
    if let Some(reason) = outcome.fallback_reason() {
        eprintln!("note: served by local session ({reason})");
    }
}

fn print_user(user: &AuthUser) {
    println!("{} <{}>", user.display_name(), user.email);
    let fields = [
        ("type", user.user_type.as_deref()),
        ("career stage", user.career_stage.as_deref()),
        ("experience", user.experience_level.as_deref()),
        ("location", user.location.as_deref()),
        ("bio", user.bio.as_deref()),
        ("linkedin", user.linkedin_url.as_deref()),
        ("portfolio", user.portfolio_url.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }
    let lists = [
        ("goals", &user.primary_goals),
        ("industries", &user.industry_interests),
        ("skills", &user.skills),
    ];
    for (label, values) in lists {
        if let Some(values) = values {
            println!("  {label}: {}", values.join(", "));
        }
    }
}
