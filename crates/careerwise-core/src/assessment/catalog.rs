//! Built-in assessment definitions.
//!
//! Four question banks ship with the app: Holland interest types,
//! four-letter personality type, learning style and core work values.

use serde::Serialize;

use super::types::{
    AssessmentDefinition, AssessmentKind, Category, Choice, Dichotomy, Question, Resolution,
};

/// Display profile for a four-letter personality type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalityProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const PERSONALITY_PROFILES: [PersonalityProfile; 16] = [
    PersonalityProfile {
        code: "ENTJ",
        name: "The Commander",
        description: "Natural leaders who are strategic and decisive",
    },
    PersonalityProfile {
        code: "ENTP",
        name: "The Debater",
        description: "Innovative and clever, love intellectual challenges",
    },
    PersonalityProfile {
        code: "ENFJ",
        name: "The Protagonist",
        description: "Inspiring leaders who care about helping others",
    },
    PersonalityProfile {
        code: "ENFP",
        name: "The Campaigner",
        description: "Enthusiastic and creative, see life full of possibilities",
    },
    PersonalityProfile {
        code: "ESTJ",
        name: "The Executive",
        description: "Efficient organizers who get things done",
    },
    PersonalityProfile {
        code: "ESTP",
        name: "The Entrepreneur",
        description: "Bold and practical, masters of tools and techniques",
    },
    PersonalityProfile {
        code: "ESFJ",
        name: "The Consul",
        description: "Caring and social, always ready to help",
    },
    PersonalityProfile {
        code: "ESFP",
        name: "The Entertainer",
        description: "Spontaneous and enthusiastic, love life and people",
    },
    PersonalityProfile {
        code: "INTJ",
        name: "The Architect",
        description: "Strategic thinkers with a plan for everything",
    },
    PersonalityProfile {
        code: "INTP",
        name: "The Thinker",
        description: "Quiet and analytical, love theoretical concepts",
    },
    PersonalityProfile {
        code: "INFJ",
        name: "The Advocate",
        description: "Creative and insightful, inspired and independent",
    },
    PersonalityProfile {
        code: "INFP",
        name: "The Mediator",
        description: "Poetic and kind, always looking to help",
    },
    PersonalityProfile {
        code: "ISTJ",
        name: "The Logistician",
        description: "Practical and reliable, get things done efficiently",
    },
    PersonalityProfile {
        code: "ISTP",
        name: "The Virtuoso",
        description: "Bold and practical, masters of tools and techniques",
    },
    PersonalityProfile {
        code: "ISFJ",
        name: "The Protector",
        description: "Warm and conscientious, always ready to protect loved ones",
    },
    PersonalityProfile {
        code: "ISFP",
        name: "The Adventurer",
        description: "Flexible and charming, always ready to explore new possibilities",
    },
];

/// Look up the display profile for a type code such as "ESTJ".
pub fn personality_profile(code: &str) -> Option<&'static PersonalityProfile> {
    PERSONALITY_PROFILES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code))
}

/// Built-in definition for the given kind.
pub fn builtin(kind: AssessmentKind) -> AssessmentDefinition {
    match kind {
        AssessmentKind::Interest => interest(),
        AssessmentKind::Personality => personality(),
        AssessmentKind::LearningStyle => learning_style(),
        AssessmentKind::Values => values(),
    }
}

/// All built-in definitions, in menu order.
pub fn all() -> Vec<AssessmentDefinition> {
    AssessmentKind::ALL.iter().map(|k| builtin(*k)).collect()
}

/// Six questions with one choice per Holland type on every question.
fn riasec_question(text: &str, options: [&str; 6], weight: u32) -> Question {
    const TYPES: [&str; 6] = [
        "realistic",
        "investigative",
        "artistic",
        "social",
        "enterprising",
        "conventional",
    ];
    Question::new(
        text,
        options
            .iter()
            .zip(TYPES)
            .map(|(option, category)| Choice::new(option, category, weight))
            .collect(),
    )
}

fn interest() -> AssessmentDefinition {
    AssessmentDefinition {
        kind: AssessmentKind::Interest,
        title: "Career Interest Assessment".to_string(),
        description: "Based on Holland's Career Interest Theory".to_string(),
        estimated_minutes: 5,
        resolution: Resolution::TopN { n: 3 },
        categories: vec![
            Category::new(
                "realistic",
                "Realistic (Doer)",
                "You enjoy hands-on work and practical problem-solving",
            )
            .with_careers(&["Engineer", "Mechanic", "Carpenter", "Pilot"])
            .with_traits(&["Practical", "Hands-on", "Problem-solver", "Independent"]),
            Category::new(
                "investigative",
                "Investigative (Thinker)",
                "You love to research, analyze, and solve complex problems",
            )
            .with_careers(&["Scientist", "Doctor", "Researcher", "Analyst"])
            .with_traits(&["Analytical", "Curious", "Logical", "Detail-oriented"]),
            Category::new(
                "artistic",
                "Artistic (Creator)",
                "You thrive in creative and expressive environments",
            )
            .with_careers(&["Artist", "Writer", "Designer", "Musician"])
            .with_traits(&["Creative", "Expressive", "Original", "Intuitive"]),
            Category::new(
                "social",
                "Social (Helper)",
                "You enjoy helping and working with people",
            )
            .with_careers(&["Teacher", "Counselor", "Social Worker", "Nurse"])
            .with_traits(&["Helpful", "Empathetic", "Cooperative", "Understanding"]),
            Category::new(
                "enterprising",
                "Enterprising (Persuader)",
                "You like to lead, manage, and influence others",
            )
            .with_careers(&["Manager", "Entrepreneur", "Lawyer", "Sales Rep"])
            .with_traits(&["Leadership", "Ambitious", "Competitive", "Confident"]),
            Category::new(
                "conventional",
                "Conventional (Organizer)",
                "You prefer structured work and attention to detail",
            )
            .with_careers(&["Accountant", "Administrator", "Banker", "Secretary"])
            .with_traits(&["Organized", "Detailed", "Reliable", "Systematic"]),
        ],
        questions: vec![
            riasec_question(
                "Which activity sounds most appealing to you?",
                [
                    "Building or fixing things with your hands",
                    "Conducting scientific experiments",
                    "Creating art or writing stories",
                    "Teaching or helping others",
                    "Leading a team project",
                    "Organizing data and files",
                ],
                3,
            ),
            riasec_question(
                "In your free time, you prefer to:",
                [
                    "Work on DIY projects",
                    "Read science articles",
                    "Visit museums or galleries",
                    "Volunteer in your community",
                    "Start new ventures",
                    "Plan and organize events",
                ],
                2,
            ),
            riasec_question(
                "Your ideal work environment would be:",
                [
                    "Outdoors or in a workshop",
                    "A laboratory or research facility",
                    "A creative studio",
                    "A school or community center",
                    "A business office",
                    "A structured office setting",
                ],
                2,
            ),
            riasec_question(
                "When solving problems, you tend to:",
                [
                    "Use practical, hands-on approaches",
                    "Research and analyze thoroughly",
                    "Think creatively and innovatively",
                    "Consider the impact on people",
                    "Focus on efficiency and results",
                    "Follow established procedures",
                ],
                1,
            ),
            riasec_question(
                "Which subject did you enjoy most in school?",
                [
                    "Shop class or PE",
                    "Science or Math",
                    "Art or English",
                    "Psychology or History",
                    "Business or Economics",
                    "Accounting or Computer Science",
                ],
                2,
            ),
        ],
    }
}

fn personality() -> AssessmentDefinition {
    AssessmentDefinition {
        kind: AssessmentKind::Personality,
        title: "Personality Type Assessment".to_string(),
        description: "Based on Myers-Briggs Type Indicator principles".to_string(),
        estimated_minutes: 3,
        resolution: Resolution::TypeCode {
            dichotomies: vec![
                Dichotomy::new("E", "I"),
                Dichotomy::new("S", "N"),
                Dichotomy::new("T", "F"),
                Dichotomy::new("J", "P"),
            ],
        },
        categories: vec![
            Category::new("E", "Extraversion", "Energized by people and activity"),
            Category::new("I", "Introversion", "Energized by reflection and time alone"),
            Category::new("S", "Sensing", "Focused on concrete facts and details"),
            Category::new("N", "Intuition", "Focused on patterns and possibilities"),
            Category::new("T", "Thinking", "Decides through logic and analysis"),
            Category::new("F", "Feeling", "Decides through values and empathy"),
            Category::new("J", "Judging", "Prefers structure and plans"),
            Category::new("P", "Perceiving", "Prefers flexibility and open options"),
        ],
        questions: vec![
            Question::new(
                "At a party, you are more likely to:",
                vec![
                    Choice::new("Interact with many people", "E", 2),
                    Choice::new("Have deep conversations with a few", "I", 2),
                ],
            ),
            Question::new(
                "When learning something new, you prefer:",
                vec![
                    Choice::new("Step-by-step instructions", "S", 2),
                    Choice::new("Understanding the big picture first", "N", 2),
                ],
            ),
            Question::new(
                "When making decisions, you rely more on:",
                vec![
                    Choice::new("Logic and analysis", "T", 2),
                    Choice::new("Values and feelings", "F", 2),
                ],
            ),
            Question::new(
                "You prefer to:",
                vec![
                    Choice::new("Plan things in advance", "J", 2),
                    Choice::new("Keep options open", "P", 2),
                ],
            ),
            Question::new(
                "You gain energy from:",
                vec![
                    Choice::new("Being around people", "E", 1),
                    Choice::new("Spending time alone", "I", 1),
                ],
            ),
        ],
    }
}

fn learning_style() -> AssessmentDefinition {
    AssessmentDefinition {
        kind: AssessmentKind::LearningStyle,
        title: "Learning Style Assessment".to_string(),
        description: "Discover how you learn best".to_string(),
        estimated_minutes: 3,
        resolution: Resolution::Top,
        categories: vec![
            Category::new(
                "visual",
                "Visual Learner",
                "You learn best through seeing and visualizing information",
            )
            .with_strategies(&[
                "Use mind maps and diagrams",
                "Highlight key information with colors",
                "Watch educational videos",
                "Create visual study guides",
            ])
            .with_careers(&["Graphic Designer", "Architect", "Art Director", "Web Developer"]),
            Category::new(
                "auditory",
                "Auditory Learner",
                "You learn best through listening and verbal instruction",
            )
            .with_strategies(&[
                "Record and replay lectures",
                "Study with background music",
                "Join study groups for discussion",
                "Read materials aloud",
            ])
            .with_careers(&["Teacher", "Musician", "Radio Host", "Counselor"]),
            Category::new(
                "kinesthetic",
                "Kinesthetic Learner",
                "You learn best through hands-on experience and movement",
            )
            .with_strategies(&[
                "Use hands-on activities",
                "Take frequent study breaks",
                "Build models or prototypes",
                "Study while walking",
            ])
            .with_careers(&["Engineer", "Chef", "Physical Therapist", "Mechanic"]),
            Category::new(
                "reading",
                "Reading/Writing Learner",
                "You learn best through reading and writing activities",
            )
            .with_strategies(&[
                "Take detailed notes",
                "Create written summaries",
                "Use lists and outlines",
                "Read multiple sources",
            ])
            .with_careers(&["Writer", "Lawyer", "Researcher", "Editor"]),
        ],
        questions: vec![
            Question::new(
                "When learning something new, I prefer to:",
                vec![
                    Choice::new("See diagrams and charts", "visual", 3),
                    Choice::new("Listen to explanations", "auditory", 3),
                    Choice::new("Practice hands-on", "kinesthetic", 3),
                    Choice::new("Read detailed instructions", "reading", 3),
                ],
            ),
            Question::new(
                "I remember information best when:",
                vec![
                    Choice::new("I can visualize it", "visual", 2),
                    Choice::new("I hear it repeatedly", "auditory", 2),
                    Choice::new("I write it down", "reading", 2),
                    Choice::new("I use it practically", "kinesthetic", 2),
                ],
            ),
            Question::new(
                "During a presentation, I focus most on:",
                vec![
                    Choice::new("Visual aids and slides", "visual", 3),
                    Choice::new("The speaker's voice", "auditory", 3),
                    Choice::new("Taking detailed notes", "reading", 3),
                    Choice::new("Interactive demonstrations", "kinesthetic", 3),
                ],
            ),
            Question::new(
                "When studying, I like to:",
                vec![
                    Choice::new("Use highlighters and colors", "visual", 2),
                    Choice::new("Read aloud or discuss", "auditory", 2),
                    Choice::new("Take breaks to move around", "kinesthetic", 2),
                    Choice::new("Make detailed outlines", "reading", 2),
                ],
            ),
            Question::new(
                "I learn best in environments that are:",
                vec![
                    Choice::new("Visually organized", "visual", 1),
                    Choice::new("Quiet for listening", "auditory", 1),
                    Choice::new("Allow movement", "kinesthetic", 1),
                    Choice::new("Have good reading materials", "reading", 1),
                ],
            ),
        ],
    }
}

fn values() -> AssessmentDefinition {
    AssessmentDefinition {
        kind: AssessmentKind::Values,
        title: "Work Values Assessment".to_string(),
        description: "Understanding what drives and motivates you".to_string(),
        estimated_minutes: 3,
        resolution: Resolution::TopN { n: 3 },
        categories: vec![
            Category::new("achievement", "Achievement", "Accomplishing goals and being successful"),
            Category::new("autonomy", "Autonomy", "Having independence and freedom in work"),
            Category::new(
                "creativity",
                "Creativity",
                "Being innovative and thinking outside the box",
            ),
            Category::new("security", "Security", "Having stability and predictability"),
            Category::new("service", "Service", "Helping others and making a difference"),
            Category::new("leadership", "Leadership", "Guiding and influencing others"),
            Category::new("learning", "Learning", "Continuous growth and education"),
            Category::new("balance", "Balance", "Work-life harmony and well-being"),
        ],
        questions: vec![
            Question::new(
                "What motivates you most in your daily activities?",
                vec![
                    Choice::new("Achieving personal goals", "achievement", 1),
                    Choice::new("Helping others succeed", "service", 1),
                    Choice::new("Learning new things", "learning", 1),
                    Choice::new("Having creative freedom", "creativity", 1),
                ],
            ),
            Question::new(
                "In a perfect work environment, you would:",
                vec![
                    Choice::new("Lead a team toward success", "leadership", 1),
                    Choice::new("Work independently on projects", "autonomy", 1),
                    Choice::new("Collaborate to solve problems", "service", 1),
                    Choice::new("Have predictable routines", "security", 1),
                ],
            ),
            Question::new(
                "What brings you the most satisfaction?",
                vec![
                    Choice::new("Mastering new skills", "learning", 1),
                    Choice::new("Making a positive impact", "service", 1),
                    Choice::new("Reaching ambitious targets", "achievement", 1),
                    Choice::new("Maintaining work-life balance", "balance", 1),
                ],
            ),
            Question::new(
                "When facing a challenge, you prefer to:",
                vec![
                    Choice::new("Find innovative solutions", "creativity", 1),
                    Choice::new("Follow proven methods", "security", 1),
                    Choice::new("Rally others to help", "leadership", 1),
                    Choice::new("Take time to research", "learning", 1),
                ],
            ),
            Question::new(
                "Your ideal recognition would be:",
                vec![
                    Choice::new("Public acknowledgment of achievements", "achievement", 1),
                    Choice::new("Appreciation for helping others", "service", 1),
                    Choice::new("Freedom to pursue interests", "autonomy", 1),
                    Choice::new("Respect for creative contributions", "creativity", 1),
                ],
            ),
        ],
    }
}
