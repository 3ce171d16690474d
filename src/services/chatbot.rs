// src/services/chatbot.rs
//! Keyword-driven reply selection.
//!
//! A message is lowercased and split into words once, then checked against a
//! fixed, ordered rule table. The first rule whose predicate matches produces
//! the reply; later rules are never looked at. The last rule always matches,
//! so every message gets a reply.

use std::sync::Arc;

use serde::Serialize;
use strum::IntoStaticStr;
use tracing::debug;

use super::random::{RandomSource, ThreadRandom};
use super::replies;
use super::session_config::{MaterialType, Personality, SessionConfig, StudyMode, UserRole};
use super::templates;
use super::topic::{Tokens, extract_topic};

/// What a message was classified as. The variant name is both the wire name
/// and the metrics key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum Intent {
    UnsupportedMaterial,
    Greeting,
    Identity,
    Gratitude,
    Material,
    QuizMe,
    ExamPrep,
    ConceptExplanation,
    HomeworkHelp,
    StudySession,
    Maths,
    Usage,
    Fallback,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// When a rule applies.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    Always,
    /// The session has this material type selected, whatever the message.
    MaterialIs(MaterialType),
    /// The message contains one of these words or phrases.
    Keywords(&'static [&'static str]),
    /// As `Keywords`, but only for sessions in the given role.
    RoleKeywords(UserRole, &'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, tokens: &Tokens, config: &SessionConfig) -> bool {
        match *self {
            Predicate::Always => true,
            Predicate::MaterialIs(kind) => config.material_type == kind,
            Predicate::Keywords(words) => tokens.contains_any(words),
            Predicate::RoleKeywords(role, words) => config.role == role && tokens.contains_any(words),
        }
    }
}

/// How a rule builds its reply.
#[derive(Clone, Copy)]
pub enum Producer {
    Fixed(&'static str),
    /// One entry of the personality's set, chosen at random.
    OneOf(fn(Personality) -> &'static [&'static str]),
    Template(fn(&Tokens, &SessionConfig) -> String),
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Producer::Fixed(text) => f.debug_tuple("Fixed").field(text).finish(),
            Producer::OneOf(_) => f.write_str("OneOf(..)"),
            Producer::Template(_) => f.write_str("Template(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    pub intent: Intent,
    pub predicate: Predicate,
    pub producer: Producer,
}

const GREETING_WORDS: &[&str] = &["hello", "hi", "hey", "greetings"];
const IDENTITY_WORDS: &[&str] = &["your name", "who are you", "what are you"];
const GRATITUDE_WORDS: &[&str] = &["thanks", "thank you", "thank", "thx"];
const MATERIAL_WORDS: &[&str] = &[
    "worksheet", "worksheets", "lesson plan", "lesson plans", "lesson", "activity", "activities",
    "assessment", "assessments", "test", "tests", "exam", "exams", "flashcards", "flashcard",
    "flash cards", "flash card", "notes", "note", "quiz", "quizzes", "project", "projects",
    "create", "generate", "make", "prepare", "design", "write",
];
const STUDY_WORDS: &[&str] = &["study", "learn", "practice", "practise", "teach me"];
const MATHS_WORDS: &[&str] = &[
    "math", "maths", "mathematics", "fraction", "fractions", "equation", "equations", "algebra",
    "geometry",
];
const USAGE_WORDS: &[&str] = &["help", "what can you do", "how to use"];

/// Matches every message; evaluated last.
pub const CATCH_ALL: ResponseRule = ResponseRule {
    intent: Intent::Fallback,
    predicate: Predicate::Always,
    producer: Producer::OneOf(replies::fallbacks),
};

/// Rules in priority order. [`CATCH_ALL`] closes the table.
pub static RULES: &[ResponseRule] = &[
    ResponseRule {
        intent: Intent::UnsupportedMaterial,
        predicate: Predicate::MaterialIs(MaterialType::Project),
        producer: Producer::Fixed(replies::UNSUPPORTED_MATERIAL),
    },
    ResponseRule {
        intent: Intent::Greeting,
        predicate: Predicate::Keywords(GREETING_WORDS),
        producer: Producer::OneOf(replies::greetings),
    },
    ResponseRule {
        intent: Intent::Identity,
        predicate: Predicate::Keywords(IDENTITY_WORDS),
        producer: Producer::Fixed(replies::IDENTITY),
    },
    ResponseRule {
        intent: Intent::Gratitude,
        predicate: Predicate::Keywords(GRATITUDE_WORDS),
        producer: Producer::OneOf(replies::gratitude),
    },
    ResponseRule {
        intent: Intent::Material,
        predicate: Predicate::RoleKeywords(UserRole::Teacher, MATERIAL_WORDS),
        producer: Producer::Template(material_request),
    },
    ResponseRule {
        intent: Intent::QuizMe,
        predicate: Predicate::RoleKeywords(UserRole::Student, StudyMode::QuizMe.keywords()),
        producer: Producer::Template(quiz_me),
    },
    ResponseRule {
        intent: Intent::ExamPrep,
        predicate: Predicate::RoleKeywords(UserRole::Student, StudyMode::ExamPrep.keywords()),
        producer: Producer::Template(exam_prep),
    },
    ResponseRule {
        intent: Intent::ConceptExplanation,
        predicate: Predicate::RoleKeywords(
            UserRole::Student,
            StudyMode::ConceptExplanation.keywords(),
        ),
        producer: Producer::Template(concept_explanation),
    },
    ResponseRule {
        intent: Intent::HomeworkHelp,
        predicate: Predicate::RoleKeywords(UserRole::Student, StudyMode::HomeworkHelp.keywords()),
        producer: Producer::Template(homework_help),
    },
    ResponseRule {
        intent: Intent::StudySession,
        predicate: Predicate::RoleKeywords(UserRole::Student, STUDY_WORDS),
        producer: Producer::Template(selected_study_mode),
    },
    ResponseRule {
        intent: Intent::Maths,
        predicate: Predicate::Keywords(MATHS_WORDS),
        producer: Producer::OneOf(replies::maths_tips),
    },
    ResponseRule {
        intent: Intent::Usage,
        predicate: Predicate::Keywords(USAGE_WORDS),
        producer: Producer::Template(usage),
    },
    CATCH_ALL,
];

/// The material a teacher's message asks for. A material named in the
/// message overrides the session's selection.
pub fn requested_material(tokens: &Tokens, config: &SessionConfig) -> MaterialType {
    MaterialType::ALL
        .iter()
        .copied()
        .find(|kind| tokens.contains_any(kind.keywords()))
        .unwrap_or(config.material_type)
}

fn material_request(tokens: &Tokens, config: &SessionConfig) -> String {
    let kind = requested_material(tokens, config);
    let topic = extract_topic(tokens, kind.keywords());
    templates::material(kind, &topic, config)
        .unwrap_or_else(|| replies::UNSUPPORTED_MATERIAL.to_string())
}

fn study_request(mode: StudyMode, tokens: &Tokens, config: &SessionConfig) -> String {
    let triggers = [mode.keywords(), STUDY_WORDS].concat();
    let topic = extract_topic(tokens, &triggers);
    templates::study(mode, &topic, config)
        .unwrap_or_else(|| replies::NEUTRAL_FALLBACK[2].to_string())
}

fn quiz_me(tokens: &Tokens, config: &SessionConfig) -> String {
    study_request(StudyMode::QuizMe, tokens, config)
}

fn exam_prep(tokens: &Tokens, config: &SessionConfig) -> String {
    study_request(StudyMode::ExamPrep, tokens, config)
}

fn concept_explanation(tokens: &Tokens, config: &SessionConfig) -> String {
    study_request(StudyMode::ConceptExplanation, tokens, config)
}

fn homework_help(tokens: &Tokens, config: &SessionConfig) -> String {
    study_request(StudyMode::HomeworkHelp, tokens, config)
}

fn selected_study_mode(tokens: &Tokens, config: &SessionConfig) -> String {
    study_request(config.study_mode, tokens, config)
}

fn usage(_tokens: &Tokens, config: &SessionConfig) -> String {
    templates::usage(config)
}

/// First rule in [`RULES`] that applies to the message.
///
/// With selections outside their domains only the catch-all applies.
pub fn detect_intent(msg: &str, config: &SessionConfig) -> Intent {
    find_rule(&Tokens::from_input(msg), config).intent
}

fn find_rule(tokens: &Tokens, config: &SessionConfig) -> &'static ResponseRule {
    if !config.is_in_domain() {
        return &CATCH_ALL;
    }
    RULES
        .iter()
        .find(|rule| rule.predicate.matches(tokens, config))
        .unwrap_or(&CATCH_ALL)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    /// Set when the reply is a teaching material document.
    pub material: Option<MaterialType>,
    pub text: String,
}

/// Maps a message and the session's selections to a reply. Holds no
/// conversation state; only the random source is kept between calls.
#[derive(Clone)]
pub struct ResponseSelector {
    rng: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("rules", &RULES.len())
            .finish()
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom))
    }

    pub fn with_random(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    pub fn select(&self, input: &str, config: &SessionConfig) -> String {
        self.respond(input, config).text
    }

    pub fn respond(&self, input: &str, config: &SessionConfig) -> Reply {
        let tokens = Tokens::from_input(input);
        let rule = find_rule(&tokens, config);
        debug!(intent = rule.intent.as_str(), words = tokens.words().len(), "matched reply rule");

        let text = match rule.producer {
            Producer::Fixed(text) => text.to_string(),
            Producer::OneOf(set) => {
                let options = set(config.personality);
                options
                    .get(self.rng.pick(options.len()))
                    .copied()
                    .unwrap_or(replies::NEUTRAL_FALLBACK[0])
                    .to_string()
            }
            Producer::Template(render) => render(&tokens, config),
        };
        let material = (rule.intent == Intent::Material)
            .then(|| requested_material(&tokens, config))
            .filter(|kind| kind.is_supported());
        Reply { intent: rule.intent, material, text }
    }
}
