// src/services/session_config.rs
//! Per-session selections (personality, grade, subject, material type, role,
//! study mode) and their fixed domains.
//!
//! Values arriving from the outside are parsed leniently. Anything that does
//! not name a member of the domain is kept as an explicit out-of-domain value
//! so the reply engine can fall back to its catch-all rule instead of failing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lowercases and keeps only alphanumerics, so "Lesson Plan", "lesson_plan"
/// and "lessonPlan" compare equal.
fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! selectable {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => ($key:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            /// Any value outside the domain.
            Unrecognized,
        }

        impl $name {
            /// Every member of the domain, in display order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn key(self) -> &'static str {
                match self {
                    $( $name::$variant => $key, )+
                    $name::Unrecognized => "unrecognized",
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                    $name::Unrecognized => "Unrecognized",
                }
            }

            pub fn parse(raw: &str) -> Self {
                let wanted = squash(raw);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| squash(v.key()) == wanted || squash(v.label()) == wanted)
                    .unwrap_or($name::Unrecognized)
            }

            pub fn is_recognized(self) -> bool {
                self != $name::Unrecognized
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.key())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::parse(&raw))
            }
        }
    };
}

selectable! {
    /// Tone used for greetings, small talk and fallback replies.
    pub enum Personality {
        Friendly => ("friendly", "Friendly"),
        Professional => ("professional", "Professional"),
        Humorous => ("humorous", "Humorous"),
        Philosophical => ("philosophical", "Philosophical"),
    }
}

selectable! {
    /// Kind of teaching material produced for teachers.
    pub enum MaterialType {
        Worksheet => ("worksheet", "Worksheet"),
        LessonPlan => ("lessonPlan", "Lesson Plan"),
        Activity => ("activity", "Activity"),
        Assessment => ("assessment", "Assessment"),
        Flashcards => ("flashcards", "Flashcards"),
        Notes => ("notes", "Notes"),
        Quiz => ("quiz", "Quiz"),
        Project => ("project", "Project"),
    }
}

selectable! {
    pub enum UserRole {
        Teacher => ("teacher", "Teacher"),
        Student => ("student", "Student"),
    }
}

selectable! {
    /// How the assistant helps a student.
    pub enum StudyMode {
        HomeworkHelp => ("homeworkHelp", "Homework Help"),
        ExamPrep => ("examPrep", "Exam Preparation"),
        ConceptExplanation => ("conceptExplanation", "Concept Explanation"),
        QuizMe => ("quizMe", "Quiz Me"),
    }
}

impl MaterialType {
    /// Whether a document template exists for this type.
    pub fn is_supported(self) -> bool {
        !matches!(self, MaterialType::Project | MaterialType::Unrecognized)
    }

    /// Words and phrases that name this material type in free text.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            MaterialType::Worksheet => &["worksheet", "worksheets"],
            MaterialType::LessonPlan => &["lesson plan", "lesson plans", "lesson"],
            MaterialType::Activity => &["activity", "activities"],
            MaterialType::Assessment => &["assessment", "assessments", "test", "tests", "exam", "exams"],
            MaterialType::Flashcards => &["flashcards", "flashcard", "flash cards", "flash card"],
            MaterialType::Notes => &["notes", "note"],
            MaterialType::Quiz => &["quiz", "quizzes"],
            MaterialType::Project => &["project", "projects"],
            MaterialType::Unrecognized => &[],
        }
    }
}

impl StudyMode {
    /// Words and phrases that ask for this study mode in free text.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            StudyMode::HomeworkHelp => &[
                "homework", "my homework", "assignment", "solve", "help me", "help me with",
                "help with",
            ],
            StudyMode::ExamPrep => &[
                "exam", "exams", "my exam", "for my exam", "my exams", "for my exams", "revise",
                "revision", "test", "tests",
            ],
            StudyMode::ConceptExplanation => &[
                "explain", "what is", "what are", "how does", "how do", "why", "define",
                "meaning",
            ],
            StudyMode::QuizMe => &["quiz me", "quiz", "test me"],
            StudyMode::Unrecognized => &[],
        }
    }
}

/// Grade-range grouping that decides which subjects are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurriculumTier {
    LowerPrimary,
    UpperPrimary,
    JuniorSecondary,
}

impl CurriculumTier {
    pub const ALL: &'static [CurriculumTier] = &[
        CurriculumTier::LowerPrimary,
        CurriculumTier::UpperPrimary,
        CurriculumTier::JuniorSecondary,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CurriculumTier::LowerPrimary => "lowerPrimary",
            CurriculumTier::UpperPrimary => "upperPrimary",
            CurriculumTier::JuniorSecondary => "juniorSecondary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CurriculumTier::LowerPrimary => "Lower Primary",
            CurriculumTier::UpperPrimary => "Upper Primary",
            CurriculumTier::JuniorSecondary => "Junior Secondary",
        }
    }

    pub fn grades(self) -> std::ops::RangeInclusive<u8> {
        match self {
            CurriculumTier::LowerPrimary => 1..=3,
            CurriculumTier::UpperPrimary => 4..=6,
            CurriculumTier::JuniorSecondary => 7..=9,
        }
    }

    pub fn subjects(self) -> &'static [&'static str] {
        match self {
            CurriculumTier::LowerPrimary => &[
                "English",
                "Kiswahili",
                "Mathematics",
                "Environmental Activities",
                "Hygiene and Nutrition",
                "Creative Activities",
                "Religious Education",
            ],
            CurriculumTier::UpperPrimary => &[
                "English",
                "Kiswahili",
                "Mathematics",
                "Science and Technology",
                "Agriculture",
                "Social Studies",
                "Creative Arts",
                "Religious Education",
            ],
            CurriculumTier::JuniorSecondary => &[
                "English",
                "Kiswahili",
                "Mathematics",
                "Integrated Science",
                "Pre-Technical Studies",
                "Social Studies",
                "Agriculture",
                "Business Studies",
                "Religious Education",
                "Creative Arts and Sports",
            ],
        }
    }

    /// Subject selected when a session starts or moves into this tier.
    pub fn default_subject(self) -> &'static str {
        "Mathematics"
    }

    /// Canonical spelling of `subject` if this tier offers it.
    pub fn find_subject(self, subject: &str) -> Option<&'static str> {
        let wanted = squash(subject);
        self.subjects().iter().copied().find(|s| squash(s) == wanted)
    }

    /// Length of one lesson, in minutes.
    pub fn lesson_minutes(self) -> u32 {
        match self {
            CurriculumTier::LowerPrimary => 30,
            CurriculumTier::UpperPrimary => 35,
            CurriculumTier::JuniorSecondary => 40,
        }
    }
}

impl fmt::Display for CurriculumTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Grade 1" through "Grade 9". Other numbers are kept but are out of domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(number: u8) -> Self {
        Self(number)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = GradeLevel> {
        (Self::MIN..=Self::MAX).map(GradeLevel)
    }

    /// Accepts "Grade 4", "grade4" or "4". Anything else maps to grade 0.
    pub fn parse(raw: &str) -> Self {
        let squashed = squash(raw);
        let digits = squashed.strip_prefix("grade").unwrap_or(&squashed);
        Self(digits.parse().unwrap_or(0))
    }

    pub fn tier(self) -> Option<CurriculumTier> {
        CurriculumTier::ALL
            .iter()
            .copied()
            .find(|t| t.grades().contains(&self.0))
    }

    pub fn is_recognized(self) -> bool {
        self.tier().is_some()
    }
}

impl Default for GradeLevel {
    fn default() -> Self {
        Self(4)
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade {}", self.0)
    }
}

impl Serialize for GradeLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GradeLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Selections that shape every reply in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub personality: Personality,
    pub grade_level: GradeLevel,
    pub subject: String,
    pub material_type: MaterialType,
    pub role: UserRole,
    pub study_mode: StudyMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let grade_level = GradeLevel::default();
        let subject = grade_level
            .tier()
            .map(CurriculumTier::default_subject)
            .unwrap_or("Mathematics");
        Self {
            personality: Personality::Friendly,
            grade_level,
            subject: subject.to_string(),
            material_type: MaterialType::Worksheet,
            role: UserRole::Teacher,
            study_mode: StudyMode::HomeworkHelp,
        }
    }
}

/// A selection that is not part of its field's domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {field}")]
pub struct InvalidSelection {
    pub field: &'static str,
    pub value: String,
}

impl InvalidSelection {
    fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }
}

/// Partial change to a [`SessionConfig`]; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub personality: Option<String>,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub material_type: Option<String>,
    pub role: Option<String>,
    pub study_mode: Option<String>,
}

impl SessionConfig {
    /// `None` when the grade is outside Grade 1-9.
    pub fn curriculum_tier(&self) -> Option<CurriculumTier> {
        self.grade_level.tier()
    }

    /// Whether every field holds a member of its domain. The subject must be
    /// offered by the grade's tier.
    pub fn is_in_domain(&self) -> bool {
        let subject_ok = self
            .curriculum_tier()
            .is_some_and(|tier| tier.find_subject(&self.subject).is_some());
        subject_ok
            && self.personality.is_recognized()
            && self.material_type.is_recognized()
            && self.role.is_recognized()
            && self.study_mode.is_recognized()
    }

    /// Applies `update` atomically: either every field is valid and the
    /// config changes, or nothing changes.
    ///
    /// Moving to a grade in another tier keeps the subject when the new tier
    /// offers it and otherwise switches to the tier's default subject.
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), InvalidSelection> {
        fn pick<T: Copy>(
            raw: Option<&String>,
            field: &'static str,
            parse: fn(&str) -> T,
            ok: fn(T) -> bool,
            current: T,
        ) -> Result<T, InvalidSelection> {
            match raw {
                None => Ok(current),
                Some(raw) => {
                    let value = parse(raw);
                    if ok(value) {
                        Ok(value)
                    } else {
                        Err(InvalidSelection::new(field, raw.as_str()))
                    }
                }
            }
        }

        let personality = pick(
            update.personality.as_ref(),
            "personality",
            Personality::parse,
            Personality::is_recognized,
            self.personality,
        )?;
        let grade_level = pick(
            update.grade_level.as_ref(),
            "grade level",
            GradeLevel::parse,
            GradeLevel::is_recognized,
            self.grade_level,
        )?;
        let material_type = pick(
            update.material_type.as_ref(),
            "material type",
            MaterialType::parse,
            MaterialType::is_recognized,
            self.material_type,
        )?;
        let role = pick(
            update.role.as_ref(),
            "role",
            UserRole::parse,
            UserRole::is_recognized,
            self.role,
        )?;
        let study_mode = pick(
            update.study_mode.as_ref(),
            "study mode",
            StudyMode::parse,
            StudyMode::is_recognized,
            self.study_mode,
        )?;

        let tier = grade_level
            .tier()
            .ok_or_else(|| InvalidSelection::new("grade level", grade_level.to_string()))?;
        let subject = match update.subject.as_deref() {
            Some(raw) => tier
                .find_subject(raw)
                .ok_or_else(|| InvalidSelection::new("subject", raw))?,
            None => tier
                .find_subject(&self.subject)
                .unwrap_or_else(|| tier.default_subject()),
        };

        self.personality = personality;
        self.grade_level = grade_level;
        self.subject = subject.to_string();
        self.material_type = material_type;
        self.role = role;
        self.study_mode = study_mode;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub supported: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TierOptions {
    pub value: &'static str,
    pub label: &'static str,
    pub grades: Vec<String>,
    pub subjects: &'static [&'static str],
}

/// Everything a client needs to render the selection controls.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigOptions {
    pub personalities: Vec<Choice>,
    pub grade_levels: Vec<String>,
    pub tiers: Vec<TierOptions>,
    pub material_types: Vec<MaterialChoice>,
    pub roles: Vec<Choice>,
    pub study_modes: Vec<Choice>,
    pub defaults: SessionConfig,
}

pub fn options() -> ConfigOptions {
    fn choices<T: Copy>(all: &[T], key: fn(T) -> &'static str, label: fn(T) -> &'static str) -> Vec<Choice> {
        all.iter()
            .map(|&v| Choice { value: key(v), label: label(v) })
            .collect()
    }

    ConfigOptions {
        personalities: choices(Personality::ALL, Personality::key, Personality::label),
        grade_levels: GradeLevel::all().map(|g| g.to_string()).collect(),
        tiers: CurriculumTier::ALL
            .iter()
            .map(|&tier| TierOptions {
                value: tier.key(),
                label: tier.label(),
                grades: tier.grades().map(|n| GradeLevel::new(n).to_string()).collect(),
                subjects: tier.subjects(),
            })
            .collect(),
        material_types: MaterialType::ALL
            .iter()
            .map(|&m| MaterialChoice {
                value: m.key(),
                label: m.label(),
                supported: m.is_supported(),
            })
            .collect(),
        roles: choices(UserRole::ALL, UserRole::key, UserRole::label),
        study_modes: choices(StudyMode::ALL, StudyMode::key, StudyMode::label),
        defaults: SessionConfig::default(),
    }
}
