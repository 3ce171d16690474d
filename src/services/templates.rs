// src/services/templates.rs
//! Markdown documents produced for teaching materials and study modes.
//!
//! Every document starts with a `# ` title line carrying the title-cased
//! topic, followed by a metadata line. Question-based documents number their
//! questions continuously across sections and print per-section and overall
//! mark (or point) tallies computed from the questions themselves.

use super::replies;
use super::session_config::{CurriculumTier, MaterialType, SessionConfig, StudyMode, UserRole};
use super::topic::title_case;

const ANSWER_LINE: &str = "__________________________________________";
const BLANK: &str = "__________";

#[derive(Default)]
struct Doc {
    out: String,
}

impl Doc {
    fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
        self
    }

    fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    fn heading(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.blank().line(format!("## {}", text.as_ref()))
    }

    fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.line(format!("- {}", item.as_ref()));
        }
        self
    }

    fn numbered<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self.line(format!("{}. {}", i + 1, item.as_ref()));
        }
        self
    }

    fn table(&mut self, header: &[&str], rows: &[Vec<String>]) -> &mut Self {
        self.line(format!("| {} |", header.join(" | ")));
        self.line(format!("|{}", "---|".repeat(header.len())));
        for row in rows {
            self.line(format!("| {} |", row.join(" | ")));
        }
        self
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

/// Tally unit for question-based documents.
#[derive(Clone, Copy)]
enum Unit {
    Mark,
    Point,
}

impl Unit {
    fn count(self, n: u32) -> String {
        let word = match self {
            Unit::Mark => "mark",
            Unit::Point => "point",
        };
        if n == 1 { format!("{n} {word}") } else { format!("{n} {word}s") }
    }
}

struct Question {
    text: String,
    value: u32,
    options: Option<[String; 4]>,
    answer_lines: usize,
}

impl Question {
    fn choice(text: String, value: u32, options: [String; 4]) -> Self {
        Self { text, value, options: Some(options), answer_lines: 0 }
    }

    fn written(text: String, value: u32, answer_lines: usize) -> Self {
        Self { text, value, options: None, answer_lines }
    }
}

struct Part {
    heading: &'static str,
    questions: Vec<Question>,
}

impl Part {
    fn total(&self) -> u32 {
        self.questions.iter().map(|q| q.value).sum()
    }
}

fn parts_total(parts: &[Part]) -> u32 {
    parts.iter().map(Part::total).sum()
}

fn render_parts(doc: &mut Doc, parts: &[Part], unit: Unit) {
    let mut number = 1;
    for part in parts {
        doc.heading(format!("{} ({})", part.heading, unit.count(part.total())));
        for q in &part.questions {
            doc.line(format!("{number}. {} ({})", q.text, unit.count(q.value)));
            if let Some(options) = &q.options {
                for (letter, option) in ['a', 'b', 'c', 'd'].iter().zip(options) {
                    doc.line(format!("   {letter}) {option}"));
                }
            }
            for _ in 0..q.answer_lines {
                doc.line(format!("   {ANSWER_LINE}"));
            }
            number += 1;
        }
    }
}

/// Subject, grade and tier as shown under each title.
struct Context<'a> {
    subject: &'a str,
    grade: String,
    tier: Option<CurriculumTier>,
}

impl<'a> Context<'a> {
    fn new(config: &'a SessionConfig) -> Self {
        Self {
            subject: &config.subject,
            grade: config.grade_level.to_string(),
            tier: config.curriculum_tier(),
        }
    }

    fn tier_label(&self) -> &'static str {
        self.tier.map(CurriculumTier::label).unwrap_or("Unknown tier")
    }

    fn lesson_minutes(&self) -> u32 {
        self.tier.map(CurriculumTier::lesson_minutes).unwrap_or(40)
    }

    fn meta(&self, extra: &[String]) -> String {
        let mut fields = vec![
            format!("**Grade:** {} ({})", self.grade, self.tier_label()),
            format!("**Subject:** {}", self.subject),
        ];
        fields.extend(extra.iter().cloned());
        fields.join(" | ")
    }
}

/// Renders the document for a supported material type; `None` otherwise.
pub fn material(kind: MaterialType, topic: &str, config: &SessionConfig) -> Option<String> {
    let ctx = Context::new(config);
    let doc = match kind {
        MaterialType::Worksheet => worksheet(topic, &ctx),
        MaterialType::LessonPlan => lesson_plan(topic, &ctx),
        MaterialType::Activity => activity(topic, &ctx),
        MaterialType::Assessment => assessment(topic, &ctx),
        MaterialType::Flashcards => flashcards(topic, &ctx),
        MaterialType::Notes => notes(topic, &ctx),
        MaterialType::Quiz => quiz(topic, &ctx),
        MaterialType::Project | MaterialType::Unrecognized => return None,
    };
    Some(doc)
}

fn worksheet(topic: &str, ctx: &Context<'_>) -> String {
    let parts = vec![
        Part {
            heading: "Section A: Multiple Choice",
            questions: vec![
                Question::choice(
                    format!("Which statement best describes {topic}?"),
                    1,
                    [
                        format!("A rule or idea used in {topic}"),
                        "A type of weather".into(),
                        "A musical instrument".into(),
                        "None of the above".into(),
                    ],
                ),
                Question::choice(
                    format!("Where are you most likely to see {topic} in daily life?"),
                    1,
                    ["At home".into(), "At school".into(), "In the market".into(), "All of the above".into()],
                ),
                Question::choice(
                    format!("Which word is most closely linked to {topic}?"),
                    1,
                    ["Pattern".into(), "Holiday".into(), "Colour".into(), "Sleep".into()],
                ),
                Question::choice(
                    format!("What is the first step when solving a problem about {topic}?"),
                    1,
                    [
                        "Read the question carefully".into(),
                        "Guess the answer".into(),
                        "Skip the question".into(),
                        "Copy a friend".into(),
                    ],
                ),
                Question::choice(
                    format!("Why do we learn about {topic}?"),
                    1,
                    [
                        "To solve real problems".into(),
                        "To pass time".into(),
                        "Because it is easy".into(),
                        "We do not need to".into(),
                    ],
                ),
            ],
        },
        Part {
            heading: "Section B: Fill in the Blanks",
            questions: vec![
                Question::written(format!("The main idea of {topic} is {BLANK}."), 1, 0),
                Question::written(format!("One example of {topic} is {BLANK}."), 1, 0),
                Question::written(format!("A key word used when talking about {topic} is {BLANK}."), 1, 0),
                Question::written(format!("{} is important because {BLANK}.", title_case(topic)), 1, 0),
                Question::written(format!("I can use {topic} when I {BLANK}."), 1, 0),
            ],
        },
        Part {
            heading: "Section C: Short Answer",
            questions: vec![
                Question::written(format!("Explain in your own words what {topic} means."), 2, 2),
                Question::written(format!("Give two examples of {topic} from your surroundings."), 2, 2),
                Question::written(format!("Write one question you still have about {topic}."), 2, 2),
            ],
        },
        Part {
            heading: "Section D: Extended Task",
            questions: vec![Question::written(
                format!("Draw and label a picture, or write a short paragraph, that shows how {topic} works."),
                4,
                4,
            )],
        },
    ];
    let total = parts_total(&parts);

    let mut doc = Doc::default();
    doc.line(format!("# {} Worksheet: {}", ctx.subject, title_case(topic)))
        .line(ctx.meta(&[format!("**Total Marks:** {total}")]))
        .blank()
        .line(format!("Name: {BLANK}{BLANK}   Date: {BLANK}"))
        .heading("Instructions")
        .bullets([
            "Answer all questions in the spaces provided.",
            "Read each question carefully before you answer.",
            "For multiple choice questions, circle the correct letter.",
        ]);
    render_parts(&mut doc, &parts, Unit::Mark);
    doc.blank().line("---").line(format!("**Total: {}**", Unit::Mark.count(total)));
    doc.finish()
}

/// Splits the lesson into stages whose minutes add up to the lesson length.
fn lesson_stages(total_minutes: u32) -> [u32; 5] {
    const INTRO: u32 = 5;
    const CONCLUSION: u32 = 5;
    let middle = total_minutes.saturating_sub(INTRO + CONCLUSION);
    let base = middle / 3;
    let extra = middle % 3;
    let step = |i: u32| base + u32::from(i < extra);
    [INTRO, step(0), step(1), step(2), CONCLUSION]
}

fn lesson_plan(topic: &str, ctx: &Context<'_>) -> String {
    let minutes = ctx.lesson_minutes();
    let stages = lesson_stages(minutes);
    let rows = [
        (
            "Introduction",
            format!("Ask learners what they already know about {topic}. Write ideas on the board."),
            "Share prior knowledge and ask questions.",
        ),
        (
            "Step 1: Exploration",
            format!("Introduce {topic} using a real-life example and teaching aids."),
            "Observe, discuss in pairs and record observations.",
        ),
        (
            "Step 2: Guided Practice",
            "Work through examples with the class, asking probing questions.".to_string(),
            "Solve examples with the teacher and explain their thinking.",
        ),
        (
            "Step 3: Independent Practice",
            "Give a short task and move around to support learners.".to_string(),
            "Complete the task individually or in groups.",
        ),
        (
            "Conclusion",
            format!("Summarise the key points of {topic} and preview the next lesson."),
            "Answer recap questions and note the key points.",
        ),
    ];
    let table: Vec<Vec<String>> = rows
        .iter()
        .zip(stages)
        .map(|((stage, teacher, learner), mins)| {
            vec![stage.to_string(), format!("{mins} min"), teacher.clone(), learner.to_string()]
        })
        .collect();

    let mut doc = Doc::default();
    doc.line(format!("# Lesson Plan: {}", title_case(topic)))
        .line(ctx.meta(&[format!("**Duration:** {minutes} minutes")]))
        .heading("Learning Outcomes")
        .line("By the end of the lesson, the learner should be able to:")
        .numbered([
            format!("describe the key ideas of {topic};"),
            format!("give examples of {topic} from everyday life;"),
            format!("apply {topic} to solve a simple problem;"),
            format!("appreciate the importance of {topic}."),
        ])
        .heading("Key Inquiry Question")
        .bullets([format!("How is {topic} useful in our daily lives?")])
        .heading("Learning Resources")
        .bullets([
            format!("{} learner's book", ctx.subject),
            "Charts and pictures".to_string(),
            "Real objects from the local environment".to_string(),
        ])
        .heading("Lesson Development")
        .table(&["Stage", "Time", "Teacher Activity", "Learner Activity"], &table)
        .heading("Assessment")
        .bullets([
            "Oral questions during the lesson".to_string(),
            format!("Short written exercise on {topic}"),
            "Observation of group work".to_string(),
        ])
        .heading("Reflection")
        .line(format!("What went well? {BLANK}{BLANK}"))
        .line(format!("What will I improve next time? {BLANK}{BLANK}"));
    doc.finish()
}

fn activity(topic: &str, ctx: &Context<'_>) -> String {
    let group = match ctx.tier {
        Some(CurriculumTier::LowerPrimary) => "3-4 learners",
        _ => "4-5 learners",
    };
    let mut doc = Doc::default();
    doc.line(format!("# Class Activity: {}", title_case(topic)))
        .line(ctx.meta(&[
            format!("**Duration:** {} minutes", ctx.lesson_minutes()),
            format!("**Group Size:** {group}"),
        ]))
        .heading("Objectives")
        .bullets([
            format!("Explore {topic} through hands-on work."),
            "Practise working together and sharing ideas.".to_string(),
        ])
        .heading("Materials Needed")
        .bullets(["Manila paper and markers", "Locally available materials", "Activity cards"])
        .heading("Steps")
        .numbered([
            format!("Put learners into groups of {group} and explain that the activity is about {topic}."),
            format!("Give each group an activity card with a question about {topic}."),
            "Groups discuss and record their ideas on manila paper.".to_string(),
            "Each group presents its findings to the class.".to_string(),
            format!("Lead a short discussion connecting the findings to {topic}."),
        ])
        .heading("Reflection Questions")
        .numbered([
            format!("What did you learn about {topic}?"),
            "What was the most challenging part of the activity?".to_string(),
            "How did your group share the work?".to_string(),
        ]);
    doc.finish()
}

/// Lower bounds of the rubric bands (exceeding, meeting, approaching).
fn rubric_bands(total: u32) -> [u32; 3] {
    let at_least = |percent: u32| (total * percent).div_ceil(100);
    [at_least(85), at_least(60), at_least(35)]
}

fn assessment(topic: &str, ctx: &Context<'_>) -> String {
    let parts = vec![
        Part {
            heading: "Section A: Knowledge",
            questions: vec![
                Question::written(format!("Define {topic}."), 2, 2),
                Question::written(format!("List two key words related to {topic}."), 2, 2),
                Question::written(format!("State one fact about {topic}."), 2, 1),
                Question::written(format!("Give one example of {topic}."), 2, 1),
                Question::written(format!("Name one place where {topic} is used."), 2, 1),
            ],
        },
        Part {
            heading: "Section B: Application",
            questions: vec![
                Question::written(format!("Use {topic} to solve a problem from your community. Show your work."), 5, 4),
                Question::written(format!("Describe how you would teach {topic} to a younger learner."), 5, 4),
            ],
        },
        Part {
            heading: "Section C: Analysis",
            questions: vec![Question::written(
                format!("Discuss the importance of {topic}, giving reasons and examples."),
                10,
                6,
            )],
        },
    ];
    let total = parts_total(&parts);
    let [exceeding, meeting, approaching] = rubric_bands(total);
    let rubric = vec![
        vec![
            "Exceeding Expectations".to_string(),
            "Complete, accurate answers with clear reasoning".to_string(),
            format!("{exceeding}-{total}"),
        ],
        vec![
            "Meeting Expectations".to_string(),
            "Mostly accurate answers with some reasoning".to_string(),
            format!("{meeting}-{}", exceeding.saturating_sub(1)),
        ],
        vec![
            "Approaching Expectations".to_string(),
            "Partly correct answers, limited reasoning".to_string(),
            format!("{approaching}-{}", meeting.saturating_sub(1)),
        ],
        vec![
            "Below Expectations".to_string(),
            "Few correct answers".to_string(),
            format!("0-{}", approaching.saturating_sub(1)),
        ],
    ];

    let mut doc = Doc::default();
    doc.line(format!("# {} Assessment: {}", ctx.subject, title_case(topic)))
        .line(ctx.meta(&[
            format!("**Time:** {} minutes", ctx.lesson_minutes()),
            format!("**Total Marks:** {total}"),
        ]))
        .heading("Instructions")
        .bullets(["Answer all questions.", "Write neatly in the spaces provided."]);
    render_parts(&mut doc, &parts, Unit::Mark);
    doc.blank().line("---").line(format!("**Total: {}**", Unit::Mark.count(total)));
    doc.heading("Marking Rubric")
        .table(&["Level", "Description", "Marks"], &rubric);
    doc.finish()
}

fn flashcards(topic: &str, ctx: &Context<'_>) -> String {
    let cards: [(String, String); 8] = [
        (format!("What is {topic}?"), "A short definition in your own words".into()),
        (format!("Key word for {topic}"), "Write its meaning".into()),
        (format!("Example of {topic}"), "One real-life example".into()),
        (format!("Why is {topic} important?"), "One reason it matters".into()),
        (format!("Where do we see {topic}?"), "A place or situation".into()),
        (format!("A common mistake with {topic}"), "How to avoid it".into()),
        (format!("Draw {topic}"), "A simple labelled sketch".into()),
        (format!("One question about {topic}"), "Its answer".into()),
    ];
    let rows: Vec<Vec<String>> = cards
        .iter()
        .enumerate()
        .map(|(i, (front, back))| vec![(i + 1).to_string(), front.clone(), back.clone()])
        .collect();

    let mut doc = Doc::default();
    doc.line(format!("# Flashcards: {}", title_case(topic)))
        .line(ctx.meta(&[format!("**Cards:** {}", cards.len())]))
        .blank()
        .table(&["Card", "Front", "Back"], &rows)
        .blank()
        .line("Cut along the lines and fold each card in half. Quiz a partner using the front side.");
    doc.finish()
}

fn notes(topic: &str, ctx: &Context<'_>) -> String {
    let vocabulary = vec![
        vec![title_case(topic), format!("The main idea studied in these notes on {topic}")],
        vec!["Example".to_string(), "A case that shows an idea in action".to_string()],
        vec!["Key point".to_string(), "An important fact to remember".to_string()],
    ];
    let mut doc = Doc::default();
    doc.line(format!("# Notes: {}", title_case(topic)))
        .line(ctx.meta(&[]))
        .heading("1. Introduction")
        .line(format!(
            "{} is an important part of {}. These notes cover the main ideas, an example and the key words.",
            title_case(topic),
            ctx.subject
        ))
        .heading("2. Key Points")
        .numbered([
            format!("{} has a clear meaning that we can describe in simple words.", title_case(topic)),
            format!("We can find {topic} in our homes, school and community."),
            format!("Understanding {topic} helps us solve everyday problems."),
        ])
        .heading("3. Worked Example")
        .line(format!("Problem: show how {topic} applies to a situation at school."))
        .line("Solution: identify what is given, choose the right idea, then explain each step.")
        .heading("4. Key Vocabulary")
        .table(&["Term", "Meaning"], &vocabulary)
        .heading("5. Summary")
        .bullets([
            format!("{} can be explained, observed and applied.", title_case(topic)),
            "Review these notes and try the practice questions.".to_string(),
        ]);
    doc.finish()
}

fn quiz(topic: &str, ctx: &Context<'_>) -> String {
    let mut choice = Vec::new();
    let prompts = [
        format!("Which of these is an example of {topic}?"),
        format!("Which word best relates to {topic}?"),
        format!("Where would you use {topic}?"),
        format!("What should you do first in a question about {topic}?"),
        format!("Which statement about {topic} is true?"),
        format!("Who benefits from understanding {topic}?"),
    ];
    for prompt in prompts {
        choice.push(Question::choice(
            prompt,
            1,
            ["Option A".into(), "Option B".into(), "Option C".into(), "Option D".into()],
        ));
    }
    let parts = vec![
        Part { heading: "Part 1: Multiple Choice", questions: choice },
        Part {
            heading: "Part 2: Short Answer",
            questions: vec![
                Question::written(format!("Define {topic}."), 2, 1),
                Question::written(format!("Give an example of {topic}."), 2, 1),
                Question::written(format!("Why is {topic} useful?"), 2, 1),
                Question::written(format!("Describe one fact you learned about {topic}."), 2, 1),
            ],
        },
    ];
    let total = parts_total(&parts);
    let count: usize = parts.iter().map(|p| p.questions.len()).sum();

    let mut doc = Doc::default();
    doc.line(format!("# Quiz: {}", title_case(topic)))
        .line(ctx.meta(&[
            format!("**Questions:** {count}"),
            format!("**Total Points:** {total}"),
        ]));
    render_parts(&mut doc, &parts, Unit::Point);
    doc.blank().line("---").line(format!("**Total: {}**", Unit::Point.count(total)));
    doc.heading("Answer Key")
        .bullets([
            "Part 1: accept the option that matches the lesson content.",
            "Part 2: award full points for a correct answer with an example, half for a partial answer.",
        ]);
    doc.finish()
}

/// Renders the guide for a study mode; `None` for an unrecognized mode.
pub fn study(mode: StudyMode, topic: &str, config: &SessionConfig) -> Option<String> {
    let ctx = Context::new(config);
    let intro = replies::study_intro(config.personality);
    let doc = match mode {
        StudyMode::HomeworkHelp => homework_help(topic, &ctx, intro),
        StudyMode::ExamPrep => exam_prep(topic, &ctx, intro),
        StudyMode::ConceptExplanation => concept_explanation(topic, &ctx, intro, config),
        StudyMode::QuizMe => quiz_me(topic, &ctx, intro),
        StudyMode::Unrecognized => return None,
    };
    Some(doc)
}

fn homework_help(topic: &str, ctx: &Context<'_>, intro: &str) -> String {
    let mut doc = Doc::default();
    doc.line(format!("# Homework Help: {}", title_case(topic)))
        .line(ctx.meta(&[]))
        .blank()
        .line(intro)
        .heading("Step-by-Step Approach")
        .numbered([
            "Read the question twice and underline the key words.".to_string(),
            format!("Write down what you already know about {topic}."),
            "Decide what the question is asking you to find or explain.".to_string(),
            "Work through one small step at a time and write each step down.".to_string(),
            "Check your answer: does it make sense?".to_string(),
        ])
        .heading("Hints")
        .bullets([
            format!("Look back at your {} notes on {topic}.", ctx.subject),
            "Draw a picture or table if the problem feels confusing.".to_string(),
        ])
        .heading("Your Turn")
        .line("Send me the exact question and show me your first step. I'll check it with you.");
    doc.finish()
}

fn exam_prep(topic: &str, ctx: &Context<'_>, intro: &str) -> String {
    let plan = vec![
        vec!["1".into(), "Review notes".into(), format!("Read and summarise your notes on {topic}"), "30 min".into()],
        vec!["2".into(), "Key terms".into(), "Make flashcards of key words".into(), "30 min".into()],
        vec!["3".into(), "Practice".into(), format!("Answer past questions on {topic}"), "45 min".into()],
        vec!["4".into(), "Weak areas".into(), "Redo questions you got wrong".into(), "30 min".into()],
        vec!["5".into(), "Mock test".into(), "Time yourself on a full practice paper".into(), "60 min".into()],
    ];
    let mut doc = Doc::default();
    doc.line(format!("# Exam Preparation: {}", title_case(topic)))
        .line(ctx.meta(&[]))
        .blank()
        .line(intro)
        .heading("5-Day Revision Plan")
        .table(&["Day", "Focus", "Activity", "Time"], &plan)
        .heading("Checklist")
        .line(format!("- [ ] I can explain {topic} in my own words"))
        .line("- [ ] I know the key terms")
        .line("- [ ] I have practised past questions")
        .line("- [ ] I have done a timed mock test")
        .heading("Exam Day Tips")
        .bullets([
            "Sleep well the night before.",
            "Read every question carefully.",
            "Answer the questions you know first.",
        ]);
    doc.finish()
}

fn concept_explanation(topic: &str, ctx: &Context<'_>, intro: &str, config: &SessionConfig) -> String {
    let mut doc = Doc::default();
    doc.line(format!("# Understanding {}", title_case(topic)))
        .line(ctx.meta(&[]))
        .blank()
        .line(intro)
        .heading("In Simple Terms")
        .line(format!(
            "{} is an idea in {} that describes how something works or why it happens.",
            title_case(topic),
            ctx.subject
        ))
        .heading("An Analogy")
        .line(replies::analogy(config.personality, topic))
        .heading("Example")
        .line(format!("Look around your home or classroom and find one place where {topic} appears."))
        .heading("Check Your Understanding")
        .numbered([
            format!("How would you explain {topic} to a friend?"),
            format!("Can you give your own example of {topic}?"),
        ]);
    doc.finish()
}

fn quiz_me(topic: &str, ctx: &Context<'_>, intro: &str) -> String {
    let parts = vec![Part {
        heading: "Questions",
        questions: vec![
            Question::written(format!("What is {topic}?"), 2, 1),
            Question::written(format!("Give one example of {topic}."), 2, 1),
            Question::written(format!("Why is {topic} important?"), 2, 1),
            Question::written(format!("What is one common mistake people make with {topic}?"), 2, 1),
            Question::written(format!("How would you use {topic} outside school?"), 2, 1),
        ],
    }];
    let total = parts_total(&parts);
    let mut doc = Doc::default();
    doc.line(format!("# Quiz Me: {}", title_case(topic)))
        .line(ctx.meta(&[format!("**Total Points:** {total}")]))
        .blank()
        .line(intro);
    render_parts(&mut doc, &parts, Unit::Point);
    doc.blank()
        .line("---")
        .line(format!("**Total: {}**", Unit::Point.count(total)))
        .blank()
        .line("Reply with your answers and I'll tell you how you did.");
    doc.finish()
}

/// How to use the assistant in the session's role.
pub fn usage(config: &SessionConfig) -> String {
    let mut doc = Doc::default();
    match config.role {
        UserRole::Student => {
            doc.line("# How I Can Help You Study")
                .line(format!("**Current study mode:** {}", config.study_mode.label()))
                .blank()
                .bullets([
                    "Homework help: \"help me with long division\"",
                    "Exam preparation: \"revise photosynthesis for my exam\"",
                    "Explanations: \"explain the water cycle\"",
                    "Quiz: \"quiz me on fractions\"",
                ])
                .blank()
                .line("Change the study mode in the sidebar to set what I do with a plain topic.");
        }
        _ => {
            doc.line("# How I Can Help You Teach")
                .line(format!(
                    "**Current material type:** {} | **Subject:** {} | **Grade:** {}",
                    config.material_type.label(),
                    config.subject,
                    config.grade_level
                ))
                .blank()
                .line("Ask for a material and a topic, for example:")
                .bullets([
                    "\"create a worksheet on fractions\"",
                    "\"lesson plan about the water cycle\"",
                    "\"generate flashcards on farm animals\"",
                ])
                .blank()
                .line("Pick the grade, subject and material type in the sidebar first.");
        }
    }
    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_config::GradeLevel;

    fn config() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn worksheet_totals_add_up() {
        let doc = material(MaterialType::Worksheet, "fractions", &config()).unwrap();
        assert!(doc.starts_with("# Mathematics Worksheet: Fractions"));
        assert!(doc.contains("**Total Marks:** 20"));
        assert!(doc.contains("## Section A: Multiple Choice (5 marks)"));
        assert!(doc.contains("## Section C: Short Answer (6 marks)"));
        assert!(doc.contains("14. Draw and label"));
        assert!(doc.ends_with("**Total: 20 marks**"));
        assert!(doc.contains(ANSWER_LINE));
    }

    #[test]
    fn lesson_minutes_follow_tier() {
        for total in [30, 35, 40] {
            assert_eq!(lesson_stages(total).iter().sum::<u32>(), total);
        }
        let mut junior = config();
        junior.grade_level = GradeLevel::new(8);
        let doc = material(MaterialType::LessonPlan, "the water cycle", &junior).unwrap();
        assert!(doc.starts_with("# Lesson Plan: The Water Cycle"));
        assert!(doc.contains("**Duration:** 40 minutes"));
        assert!(doc.contains("| Stage | Time | Teacher Activity | Learner Activity |"));
    }

    #[test]
    fn assessment_rubric_covers_all_marks() {
        assert_eq!(rubric_bands(30), [26, 18, 11]);
        let doc = material(MaterialType::Assessment, "soil", &config()).unwrap();
        assert!(doc.contains("**Total Marks:** 30"));
        assert!(doc.contains("| Exceeding Expectations | Complete, accurate answers with clear reasoning | 26-30 |"));
        assert!(doc.contains("| Below Expectations | Few correct answers | 0-10 |"));
    }

    #[test]
    fn quiz_counts_points() {
        let doc = material(MaterialType::Quiz, "plants", &config()).unwrap();
        assert!(doc.contains("**Questions:** 10"));
        assert!(doc.contains("**Total Points:** 14"));
        assert!(doc.contains("1. Which of these is an example of plants? (1 point)"));
        assert!(doc.contains("7. Define plants. (2 points)"));
    }

    #[test]
    fn flashcards_have_eight_cards() {
        let doc = material(MaterialType::Flashcards, "farm animals", &config()).unwrap();
        assert!(doc.contains("| 8 | One question about farm animals | Its answer |"));
        assert!(!doc.contains("| 9 |"));
    }

    #[test]
    fn project_has_no_template() {
        assert!(material(MaterialType::Project, "bridges", &config()).is_none());
        assert!(study(StudyMode::Unrecognized, "bridges", &config()).is_none());
    }

    #[test]
    fn study_documents_have_titles() {
        let cfg = config();
        for (mode, title) in [
            (StudyMode::HomeworkHelp, "# Homework Help: Division"),
            (StudyMode::ExamPrep, "# Exam Preparation: Division"),
            (StudyMode::ConceptExplanation, "# Understanding Division"),
            (StudyMode::QuizMe, "# Quiz Me: Division"),
        ] {
            let doc = study(mode, "division", &cfg).unwrap();
            assert!(doc.starts_with(title), "{doc}");
        }
    }

    #[test]
    fn usage_depends_on_role() {
        let mut cfg = config();
        assert!(usage(&cfg).contains("worksheet on fractions"));
        cfg.role = UserRole::Student;
        assert!(usage(&cfg).contains("quiz me on fractions"));
    }
}
