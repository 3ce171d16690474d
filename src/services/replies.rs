// src/services/replies.rs
//! Canned replies. Sets are drawn from at random; single strings are fixed.

use super::session_config::Personality;

pub const UNSUPPORTED_MATERIAL: &str = "Sorry, the Project material type isn't supported yet. \
Please choose Worksheet, Lesson Plan, Activity, Assessment, Flashcards, Notes or Quiz from the material type menu.";

pub const IDENTITY: &str = "I am a classroom assistant. Teachers can ask me for worksheets, lesson plans, \
activities, assessments, flashcards, notes and quizzes. Students can ask me for homework help, exam revision, \
explanations or a quick quiz.";

/// Used when the session's selections are not usable.
pub const NEUTRAL_FALLBACK: &[&str] = &[
    "That's an interesting question.",
    "I'm not sure how to answer that yet, but I'm learning!",
    "Could you try rephrasing your question?",
    "Tell me more about what you're trying to achieve.",
];

pub fn greetings(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Friendly => &[
            "Hello there! 😊 What would you like to work on today?",
            "Hi! Great to see you. How can I help?",
            "Hey! I'm ready when you are. What are we learning today?",
        ],
        Personality::Professional => &[
            "Good day. How may I assist you?",
            "Hello. Please tell me what you need and I will prepare it.",
        ],
        Personality::Humorous => &[
            "Hello! I've sharpened all my pencils. What are we tackling today?",
            "Hey there! My brain is fully charged and only slightly dusty. How can I help?",
            "Hi! Ready to learn something, or at least pretend convincingly?",
        ],
        Personality::Philosophical => &[
            "Greetings. Every question is the beginning of understanding. What is yours?",
            "Hello, fellow seeker. What shall we wonder about today?",
        ],
        Personality::Unrecognized => NEUTRAL_FALLBACK,
    }
}

pub fn gratitude(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Friendly => &[
            "You're very welcome! Anything else I can help with?",
            "Happy to help! Just ask if you need more.",
        ],
        Personality::Professional => &["You are welcome. Let me know if you need anything further."],
        Personality::Humorous => &[
            "No problem! I accept payment in gold stars.",
            "Anytime! Helping is my favourite subject.",
        ],
        Personality::Philosophical => &[
            "Gratitude is the memory of the heart. You are most welcome.",
            "The pleasure of learning is shared. You are welcome.",
        ],
        Personality::Unrecognized => NEUTRAL_FALLBACK,
    }
}

pub fn maths_tips(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Friendly => &[
            "Maths is so much fun once it clicks! Tell me the exact problem and we'll work through it step by step.",
            "I love maths! Try drawing the problem first, then tell me which part is tricky.",
        ],
        Personality::Professional => &[
            "For mathematics, please share the exact problem or topic and I will provide a structured explanation.",
        ],
        Personality::Humorous => &[
            "Maths: the only place where buying 60 watermelons is perfectly normal. What's the problem?",
            "Don't worry, numbers only look scary. Send me the question and we'll tame it.",
        ],
        Personality::Philosophical => &[
            "Mathematics is the language in which patterns speak. Which pattern puzzles you?",
        ],
        Personality::Unrecognized => NEUTRAL_FALLBACK,
    }
}

pub fn fallbacks(personality: Personality) -> &'static [&'static str] {
    match personality {
        Personality::Friendly => &[
            "That's an interesting question! Could you tell me a bit more?",
            "I'm not sure I follow yet. Can you rephrase that for me?",
            "Tell me more about what you're trying to achieve and I'll do my best to help!",
        ],
        Personality::Professional => &[
            "Could you please clarify your request?",
            "I did not recognise that request. Please provide more detail.",
        ],
        Personality::Humorous => &[
            "Hmm, that one flew right over my head. Try again?",
            "I'm a chatbot, not a mind reader (yet). Could you rephrase that?",
        ],
        Personality::Philosophical => &[
            "An intriguing thought. What lies beneath the question?",
            "Perhaps the answer begins with a clearer question. Could you say more?",
        ],
        Personality::Unrecognized => NEUTRAL_FALLBACK,
    }
}

/// Opening line of study-mode documents.
pub fn study_intro(personality: Personality) -> &'static str {
    match personality {
        Personality::Friendly => "Let's work through this together! 😊",
        Personality::Professional => "Below is a structured guide.",
        Personality::Humorous => "Grab a snack, this is going to be fun (mostly).",
        Personality::Philosophical => "Understanding grows one careful step at a time.",
        Personality::Unrecognized => "Here is a guide.",
    }
}

/// Analogy paragraph for concept explanations.
pub fn analogy(personality: Personality, topic: &str) -> String {
    match personality {
        Personality::Friendly => format!(
            "Think of {topic} like building with blocks: each small idea sits on the one below it, \
and together they make something bigger."
        ),
        Personality::Professional => format!(
            "{topic} can be compared to a process with inputs, steps and outputs. Identify each part in turn."
        ),
        Personality::Humorous => format!(
            "Imagine {topic} as a recipe. Skip a step and you get a pancake that looks like a map of Africa. \
Follow the steps and it all comes together."
        ),
        Personality::Philosophical => format!(
            "{topic} is like a river: you can study a single drop, but its meaning comes from how the whole flows."
        ),
        Personality::Unrecognized => format!("{topic} is made of smaller ideas that connect to each other."),
    }
}
