//! Keyword-routed wellness advice.
//!
//! A query is classified into one of six topics by checking the lower-cased
//! query for keyword substrings, in a fixed priority order. The first topic
//! whose keyword list matches wins; `Topic::General` catches everything else.
//!
//! Advice texts live in `texts/` as Tera templates embedded at compile time.
//! Only the general template interpolates anything (the caller's query).

use tera::{Context, Tera};

use crate::error::AppError;

/// Advice topic selected for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Stress,
    Sleep,
    Exercise,
    MentalHealth,
    Nutrition,
    General,
}

impl Topic {
    /// Every topic, keyword topics first in evaluation order.
    pub const ALL: [Topic; 6] = [
        Topic::Stress,
        Topic::Sleep,
        Topic::Exercise,
        Topic::MentalHealth,
        Topic::Nutrition,
        Topic::General,
    ];

    /// Name the topic's advice template is registered under.
    pub fn template_name(self) -> &'static str {
        match self {
            Topic::Stress => "stress.txt",
            Topic::Sleep => "sleep.txt",
            Topic::Exercise => "exercise.txt",
            Topic::MentalHealth => "mental_health.txt",
            Topic::Nutrition => "nutrition.txt",
            Topic::General => "general.txt",
        }
    }

    fn template_source(self) -> &'static str {
        match self {
            Topic::Stress => include_str!("texts/stress.txt"),
            Topic::Sleep => include_str!("texts/sleep.txt"),
            Topic::Exercise => include_str!("texts/exercise.txt"),
            Topic::MentalHealth => include_str!("texts/mental_health.txt"),
            Topic::Nutrition => include_str!("texts/nutrition.txt"),
            Topic::General => include_str!("texts/general.txt"),
        }
    }
}

/// A keyword gate in front of a topic.
#[derive(Debug)]
pub struct TopicRule {
    pub topic: Topic,
    pub keywords: &'static [&'static str],
}

impl TopicRule {
    /// Substring match against an already lower-cased query.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Keyword rules in priority order. Categories overlap, so order matters.
pub static TOPIC_RULES: [TopicRule; 5] = [
    TopicRule {
        topic: Topic::Stress,
        keywords: &["stress", "anxious", "worried", "overwhelmed"],
    },
    TopicRule {
        topic: Topic::Sleep,
        keywords: &["sleep", "tired", "insomnia", "rest"],
    },
    TopicRule {
        topic: Topic::Exercise,
        keywords: &["exercise", "fitness", "workout", "active"],
    },
    TopicRule {
        topic: Topic::MentalHealth,
        keywords: &["depression", "sad", "lonely", "mental health"],
    },
    TopicRule {
        topic: Topic::Nutrition,
        keywords: &["nutrition", "diet", "eating", "food", "healthy"],
    },
];

/// Pick the topic for a query. First matching rule wins.
///
/// Matching is case-insensitive substring containment, so "restless" lands
/// on `Topic::Sleep` through "rest".
pub fn classify(query: &str) -> Topic {
    let lowered = query.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::General)
}

/// Advice selected for a single query.
#[derive(Debug, Clone)]
pub struct Advice {
    pub topic: Topic,
    pub text: String,
}

/// Renders advice texts from the compiled topic templates.
///
/// Built once at startup and shared read-only across requests.
pub struct Advisor {
    tera: Tera,
}

impl Advisor {
    /// Compile every topic template.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(
            Topic::ALL
                .iter()
                .map(|topic| (topic.template_name(), topic.template_source())),
        )?;
        Ok(Self { tera })
    }

    /// Classify the query and render the advice text for its topic.
    pub fn advise(&self, query: &str) -> Result<Advice, AppError> {
        let topic = classify(query);
        let text = self.render(topic, query)?;
        Ok(Advice { topic, text })
    }

    fn render(&self, topic: Topic, query: &str) -> Result<String, AppError> {
        let mut context = Context::new();
        context.insert("query", query);
        Ok(self.tera.render(topic.template_name(), &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisor() -> Advisor {
        Advisor::new().expect("advice templates compile")
    }

    #[test]
    fn stress_keywords_select_stress() {
        for query in [
            "I feel stress at work",
            "so anxious lately",
            "I'm worried about exams",
            "completely overwhelmed",
        ] {
            assert_eq!(classify(query), Topic::Stress, "query: {query}");
        }
    }

    #[test]
    fn stress_outranks_sleep() {
        assert_eq!(classify("I can't sleep and feel stressed"), Topic::Stress);
    }

    #[test]
    fn diet_selects_nutrition() {
        assert_eq!(classify("I want to improve my diet"), Topic::Nutrition);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify("INSOMNIA every night"), Topic::Sleep);
        assert_eq!(classify("Best Workout plan?"), Topic::Exercise);
    }

    #[test]
    fn matching_is_substring_not_word() {
        assert_eq!(classify("I feel restless"), Topic::Sleep);
        assert_eq!(classify("how do I stay interactive"), Topic::Exercise);
    }

    #[test]
    fn multi_word_keyword_matches() {
        assert_eq!(classify("tips for Mental Health"), Topic::MentalHealth);
        assert_eq!(classify("my mental state"), Topic::General);
    }

    #[test]
    fn exercise_outranks_nutrition() {
        assert_eq!(classify("healthy and active"), Topic::Exercise);
    }

    #[test]
    fn unmatched_query_falls_through_to_general() {
        assert_eq!(classify("random unrelated text"), Topic::General);
        assert_eq!(classify(""), Topic::General);
    }

    #[test]
    fn keyword_advice_is_returned_verbatim() {
        let advisor = advisor();
        for topic in Topic::ALL.iter().copied().filter(|t| *t != Topic::General) {
            let text = advisor.render(topic, "ignored").unwrap();
            assert_eq!(text, topic.template_source(), "topic: {topic:?}");
        }
    }

    #[test]
    fn stress_advice_text() {
        let advice = advisor().advise("feeling overwhelmed").unwrap();
        assert_eq!(advice.topic, Topic::Stress);
        assert!(advice
            .text
            .starts_with("Here are some effective stress management techniques:"));
        assert!(advice
            .text
            .ends_with("Remember: It's okay to ask for help when you need it."));
    }

    #[test]
    fn general_advice_embeds_original_query() {
        let advice = advisor().advise("Random Unrelated Text").unwrap();
        assert_eq!(advice.topic, Topic::General);
        assert!(advice
            .text
            .starts_with("Thank you for your wellness question: \"Random Unrelated Text\""));
    }

    #[test]
    fn general_advice_does_not_escape_query() {
        let query = r#"what about <b>"this"</b> & {{ that }}"#;
        let advice = advisor().advise(query).unwrap();
        assert!(advice.text.contains(query));
    }
}
