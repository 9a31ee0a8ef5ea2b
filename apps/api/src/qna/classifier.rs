//! Intent Classifier — pluggable, trait-based classifier over the fixed
//! career-question vocabulary.
//!
//! Default: `KeywordIntentClassifier` (pure-Rust bag-of-words, fast,
//! deterministic, fully testable). `AppState` holds an
//! `Arc<dyn IntentClassifier>`, so a model-backed classifier can be swapped
//! in without touching handler code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The question intents the Q&A surface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[serde(rename = "career.gaps")]
    CareerGaps,
    #[serde(rename = "career.skills")]
    CareerSkills,
    #[serde(rename = "career.jobs")]
    CareerJobs,
    #[serde(rename = "career.courses")]
    CareerCourses,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Classification result; confidence is on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Intent,
    pub confidence: f64,
}

/// Implement this to swap classifier backends without touching the
/// endpoint, handler, or caller code.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, question: &str) -> Result<Classification, AppError>;
}

/// Below this score a question is treated as unclassified.
const CONFIDENCE_THRESHOLD: f64 = 30.0;

/// Bag-of-words classifier trained once at startup from a fixed phrase set.
///
/// Scoring: tokenize the question, count overlap with each intent's token
/// bag, normalize by question token count, scale to 0-100. Best intent
/// below the threshold degrades to `Unknown`.
pub struct KeywordIntentClassifier {
    bags: Vec<(Intent, Vec<String>)>,
}

const TRAINING_PHRASES: &[(Intent, &[&str])] = &[
    (
        Intent::CareerGaps,
        &[
            "do i have career gaps",
            "are there any gaps in my career",
            "show me my employment breaks",
            "gap gaps break breaks unemployment",
        ],
    ),
    (
        Intent::CareerSkills,
        &[
            "what are my skills",
            "which skills do i have",
            "list my competencies",
            "skills skill abilities competencies",
        ],
    ),
    (
        Intent::CareerJobs,
        &[
            "find jobs for me",
            "which jobs match my profile",
            "show me job opportunities",
            "jobs positions roles opportunities",
        ],
    ),
    (
        Intent::CareerCourses,
        &[
            "recommend courses",
            "what courses should i take",
            "suggest training programs",
            "courses course training learning",
        ],
    ),
];

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl KeywordIntentClassifier {
    /// Builds the per-intent token bags from the training phrases.
    pub fn train() -> Self {
        let bags = TRAINING_PHRASES
            .iter()
            .map(|(intent, phrases)| {
                let mut bag: Vec<String> = Vec::new();
                for phrase in *phrases {
                    for token in tokenize(phrase) {
                        if !bag.contains(&token) {
                            bag.push(token);
                        }
                    }
                }
                (*intent, bag)
            })
            .collect();
        Self { bags }
    }

    fn score(&self, question: &str) -> Classification {
        let tokens = tokenize(question);
        if tokens.is_empty() {
            return Classification {
                intent: Intent::Unknown,
                confidence: 0.0,
            };
        }

        let mut best = (Intent::Unknown, 0.0f64);
        for (intent, bag) in &self.bags {
            let overlap = tokens.iter().filter(|t| bag.contains(t)).count();
            let confidence = overlap as f64 / tokens.len() as f64 * 100.0;
            if confidence > best.1 {
                best = (*intent, confidence);
            }
        }

        if best.1 < CONFIDENCE_THRESHOLD {
            Classification {
                intent: Intent::Unknown,
                confidence: best.1,
            }
        } else {
            Classification {
                intent: best.0,
                confidence: best.1,
            }
        }
    }
}

#[async_trait]
impl IntentClassifier for KeywordIntentClassifier {
    async fn classify(&self, question: &str) -> Result<Classification, AppError> {
        Ok(self.score(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(question: &str) -> Classification {
        KeywordIntentClassifier::train().score(question)
    }

    #[test]
    fn test_gap_questions_classify_as_gaps() {
        assert_eq!(classify("Do I have any career gaps?").intent, Intent::CareerGaps);
        assert_eq!(
            classify("show me my employment breaks").intent,
            Intent::CareerGaps
        );
    }

    #[test]
    fn test_skills_questions_classify_as_skills() {
        assert_eq!(classify("What are my skills?").intent, Intent::CareerSkills);
        assert_eq!(classify("list my competencies").intent, Intent::CareerSkills);
    }

    #[test]
    fn test_jobs_and_courses_questions() {
        assert_eq!(
            classify("Which jobs match my profile?").intent,
            Intent::CareerJobs
        );
        assert_eq!(
            classify("What courses should I take?").intent,
            Intent::CareerCourses
        );
    }

    #[test]
    fn test_unrelated_question_is_unknown() {
        let c = classify("How tall is the Eiffel Tower?");
        assert_eq!(c.intent, Intent::Unknown);
    }

    #[test]
    fn test_empty_question_is_unknown_with_zero_confidence() {
        let c = classify("   ");
        assert_eq!(c.intent, Intent::Unknown);
        assert_eq!(c.confidence, 0.0);
    }

    #[test]
    fn test_classification_is_deterministic() {
        assert_eq!(classify("what are my skills"), classify("what are my skills"));
    }

    #[test]
    fn test_confidence_scales_with_overlap() {
        let strong = classify("what are my skills");
        let weak = classify("please tell me something about all of my various skills today");
        assert!(strong.confidence > weak.confidence);
    }
}
