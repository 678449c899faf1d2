use std::env;

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{Difficulty, Question, Subject};

use crate::error::SourceError;

/// Default base URL of the public question bank.
pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

#[derive(Clone, Debug)]
pub struct TriviaConfig {
    pub base_url: String,
}

impl TriviaConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("VAST_TRIVIA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self { base_url }
    }
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

/// Supplies question batches for new sessions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch multiple-choice questions for the given subject and difficulty.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the remote call fails or returns data that
    /// cannot be turned into questions.
    async fn fetch_questions(
        &self,
        subject: Subject,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<Question>, SourceError>;
}

/// HTTP adapter for the Open Trivia DB style question bank.
///
/// Normalizes each payload item: HTML entities are decoded in the question
/// and every answer string, and the correct answer is merged into the
/// incorrect ones and uniformly shuffled so its position carries no signal.
#[derive(Clone)]
pub struct OpenTriviaSource {
    client: Client,
    config: TriviaConfig,
}

impl OpenTriviaSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(TriviaConfig::from_env())
    }

    #[must_use]
    pub fn new(config: TriviaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTriviaSource {
    async fn fetch_questions(
        &self,
        subject: Subject,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<Question>, SourceError> {
        let url = format!("{}/api.php", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[
                ("amount", count.to_string()),
                ("category", subject.category_id().to_string()),
                ("difficulty", difficulty.api_token().to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body: TriviaResponse = response.json().await?;
        if body.response_code != 0 {
            return Err(SourceError::Rejected(body.response_code));
        }

        let mut rng = rand::rng();
        body.results
            .into_iter()
            .map(|raw| build_question(raw, &mut rng))
            .collect()
    }
}

/// Turn one wire item into a domain question.
///
/// Takes the generator as a parameter so tests can drive the shuffle with a
/// seeded source and assert the exact resulting order.
fn build_question<R: Rng + ?Sized>(
    raw: TriviaQuestion,
    rng: &mut R,
) -> Result<Question, SourceError> {
    let text = decode_text(&raw.question);
    let correct = decode_text(&raw.correct_answer);

    let mut answers: Vec<String> = raw
        .incorrect_answers
        .iter()
        .map(|a| decode_text(a))
        .collect();
    answers.push(correct.clone());
    answers.shuffle(rng);

    Ok(Question::new(text, correct, answers)?)
}

fn decode_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    results: Vec<TriviaQuestion>,
}

#[derive(Debug, Deserialize)]
struct TriviaQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}
