use reqwest::Method;

use super::client::ApiClient;
use super::models::{Answer, NewAnswer, Question};
use crate::{Error, Result};

impl ApiClient {
    /// Assessment questions, optionally restricted to one category
    pub async fn questions(&self, category: Option<&str>) -> Result<Vec<Question>> {
        let mut url = self.endpoint("questions")?;
        if let Some(category) = category.filter(|c| !c.trim().is_empty()) {
            url.query_pairs_mut().append_pair("category", category.trim());
        }
        self.get_json(url).await
    }

    /// Answers recorded for the current user's organization
    pub async fn answers(&self) -> Result<Vec<Answer>> {
        let url = self.endpoint("answers")?;
        self.get_json(url).await
    }

    pub async fn submit_answer(&self, answer: &NewAnswer) -> Result<Answer> {
        if answer.question_id.trim().is_empty() {
            return Err(Error::Other("Question id is required".to_string()));
        }

        let url = self.endpoint("answers")?;
        let saved: Answer = self.send_json(Method::POST, url, Some(answer)).await?;
        tracing::info!(question_id = %saved.question_id, "Answer submitted");
        Ok(saved)
    }
}

/// Share of questions with a recorded answer, in percent
pub fn completion_percent(questions: &[Question], answers: &[Answer]) -> f64 {
    if questions.is_empty() {
        return 0.0;
    }
    let answered = questions
        .iter()
        .filter(|q| answers.iter().any(|a| a.question_id == q.id))
        .count();
    answered as f64 / questions.len() as f64 * 100.0
}
