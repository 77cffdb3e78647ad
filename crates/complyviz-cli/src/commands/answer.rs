use anyhow::Result;

use complyviz_core::api::NewAnswer;
use complyviz_core::AppConfig;

use super::api_client;

pub async fn run(
    config: &AppConfig,
    question_id: &str,
    value: &str,
    comment: Option<String>,
) -> Result<()> {
    let client = api_client(config)?;
    let answer = client
        .submit_answer(&NewAnswer {
            question_id: question_id.to_string(),
            value: value.to_string(),
            comment,
        })
        .await?;

    println!("Saved answer {} for question {}", answer.id, answer.question_id);
    if let Some(at) = answer.answered_at {
        println!("  at {}", at.format("%Y-%m-%d %H:%M"));
    }
    Ok(())
}
