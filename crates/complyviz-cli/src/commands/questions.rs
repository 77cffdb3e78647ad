use std::collections::{BTreeMap, HashMap};

use anyhow::Result;

use complyviz_core::api::{completion_percent, Answer, Question};
use complyviz_core::AppConfig;

use super::api_client;

pub async fn run(config: &AppConfig, category: Option<&str>) -> Result<()> {
    let client = api_client(config)?;
    let questions = client.questions(category).await?;
    let answers = client.answers().await?;

    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }

    let latest = latest_answers(&answers);
    let mut by_category: BTreeMap<&str, Vec<&Question>> = BTreeMap::new();
    for question in &questions {
        by_category
            .entry(question.category.as_deref().unwrap_or("Uncategorized"))
            .or_default()
            .push(question);
    }

    println!(
        "Questions ({}), {:.0}% answered:\n",
        questions.len(),
        completion_percent(&questions, &answers)
    );
    for (category, questions) in by_category {
        println!("{}", category);
        for question in questions {
            let mark = if latest.contains_key(question.id.as_str()) { "x" } else { " " };
            println!("  [{}] {}  {}", mark, question.id, question.text);
            if let Some(reference) = &question.reference {
                println!("        ref: {}", reference);
            }
            if let Some(answer) = latest.get(question.id.as_str()) {
                println!("        answer: {}", answer.value);
            }
        }
        println!();
    }
    Ok(())
}

/// Most recent answer per question; undated answers lose to dated ones
fn latest_answers(answers: &[Answer]) -> HashMap<&str, &Answer> {
    let mut latest: HashMap<&str, &Answer> = HashMap::new();
    for answer in answers {
        latest
            .entry(answer.question_id.as_str())
            .and_modify(|current| {
                if answer.answered_at >= current.answered_at {
                    *current = answer;
                }
            })
            .or_insert(answer);
    }
    latest
}
