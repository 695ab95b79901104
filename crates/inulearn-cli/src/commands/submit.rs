//! The `inulearn submit` command.

use anyhow::Result;

use inulearn_core::model::AnswerSubmission;

use super::{authorize, build_service, print_json, Settings};

pub async fn execute(
    settings: &Settings,
    session: String,
    question: String,
    answer: String,
    time_spent: Option<u32>,
    token: Option<String>,
) -> Result<()> {
    let config = settings.load()?;
    let service = build_service(&config, token.is_some())?;
    authorize(&service, token.as_deref())?;

    let submission = AnswerSubmission {
        session_id: session,
        question_id: question,
        user_answer: answer,
        time_spent_secs: time_spent,
    };
    let record = service.submit_answer(&submission).await?;

    print_json(&record)
}
