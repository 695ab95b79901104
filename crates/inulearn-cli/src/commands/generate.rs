//! The `inulearn generate` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use inulearn_core::model::{SelectionCriteria, SelectionResult};

use super::{authorize, build_service, print_json, OutputFormat, Settings};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    settings: &Settings,
    subject: String,
    grade: Option<u8>,
    difficulty: String,
    count: i64,
    focus: Vec<String>,
    format: OutputFormat,
    token: Option<String>,
) -> Result<()> {
    let config = settings.load()?;
    let service = build_service(&config, token.is_some())?;
    authorize(&service, token.as_deref())?;

    let criteria = SelectionCriteria {
        subject,
        grade,
        difficulty,
        desired_count: count,
        focus_topics: focus,
    };
    let result = service.generate_questions(&criteria)?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => print_table(&result),
    }
    Ok(())
}

fn print_table(result: &SelectionResult) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Topic", "Difficulty", "Type", "Content"]);

    for q in &result.questions {
        table.add_row(vec![
            Cell::new(&q.question_id),
            Cell::new(&q.topic),
            Cell::new(q.difficulty),
            Cell::new(q.question_type),
            Cell::new(&q.content),
        ]);
    }

    println!("Session: {}", result.session_id);
    println!("{table}");
    if result.questions.is_empty() {
        println!("No questions matched.");
    }
}
