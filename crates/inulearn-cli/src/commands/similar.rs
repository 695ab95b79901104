//! The `inulearn similar` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::{build_service, print_json, OutputFormat, Settings};

pub fn execute(
    settings: &Settings,
    question: String,
    count: i64,
    format: OutputFormat,
) -> Result<()> {
    let config = settings.load()?;
    let service = build_service(&config, false)?;
    let stubs = service.get_similar_questions(&question, count)?;

    match format {
        OutputFormat::Json => print_json(&stubs)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Question", "Similarity", "Content"]);
            for stub in &stubs {
                table.add_row(vec![
                    Cell::new(&stub.question_id),
                    Cell::new(format!("{:.2}", stub.similarity_score)),
                    Cell::new(&stub.content),
                ]);
            }
            println!("{table}");
        }
    }
    Ok(())
}
