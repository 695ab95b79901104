//! The `inulearn progress` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use inulearn_core::progress::{ProgressQuery, ProgressSnapshot};

use super::{build_service, print_json, OutputFormat, Settings};

pub fn execute(
    settings: &Settings,
    subject: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = settings.load()?;
    let service = build_service(&config, false)?;

    let snapshot = service.get_progress(&ProgressQuery {
        subject,
        start_date,
        end_date,
    });

    match format {
        OutputFormat::Json => print_json(&snapshot)?,
        OutputFormat::Table => print_table(&snapshot),
    }
    Ok(())
}

fn print_table(snapshot: &ProgressSnapshot) {
    let overall = &snapshot.overall_progress;
    println!(
        "Answered {} questions, {} correct ({:.1}%), {} minutes studied",
        overall.total_questions,
        overall.correct_answers,
        overall.accuracy_rate * 100.0,
        overall.study_time_minutes,
    );

    if snapshot.subject_progress.is_empty() {
        println!("No subject progress recorded.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Topic", "Mastery", "Last practiced"]);
    for subject in &snapshot.subject_progress {
        table.add_row(vec![
            Cell::new(&subject.subject),
            Cell::new("-"),
            Cell::new(format!("{:.0}%", subject.mastery_level * 100.0)),
            Cell::new(""),
        ]);
        for topic in &subject.topics {
            let last = topic
                .last_practiced
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            table.add_row(vec![
                Cell::new(""),
                Cell::new(&topic.topic),
                Cell::new(format!("{:.0}%", topic.mastery_level * 100.0)),
                Cell::new(last),
            ]);
        }
    }
    println!("{table}");
}
