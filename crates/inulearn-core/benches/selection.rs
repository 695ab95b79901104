use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use inulearn_core::catalog::QuestionCatalog;
use inulearn_core::grader::{answers_match, AnswerGrader};
use inulearn_core::model::{Difficulty, QuestionRecord, QuestionType, SelectionCriteria};
use inulearn_core::selector::QuestionSelector;

fn make_catalog(topics: usize, per_topic: usize) -> QuestionCatalog {
    let levels = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    let mut catalog = QuestionCatalog::new();
    for t in 0..topics {
        for q in 0..per_topic {
            catalog
                .insert(QuestionRecord {
                    id: format!("q_{t}_{q}"),
                    content: format!("Question {q} of topic {t}"),
                    question_type: QuestionType::ShortAnswer,
                    options: None,
                    correct_answer: format!("{}", t * q),
                    explanation: String::new(),
                    difficulty: levels[q % levels.len()],
                    subject: "mathematics".into(),
                    topic: format!("topic_{t}"),
                })
                .unwrap();
        }
    }
    catalog
}

fn criteria(count: i64, focus: Vec<String>) -> SelectionCriteria {
    SelectionCriteria {
        subject: "mathematics".into(),
        grade: Some(8),
        difficulty: "hard".into(),
        desired_count: count,
        focus_topics: focus,
    }
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    group.bench_function("sample_padded", |b| {
        let selector = QuestionSelector::new(Arc::new(QuestionCatalog::sample()));
        let criteria = criteria(50, vec![]);
        b.iter(|| selector.select(black_box(&criteria)))
    });

    group.bench_function("large_pool", |b| {
        let selector = QuestionSelector::new(Arc::new(make_catalog(20, 60)));
        let criteria = criteria(50, vec![]);
        b.iter(|| selector.select(black_box(&criteria)))
    });

    group.bench_function("large_pool_focused", |b| {
        let selector = QuestionSelector::new(Arc::new(make_catalog(20, 60)));
        let criteria = criteria(50, vec!["topic_19".into()]);
        b.iter(|| selector.select(black_box(&criteria)))
    });

    group.finish();
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    group.bench_function("answers_match", |b| {
        b.iter(|| answers_match(black_box("  X=2  "), black_box("x=2")))
    });

    group.bench_function("lookup_last_question", |b| {
        let grader = AnswerGrader::new(Arc::new(make_catalog(20, 60)));
        b.iter(|| grader.grade(black_box("q_19_59"), black_box("1121")))
    });

    group.finish();
}

criterion_group!(benches, bench_select, bench_grade);
criterion_main!(benches);
