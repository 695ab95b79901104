//! The `inulearn init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("inulearn.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("catalog").context("failed to create catalog directory")?;
    write_if_missing(Path::new("catalog/mathematics.toml"), EXAMPLE_CATALOG)?;

    println!("\nNext steps:");
    println!("  1. Set INULEARN_JWT_SECRET or edit the [auth] section of inulearn.toml");
    println!("  2. Run: inulearn validate --catalog catalog");
    println!("  3. Run: inulearn generate --subject mathematics --difficulty medium --count 5");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# inulearn configuration

catalog_path = "catalog"

[auth]
secret = "${INULEARN_JWT_SECRET}"
algorithm = "HS256"
expiration_hours = 24

[store]
kind = "jsonl"
path = "data/submissions.jsonl"
timeout_ms = 2000
max_retries = 2
retry_delay_ms = 200

[selection]
# "any_difficulty" pads with questions of any difficulty,
# "match_difficulty" only with the requested one.
padding = "any_difficulty"
"#;

const EXAMPLE_CATALOG: &str = r#"[catalog]
subject = "mathematics"

[[topics]]
name = "algebra"

[[topics.questions]]
id = "math_001"
content = "Solve the equation 2x + 3 = 7"
type = "multiple_choice"
options = ["x=1", "x=2", "x=3", "x=4"]
correct_answer = "x=2"
explanation = "Move 3 to the right-hand side to get 2x = 4, then divide by 2 to get x = 2"
difficulty = "medium"

[[topics.questions]]
id = "math_002"
content = "Simplify 3x + 2x - x"
type = "short_answer"
correct_answer = "4x"
explanation = "Combine like terms: 3x + 2x - x = (3 + 2 - 1)x = 4x"
difficulty = "easy"

[[topics]]
name = "geometry"

[[topics.questions]]
id = "math_003"
content = "Compute the area of a circle with radius 5"
type = "short_answer"
correct_answer = "25π"
explanation = "The area of a circle is A = πr², so A = π × 5² = 25π"
difficulty = "medium"
"#;
