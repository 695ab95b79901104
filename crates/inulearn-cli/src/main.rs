//! inulearn CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::{OutputFormat, Settings};

#[derive(Parser)]
#[command(
    name = "inulearn",
    version,
    about = "Practice question selection and grading engine"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file or directory (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select practice questions for a new session
    Generate {
        /// Subject, e.g. "mathematics"
        #[arg(long)]
        subject: String,

        /// Learner grade (informational)
        #[arg(long)]
        grade: Option<u8>,

        /// Difficulty: easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Number of questions (1-50)
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        count: i64,

        /// Restrict to these topics (comma-separated)
        #[arg(long, value_delimiter = ',')]
        focus: Vec<String>,

        /// Output format: json or table
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Bearer token to verify before answering
        #[arg(long)]
        token: Option<String>,
    },

    /// Grade an answer
    Submit {
        /// Session the answer belongs to
        #[arg(long)]
        session: String,

        /// Question identifier
        #[arg(long)]
        question: String,

        /// The learner's answer
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// Seconds spent on the question
        #[arg(long)]
        time_spent: Option<u32>,

        /// Bearer token to verify before answering
        #[arg(long)]
        token: Option<String>,
    },

    /// Generate placeholder questions similar to a question
    Similar {
        /// Source question identifier
        #[arg(long)]
        question: String,

        /// Number of stubs (1-20)
        #[arg(long, default_value = "5", allow_negative_numbers = true)]
        count: i64,

        /// Output format: json or table
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Show learning progress
    Progress {
        /// Only report this subject
        #[arg(long)]
        subject: Option<String>,

        /// Start of the reporting window (accepted, not applied)
        #[arg(long)]
        start_date: Option<String>,

        /// End of the reporting window (accepted, not applied)
        #[arg(long)]
        end_date: Option<String>,

        /// Output format: json or table
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate question catalog TOML files
    Validate,

    /// Issue, verify or refresh access tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Create starter config and example catalog
    Init,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a token for a user
    Issue {
        /// User identifier
        #[arg(long)]
        subject: String,

        /// Role: student, parent or teacher
        #[arg(long, default_value = "student")]
        role: String,
    },
    /// Verify a token and print its claims
    Verify {
        #[arg(long)]
        token: String,
    },
    /// Exchange a valid token for a fresh one
    Refresh {
        #[arg(long)]
        token: String,
    },
}

#[tokio::main]
async fn main() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "inulearn=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings {
        config: cli.config,
        catalog: cli.catalog,
    };

    let result = match cli.command {
        Commands::Generate {
            subject,
            grade,
            difficulty,
            count,
            focus,
            format,
            token,
        } => commands::generate::execute(
            &settings, subject, grade, difficulty, count, focus, format, token,
        ),
        Commands::Submit {
            session,
            question,
            answer,
            time_spent,
            token,
        } => {
            commands::submit::execute(&settings, session, question, answer, time_spent, token)
                .await
        }
        Commands::Similar {
            question,
            count,
            format,
        } => commands::similar::execute(&settings, question, count, format),
        Commands::Progress {
            subject,
            start_date,
            end_date,
            format,
        } => commands::progress::execute(&settings, subject, start_date, end_date, format),
        Commands::Validate => commands::validate::execute(&settings),
        Commands::Token { action } => match action {
            TokenAction::Issue { subject, role } => {
                commands::token::issue(&settings, &subject, &role)
            }
            TokenAction::Verify { token } => commands::token::verify(&settings, &token),
            TokenAction::Refresh { token } => commands::token::refresh(&settings, &token),
        },
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
