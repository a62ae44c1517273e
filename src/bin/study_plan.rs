use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use study_buddy::config::app_config::{DEFAULT_GROQ_BASE_URL, DEFAULT_GROQ_MODEL};
use study_buddy::core::study_plan::parse_study_plan;
use study_buddy::core::StudyAssistant;
use study_buddy::domain::model::{StudyPlan, StudyPlanRequest};
use study_buddy::utils::logger;
use study_buddy::{AppConfig, GroqClient};

#[derive(Parser)]
#[command(name = "study-plan")]
#[command(about = "Generate a study plan and print it as split JSON")]
struct Args {
    /// Parse an existing markdown plan instead of calling the model
    #[arg(long)]
    from_file: Option<String>,

    /// TOML configuration file; GROQ_API_KEY is used when absent
    #[arg(short, long)]
    config: Option<String>,

    #[arg(long, required_unless_present = "from_file")]
    subject: Option<String>,

    #[arg(long, required_unless_present = "from_file")]
    exam: Option<String>,

    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Study hours per day
    #[arg(long, default_value = "2")]
    hours: String,

    /// Comma-separated topics to cover
    #[arg(long)]
    topics: Option<String>,

    /// Also print the raw markdown returned by the model
    #[arg(long)]
    raw: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn groq_client(args: &Args) -> anyhow::Result<GroqClient> {
    if let Some(path) = &args.config {
        let config = AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        return Ok(GroqClient::from_config(&config)?);
    }

    let api_key = std::env::var("GROQ_API_KEY")
        .context("GROQ_API_KEY is not set and no --config was given")?;
    let base_url =
        std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string());
    let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string());
    Ok(GroqClient::new(
        api_key,
        base_url,
        model,
        Duration::from_secs(120),
    )?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let (markdown, plan): (String, StudyPlan) = match &args.from_file {
        Some(path) => {
            tracing::info!("📁 Parsing plan from {}", path);
            let markdown = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path))?;
            let plan = parse_study_plan(&markdown)?;
            (markdown, plan)
        }
        None => {
            let assistant = StudyAssistant::new(Arc::new(groq_client(&args)?));
            let request = StudyPlanRequest {
                subject: args.subject.clone(),
                exam: args.exam.clone(),
                num_days: Some(args.days),
                difficulty: Some(args.hours.clone()),
                topics_length: None,
                topics: args.topics.clone(),
            };
            let generated = assistant.study_plan(&request).await?;
            (generated.markdown, generated.plan)
        }
    };

    tracing::info!("✅ {} daily routines", plan.daily_routines.len());

    if args.raw {
        println!("{}\n", markdown);
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
