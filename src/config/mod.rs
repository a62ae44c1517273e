pub mod app_config;

use clap::Parser;

pub use app_config::AppConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "study-buddy")]
#[command(about = "Study assistant API backed by Groq and Supabase")]
pub struct CliConfig {
    /// Path to a TOML configuration file; falls back to environment variables
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
