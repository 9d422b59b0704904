use clap::{ArgAction, Args, Parser, Subcommand};

use crate::api::models::{EmailType, Tone};

#[derive(Debug, Parser)]
#[command(
    name = "mailgen",
    version,
    about = "Generate email drafts from a prompt and send them"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Health,
    Status(StatusArgs),
    Validate(ValidateArgs),
    Generate(GenerateArgs),
    Compose(ComposeArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(long, help = "Also test the backend's mail server connection")]
    pub check_connection: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(help = "Addresses separated by commas, semicolons or newlines")]
    pub addresses: String,
    #[arg(long, help = "Ask the backend to validate instead of checking locally")]
    pub remote: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long, help = "What the email should say")]
    pub prompt: String,
    #[arg(long, help = "Recipient addresses separated by commas or semicolons")]
    pub to: Option<String>,
    #[arg(long, value_enum, default_value_t = Tone::Professional)]
    pub tone: Tone,
    #[arg(long = "type", value_enum, default_value_t = EmailType::General)]
    pub email_type: EmailType,
    #[arg(long, help = "Send the generated draft right away")]
    pub send: bool,
    #[arg(long, help = "Sender name shown to recipients")]
    pub sender: Option<String>,
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    #[arg(long, help = "Sender name shown to recipients")]
    pub sender: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    #[arg(long, help = "Backend base URL")]
    pub api_url: Option<String>,
    #[arg(long, help = "Default sender name")]
    pub sender: Option<String>,
    #[arg(long, help = "Request timeout in seconds")]
    pub timeout_secs: Option<u64>,
}
