use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use dish_console::config::Settings;
use dish_console::models::ChartTab;
use dish_console::services::ToastLevel;
use dish_console::{ConsoleContext, RuleEdits};

/// Admin console for dish metrics and business rules
#[derive(Parser)]
#[command(name = "dish-console")]
#[command(author, version)]
#[command(after_help = "EXAMPLES:
    # Open the metrics dashboard on the peak hours chart
    dish-console metrics --tab peak

    # Edit rule 42 interactively
    dish-console rule edit 42

    # Replace a rule body from a file
    dish-console rule update 42 --body-file rule.txt
")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the rules API (overrides the settings file)
    #[arg(long, env = "DISH_CONSOLE_API_URL", global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dish metrics dashboard
    Metrics {
        /// Chart shown first
        #[arg(long, value_enum, default_value = "sales")]
        tab: TabArg,
    },
    /// Inspect and change business rules
    Rule {
        #[command(subcommand)]
        command: RuleCommands,
    },
}

#[derive(Subcommand)]
enum RuleCommands {
    /// Open the interactive rule editor
    Edit { id: String },
    /// Print a rule as JSON
    Show { id: String },
    /// Change a rule's name or definition
    Update {
        id: String,
        /// New rule name
        #[arg(long)]
        name: Option<String>,
        /// New rule definition
        #[arg(long, conflicts_with = "body_file")]
        body: Option<String>,
        /// Read the new rule definition from a file
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Delete a rule
    Delete { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Sales,
    Peak,
}

impl From<TabArg> for ChartTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Sales => ChartTab::Sales,
            TabArg::Peak => ChartTab::Peak,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load_or_default(cli.config.as_deref())
        .and_then(|settings| settings.with_api_url(cli.api_url.clone()))
        .context("failed to load settings")?;
    if let Err(error) = dish_console::telemetry::init_tracing(&settings) {
        eprintln!("warning: logging disabled: {}", error);
    }
    tracing::info!(api = %settings.api_base_url, "dish-console starting");

    let context = ConsoleContext::new(&settings)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let code = match cli.command {
        Commands::Metrics { tab } => {
            dish_console::show_metrics(&context, tab.into())?;
            ExitCode::SUCCESS
        }
        Commands::Rule { command } => runtime.block_on(run_rule_command(&context, command))?,
    };

    report_toasts(&context);
    Ok(code)
}

async fn run_rule_command(context: &ConsoleContext, command: RuleCommands) -> Result<ExitCode> {
    match command {
        RuleCommands::Edit { id } => {
            dish_console::edit_rule(context, &id).await?;
            Ok(ExitCode::SUCCESS)
        }
        RuleCommands::Show { id } => {
            let rule = dish_console::show_rule(context, &id).await?;
            println!("{}", serde_json::to_string_pretty(&rule)?);
            Ok(ExitCode::SUCCESS)
        }
        RuleCommands::Update {
            id,
            name,
            body,
            body_file,
        } => {
            let body = match body_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => body,
            };
            let edits = RuleEdits {
                rule_name: name,
                rule: body,
            };
            let rule = dish_console::update_rule(context, &id, edits).await?;
            println!("{}", serde_json::to_string_pretty(&rule)?);
            Ok(ExitCode::SUCCESS)
        }
        RuleCommands::Delete { id } => {
            if dish_console::delete_rule(context, &id).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn report_toasts(context: &ConsoleContext) {
    for toast in context.toasts.all() {
        match toast.level {
            ToastLevel::Success => eprintln!("{}", toast.message),
            ToastLevel::Error => eprintln!("error: {}", toast.message),
        }
    }
}
