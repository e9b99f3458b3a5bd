//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use matlabel_config::AppConfig;
use matlabel_layout::{ScaleMode, Stamp};
use matlabel_telemetry::{LoggingConfig, init_logging, log_format_from_config};
use tracing::{Instrument, debug, info_span};

use crate::commands::labels::{
    handle_add, handle_delete, handle_edit, handle_import, handle_list, handle_show,
};
use crate::commands::print::{handle_layout, handle_render};
use crate::context::{AppContext, CliResult};

const BUILD_SHA: Option<&str> = option_env!("MATLABEL_BUILD_SHA");

/// Parses process arguments, executes the requested command, and reports
/// failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    run_from(std::env::args_os()).await
}

/// Same as [`run`] with an explicit argument list (the first item is the
/// program name).
pub async fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            return err.exit_code();
        }
    };
    let command_name = command_label(&cli.command);

    match execute(cli, command_name).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli, command_name: &'static str) -> CliResult<()> {
    let config = load_config(&cli)?;
    install_logging(&config);

    let ctx = AppContext {
        config,
        output: cli.output,
    };
    dispatch(&ctx, cli.command)
        .instrument(info_span!("command", command = command_name))
        .await
}

fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    let mut config = matlabel_config::load(cli.config.as_deref())?;
    if let Some(url) = cli.database_url.as_deref().filter(|url| !url.trim().is_empty()) {
        config.database.url = url.to_string();
    }
    Ok(config)
}

fn install_logging(config: &AppConfig) {
    let logging = LoggingConfig {
        level: &config.telemetry.level,
        format: log_format_from_config(config.telemetry.format.as_deref()),
        build_sha: BUILD_SHA.unwrap_or("dev"),
    };
    if init_logging(&logging).is_err() {
        debug!("tracing subscriber already installed");
    }
}

async fn dispatch(ctx: &AppContext, command: Command) -> CliResult<()> {
    match command {
        Command::Labels(labels) => match labels {
            LabelsCommand::List(args) => handle_list(ctx, args).await,
            LabelsCommand::Show(args) => handle_show(ctx, args).await,
            LabelsCommand::Add(args) => handle_add(ctx, args).await,
            LabelsCommand::Edit(args) => handle_edit(ctx, args).await,
            LabelsCommand::Delete(args) => handle_delete(ctx, args).await,
            LabelsCommand::Import(args) => handle_import(ctx, args).await,
        },
        Command::Layout(args) => handle_layout(ctx, args).await,
        Command::Render(args) => handle_render(ctx, args).await,
    }
}

#[derive(Parser)]
#[command(
    name = "matlabel",
    version,
    about = "Manage material codes and print them as labels"
)]
struct Cli {
    #[arg(long, global = true, env = "MATLABEL_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, global = true, env = "MATLABEL_DATABASE_URL")]
    database_url: Option<String>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage stored labels.
    #[command(subcommand)]
    Labels(LabelsCommand),
    /// Show how a label would be laid out without writing anything.
    Layout(LayoutArgs),
    /// Write a printable PDF for a label.
    Render(RenderArgs),
}

#[derive(Subcommand)]
enum LabelsCommand {
    /// List labels, optionally filtered by a substring of name or description.
    List(ListArgs),
    /// Show one label by code.
    Show(ShowArgs),
    /// Store a new label.
    Add(AddArgs),
    /// Change the code or description of a stored label.
    Edit(EditArgs),
    /// Delete labels by id.
    Delete(DeleteArgs),
    /// Import labels from bulk text, one `CODE description` per line.
    Import(ImportArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[arg(long, help = "Case-insensitive substring matched against name and description")]
    pub(crate) filter: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    pub(crate) code: String,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub(crate) code: String,
    #[arg(
        long,
        conflicts_with = "description_file",
        required_unless_present = "description_file"
    )]
    pub(crate) description: Option<String>,
    #[arg(long, help = "Read the description from a file; keeps line breaks")]
    pub(crate) description_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EditArgs {
    pub(crate) id: i64,
    #[arg(long)]
    pub(crate) code: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    #[arg(required = true, num_args = 1..)]
    pub(crate) ids: Vec<i64>,
    #[arg(long, help = "Confirm the deletion")]
    pub(crate) yes: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    #[arg(long, conflicts_with = "source")]
    pub(crate) file: Option<PathBuf>,
    #[arg(value_name = "-", help = "Pass - to read standard input")]
    pub(crate) source: Option<String>,
}

#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct StampArgs {
    #[arg(long, help = "Stamp the label as scrap")]
    pub(crate) scrap: bool,
    #[arg(long, help = "Stamp the label as regrind (wins over --scrap)")]
    pub(crate) regrind: bool,
}

impl StampArgs {
    pub(crate) const fn stamp(self) -> Option<Stamp> {
        Stamp::from_flags(self.scrap, self.regrind)
    }
}

#[derive(Args, Debug)]
pub(crate) struct HostArgs {
    #[arg(long, help = "Host paper (Letter or A4); unknown names print on Letter")]
    pub(crate) paper: Option<String>,
    #[arg(long, value_parser = parse_scale, help = "fit or noscale")]
    pub(crate) scale: Option<ScaleMode>,
}

#[derive(Args, Debug)]
pub(crate) struct LayoutArgs {
    pub(crate) code: String,
    #[command(flatten)]
    pub(crate) stamp: StampArgs,
    #[command(flatten)]
    pub(crate) host: HostArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    pub(crate) code: String,
    #[arg(long)]
    pub(crate) out: PathBuf,
    #[command(flatten)]
    pub(crate) stamp: StampArgs,
    #[arg(
        long,
        conflicts_with_all = ["paper", "scale"],
        help = "Use a page exactly the size of the label"
    )]
    pub(crate) label_only: bool,
    #[command(flatten)]
    pub(crate) host: HostArgs,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Labels(LabelsCommand::List(_)) => "labels_list",
        Command::Labels(LabelsCommand::Show(_)) => "labels_show",
        Command::Labels(LabelsCommand::Add(_)) => "labels_add",
        Command::Labels(LabelsCommand::Edit(_)) => "labels_edit",
        Command::Labels(LabelsCommand::Delete(_)) => "labels_delete",
        Command::Labels(LabelsCommand::Import(_)) => "labels_import",
        Command::Layout(_) => "layout",
        Command::Render(_) => "render",
    }
}

fn parse_scale(input: &str) -> Result<ScaleMode, String> {
    input
        .parse::<ScaleMode>()
        .map_err(|_| format!("invalid scale '{input}': expected fit or noscale"))
}
