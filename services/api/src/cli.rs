use crate::commands::{
    run_checklist_assess, run_checklist_export, run_incident_list, run_incident_types,
    run_location_check, run_quiz_assess, run_quiz_questions, run_resources, AnswerArgs,
    ChecklistExportArgs, IncidentListArgs, LocationArgs, ResourcesArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use safetrip::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SafeTrip Risk Engine",
    about = "Score travel-safety assessments, check risk zones and run the HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score the relationship red-flag quiz
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
    /// Score or export the pre-travel safety checklist
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommand,
    },
    /// Check a position against the known risk zones
    Location {
        #[command(subcommand)]
        command: LocationCommand,
    },
    /// Browse reported incidents
    Incidents {
        #[command(subcommand)]
        command: IncidentCommand,
    },
    /// List emergency hotlines and safety guides
    Resources(ResourcesArgs),
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// List the quiz questions with their weights
    Questions,
    /// Score answers given as comma-separated question ids
    Assess(AnswerArgs),
}

#[derive(Subcommand, Debug)]
enum ChecklistCommand {
    /// Score answers given as comma-separated item ids
    Assess(AnswerArgs),
    /// Write the printable checklist to a file or stdout
    Export(ChecklistExportArgs),
}

#[derive(Subcommand, Debug)]
enum LocationCommand {
    /// List the risk zones containing a coordinate, nearest first
    Check(LocationArgs),
}

#[derive(Subcommand, Debug)]
enum IncidentCommand {
    /// List incidents filtered by severity and type
    List(IncidentListArgs),
    /// List the distinct incident types
    Types,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quiz { command } => match command {
            QuizCommand::Questions => run_quiz_questions(),
            QuizCommand::Assess(args) => run_quiz_assess(args),
        },
        Command::Checklist { command } => match command {
            ChecklistCommand::Assess(args) => run_checklist_assess(args),
            ChecklistCommand::Export(args) => run_checklist_export(args),
        },
        Command::Location {
            command: LocationCommand::Check(args),
        } => run_location_check(args),
        Command::Incidents { command } => match command {
            IncidentCommand::List(args) => run_incident_list(args),
            IncidentCommand::Types => run_incident_types(),
        },
        Command::Resources(args) => run_resources(args),
    }
}
