use crate::demo::{run_applicants_list, run_applicants_show, run_applicants_stats, run_demo};
use crate::demo::{ApplicantsListArgs, ApplicantsShowArgs, ApplicantsStatsArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use school_careers::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "School Careers Portal",
    about = "Run the school careers portal or inspect its applicant directory from the command line",
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
    /// Browse the applicant directory the dashboard shows
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
    /// Submit a sample application and walk through the staff dashboard
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ApplicantsCommand {
    /// List applicants, optionally narrowed by category and search text
    List(ApplicantsListArgs),
    /// Show the detail panel for a single applicant
    Show(ApplicantsShowArgs),
    /// Print headline counts and the most recent applications
    Stats(ApplicantsStatsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the directory from this CSV export instead of the bundled sample
    #[arg(long)]
    pub(crate) applicants_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Applicants { command } => match command {
            ApplicantsCommand::List(args) => run_applicants_list(args),
            ApplicantsCommand::Show(args) => run_applicants_show(args),
            ApplicantsCommand::Stats(args) => run_applicants_stats(args),
        },
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use school_careers::workflows::directory::CategoryFilter;
    use school_careers::workflows::intake::JobCategory;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["careers"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn applicants_list_accepts_filters() {
        let cli = Cli::try_parse_from([
            "careers",
            "applicants",
            "list",
            "--category",
            "it",
            "--search",
            "ahmed",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Applicants {
                command: ApplicantsCommand::List(args),
            }) => {
                assert_eq!(args.category, Some(CategoryFilter::Only(JobCategory::It)));
                assert_eq!(args.search.as_deref(), Some("ahmed"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from(["careers", "serve", "--port", "9090"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9090));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_category_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["careers", "applicants", "list", "--category", "gardening"]);
        assert!(result.is_err());
    }
}
