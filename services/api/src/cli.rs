use crate::report::{run_roster_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use roster_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Roster Insights",
    about = "Classify employee rosters and summarize headcount by LOB and vertical",
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
    /// Print the headcount tracker and insights for a roster CSV export
    Report(ReportArgs),
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
        Command::Report(args) => run_roster_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_command_parses_scope_and_export_dir() {
        let cli = Cli::try_parse_from([
            "roster-insights-api",
            "report",
            "roster.csv",
            "--department",
            "Sales",
            "--queue",
            "Chat",
            "--export-dir",
            "out",
        ])
        .expect("report args parse");

        let Some(Command::Report(args)) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.path.to_str(), Some("roster.csv"));
        assert_eq!(args.department.as_deref(), Some("Sales"));
        assert_eq!(args.queue.as_deref(), Some("Chat"));
        assert!(args.export_dir.is_some());
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["roster-insights-api"]).expect("no args parse");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["roster-insights-api", "serve", "--port", "8080"])
            .expect("serve args parse");
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.port, Some(8080));
    }
}
