//! gitlab2jira CLI entry point.

use clap::Parser;

use gitlab2jira::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = gitlab2jira::cli::commands::export::execute(cli.export, cli.json).await {
        gitlab2jira::cli::handle_error(err, cli.json);
    }
}
