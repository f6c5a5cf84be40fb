//! Command-line interface
//!
//! A single export command; every flag is optional and the defaults
//! reproduce a plain `config.json` driven run.

pub mod commands;
pub mod output;

use clap::Parser;

use commands::ExportArgs;

#[derive(Parser, Debug)]
#[command(name = "gitlab2jira")]
#[command(about = "Export GitLab group issues as a Jira import document", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Report a fatal error on stderr and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "causes": &chain[1..] })
        );
    } else {
        eprintln!("{} {err}", console::style("Error:").red().bold());
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1)
}
