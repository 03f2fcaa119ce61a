use std::io;
use std::process;

use clap::Parser;
use mcp_tool::cli::logging::setup_logging;
use mcp_tool::cli::{execute_command, execute_standalone, output, Cli};
use mcp_tool::config::Settings;
use mcp_tool::exitcode;
use mcp_tool::infrastructure::di::ServiceContainer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    if let Some(result) = execute_standalone(&cli, &mut stdout) {
        if let Err(e) = result {
            output::error(&e);
            process::exit(e.exit_code());
        }
        return;
    }

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => cli.apply_to(settings),
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::CONFIG);
        }
    };

    setup_logging(settings.debug);

    let container = ServiceContainer::new(settings);

    if let Err(e) = execute_command(&cli, &container, &mut stdout).await {
        container.diagnostics.error(&e.to_string());
        process::exit(e.exit_code());
    }
}
