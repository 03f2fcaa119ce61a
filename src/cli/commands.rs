//! Command dispatch
//!
//! Every session command follows the same sequence: resolve the transport,
//! run one operation inside one session, print the result.

use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{Operation, OperationOutput, ParamsSource};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::config::global_config_path;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command, writing result payloads to `out`.
///
/// Diagnostics go through the container's sink; errors are returned to the
/// caller, which reports them and picks the exit code.
pub async fn execute_command(
    cli: &Cli,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    if let Some(result) = execute_standalone(cli, out) {
        return result;
    }
    match &cli.command {
        Commands::Version | Commands::Completion { .. } => Ok(()),
        Commands::Config { command } => config(command, container, out),
        Commands::Tools => run_operation(container, Operation::ListTools, out).await,
        Commands::Resources => run_operation(container, Operation::ListResources, out).await,
        Commands::Prompts => run_operation(container, Operation::ListPrompts, out).await,
        Commands::Call {
            tool_name,
            params,
            params_file,
        } => {
            call(
                container,
                tool_name,
                params.as_deref(),
                params_file.as_deref(),
                out,
            )
            .await
        }
    }
}

/// Run the commands that need neither settings nor a server.
///
/// Returns `None` for every other command. Called before settings are
/// loaded, so a broken settings file cannot break `version` or `completion`.
pub fn execute_standalone(cli: &Cli, out: &mut dyn Write) -> Option<CliResult<()>> {
    match &cli.command {
        Commands::Version => Some(write_lines(out, [version_line()])),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "mcp-tool", out);
            Some(Ok(()))
        }
        _ => None,
    }
}

/// `mcp-tool <version>`
pub fn version_line() -> String {
    format!("mcp-tool {}", crate::VERSION)
}

#[instrument(skip(container, out))]
async fn call(
    container: &ServiceContainer,
    tool_name: &str,
    params: Option<&str>,
    params_file: Option<&Path>,
    out: &mut dyn Write,
) -> CliResult<()> {
    if tool_name.trim().is_empty() {
        return Err(CliError::InvalidArgs("tool name must not be empty".into()));
    }
    // Parameters are validated before any connection is attempted.
    let arguments = ParamsSource::from_options(params, params_file)?.load()?;

    run_operation(
        container,
        Operation::CallTool {
            name: tool_name.to_string(),
            arguments,
        },
        out,
    )
    .await
}

async fn run_operation(
    container: &ServiceContainer,
    operation: Operation,
    out: &mut dyn Write,
) -> CliResult<()> {
    let transport = container.resolver.resolve(&container.settings)?;
    let method = operation.method();
    let tool_name = match &operation {
        Operation::CallTool { name, .. } => Some(name.clone()),
        _ => None,
    };

    let output = container.sessions.execute(&transport, operation).await?;
    debug!("{}: done", method);

    if let (OperationOutput::ToolCall(outcome), Some(name)) = (&output, tool_name) {
        if outcome.is_error {
            container
                .diagnostics
                .warning(&format!("tool '{}' reported an error", name));
        }
    }

    write_lines(out, output.render_lines())
}

fn config(
    command: &ConfigCommands,
    container: &ServiceContainer,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let rendered = container.settings.redacted().to_toml()?;
            write_lines(out, [rendered.trim_end().to_string()])
        }
        ConfigCommands::Path => {
            let path = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config directory)".to_string());
            write_lines(out, [path])
        }
    }
}

fn write_lines<I>(out: &mut dyn Write, lines: I) -> CliResult<()>
where
    I: IntoIterator<Item = String>,
{
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| InfraError::io("write output", e))?;
    }
    out.flush().map_err(|e| InfraError::io("flush output", e))?;
    Ok(())
}
