//! End-to-end command dispatch against an in-memory MCP server

use std::sync::Arc;

use clap::Parser;
use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;

use mcp_tool::application::services::transport::BEARER_TOKEN_IGNORED;
use mcp_tool::cli::{execute_command, execute_standalone, Cli, CliResult};
use mcp_tool::config::Settings;
use mcp_tool::domain::{ContentItem, ToolCallOutcome};
use mcp_tool::exitcode;
use mcp_tool::infrastructure::di::ServiceContainer;
use mcp_tool::util::testing::{
    init_test_setup, FakeConnector, FakeServer, FakeStats, RecordingDiagnostics,
};

struct Run {
    result: CliResult<()>,
    stdout: String,
    stats: Arc<FakeStats>,
    diagnostics: Arc<RecordingDiagnostics>,
}

async fn run_with(connector: FakeConnector, args: &[&str]) -> Run {
    init_test_setup();
    let cli = Cli::try_parse_from(std::iter::once("mcp-tool").chain(args.iter().copied()))
        .expect("parse args");
    let settings = cli.apply_to(Settings::default());

    let stats = connector.stats();
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let container = ServiceContainer::with_deps(settings, Arc::new(connector), diagnostics.clone());

    let mut out: Vec<u8> = Vec::new();
    let result = execute_command(&cli, &container, &mut out).await;

    Run {
        result,
        stdout: String::from_utf8(out).expect("utf8 stdout"),
        stats,
        diagnostics,
    }
}

async fn run(args: &[&str]) -> Run {
    run_with(FakeConnector::new(FakeServer::echo()), args).await
}

// ============================================================
// call
// ============================================================

#[tokio::test]
async fn given_inline_params_when_calling_echo_then_prints_structured_result() {
    let run = run(&[
        "--server",
        "python echo_server.py",
        "call",
        "echo",
        "--params",
        r#"{"message":"hello"}"#,
    ])
    .await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.stdout.contains("hello"));
    let printed: Value = serde_json::from_str(run.stdout.trim()).expect("json output");
    assert_eq!(printed, json!({"result": "hello"}));
    assert_eq!(run.stats.connects(), 1);
    assert_eq!(run.stats.closes(), 1);
}

#[tokio::test]
async fn given_params_file_when_calling_echo_then_prints_file_message() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.json");
    std::fs::write(&path, r#"{"message":"from file"}"#).unwrap();

    let run = run(&[
        "--server",
        "python echo_server.py",
        "call",
        "echo",
        "--params-file",
        path.to_str().unwrap(),
    ])
    .await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.stdout.contains("from file"));
    let calls = run.stats.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.get("message"), Some(&json!("from file")));
}

#[tokio::test]
async fn given_no_params_when_calling_then_sends_empty_object() {
    let run = run(&["--server", "srv", "call", "echo"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    let calls = run.stats.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.is_empty());
}

#[tokio::test]
async fn given_both_params_options_when_calling_then_fails_without_session() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.json");
    std::fs::write(&path, r#"{"message":"from file"}"#).unwrap();

    let run = run(&[
        "--server",
        "srv",
        "call",
        "echo",
        "--params",
        r#"{"message":"hello"}"#,
        "--params-file",
        path.to_str().unwrap(),
    ])
    .await;

    let err = run.result.expect_err("conflicting options must fail");
    assert!(err.to_string().contains("mutually exclusive"));
    assert_ne!(err.exit_code(), exitcode::OK);
    assert_eq!(run.stats.connects(), 0);
    assert!(run.stdout.is_empty());
}

#[tokio::test]
async fn given_missing_params_file_when_calling_then_fails_without_session() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("does-not-exist.json");

    let run = run(&[
        "--server",
        "srv",
        "call",
        "echo",
        "--params-file",
        path.to_str().unwrap(),
    ])
    .await;

    let err = run.result.expect_err("missing file must fail");
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
    assert_eq!(run.stats.connects(), 0);
}

#[rstest]
#[case::truncated(r#"{"message": "#)]
#[case::array(r#"["hello"]"#)]
#[case::bare_string(r#""hello""#)]
#[case::empty("")]
#[case::whitespace("  \n")]
#[tokio::test]
async fn given_bad_inline_params_when_calling_then_fails_with_data_error(#[case] params: &str) {
    let run = run(&["--server", "srv", "call", "echo", "--params", params]).await;

    let err = run.result.expect_err("bad params must fail");
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert_eq!(run.stats.connects(), 0);
}

#[tokio::test]
async fn given_empty_params_file_when_calling_then_fails_without_session() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.json");
    std::fs::write(&path, "\n").unwrap();

    let run = run(&[
        "--server",
        "srv",
        "call",
        "echo",
        "--params-file",
        path.to_str().unwrap(),
    ])
    .await;

    let err = run.result.expect_err("empty file must fail");
    assert_eq!(err.exit_code(), exitcode::DATAERR);
    assert_eq!(run.stats.connects(), 0);
    assert!(run.stdout.is_empty());
}

#[tokio::test]
async fn given_text_and_image_content_when_calling_then_prints_each_item() {
    let server = FakeServer {
        call_result: Some(ToolCallOutcome {
            structured_content: None,
            content: vec![
                ContentItem::Text("first line".into()),
                ContentItem::Other {
                    kind: "image".into(),
                },
                ContentItem::Text("last line".into()),
            ],
            is_error: false,
        }),
        ..FakeServer::echo()
    };

    let run = run_with(FakeConnector::new(server), &["--server", "srv", "call", "draw"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert_eq!(run.stdout, "first line\n[image content]\nlast line\n");
}

#[tokio::test]
async fn given_tool_reporting_error_when_calling_then_prints_content_and_warns() {
    let server = FakeServer {
        call_result: Some(ToolCallOutcome {
            structured_content: None,
            content: vec![ContentItem::Text("boom".into())],
            is_error: true,
        }),
        ..FakeServer::default()
    };

    let run = run_with(FakeConnector::new(server), &["--server", "srv", "call", "explode"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert_eq!(run.stdout, "boom\n");
    assert_eq!(
        run.diagnostics.warnings(),
        vec!["tool 'explode' reported an error".to_string()]
    );
}

#[tokio::test]
async fn given_failing_call_when_calling_then_session_is_still_closed() {
    let run = run(&["--server", "srv", "call", "no-such-tool"]).await;

    let err = run.result.expect_err("unknown tool must fail");
    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
    assert!(err.to_string().contains("Unknown tool"));
    assert_eq!(run.stats.connects(), 1);
    assert_eq!(run.stats.closes(), 1);
    assert!(run.stdout.is_empty());
}

#[tokio::test]
async fn given_failing_call_and_failing_close_when_calling_then_call_error_wins() {
    let server = FakeServer {
        fail_close: true,
        ..FakeServer::echo()
    };

    let run = run_with(FakeConnector::new(server), &["--server", "srv", "call", "nope"]).await;

    let err = run.result.expect_err("call must fail");
    assert!(err.to_string().contains("Unknown tool"));
    assert_eq!(run.diagnostics.warnings().len(), 1);
    assert!(run.diagnostics.warnings()[0].contains("close"));
}

#[tokio::test]
async fn given_failing_close_after_success_when_listing_then_reports_error() {
    let server = FakeServer {
        fail_close: true,
        ..FakeServer::echo()
    };

    let run = run_with(FakeConnector::new(server), &["--server", "srv", "tools"]).await;

    let err = run.result.expect_err("close failure must surface");
    assert_eq!(err.exit_code(), exitcode::SOFTWARE);
    assert!(run.stdout.is_empty());
}

#[tokio::test]
async fn given_blank_tool_name_when_calling_then_fails_with_usage() {
    let run = run(&["--server", "srv", "call", "  "]).await;

    let err = run.result.expect_err("blank name must fail");
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert_eq!(run.stats.connects(), 0);
}

// ============================================================
// listings
// ============================================================

#[tokio::test]
async fn given_echo_server_when_listing_tools_then_prints_json_array() {
    let run = run(&["--server", "srv", "tools"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    let printed: Value = serde_json::from_str(run.stdout.trim()).expect("json output");
    let tools = printed.as_array().expect("array");
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "echo");
    assert_eq!(run.stats.closes(), 1);
}

#[rstest]
#[case::resources("resources")]
#[case::prompts("prompts")]
#[tokio::test]
async fn given_server_without_entries_when_listing_then_prints_empty_array(
    #[case] command: &str,
) {
    let run = run(&["--server", "srv", command]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert_eq!(run.stdout.trim(), "[]");
}

#[tokio::test]
async fn given_resources_when_listing_then_prints_them_in_order() {
    let server = FakeServer {
        resources: vec![
            json!({"uri": "file:///a.txt", "name": "a"}),
            json!({"uri": "file:///b.txt", "name": "b"}),
        ],
        ..FakeServer::default()
    };

    let run = run_with(FakeConnector::new(server), &["--server", "srv", "resources"]).await;

    let printed: Value = serde_json::from_str(run.stdout.trim()).expect("json output");
    assert_eq!(printed[0]["name"], "a");
    assert_eq!(printed[1]["name"], "b");
}

#[tokio::test]
async fn given_unreachable_server_when_listing_then_fails_unavailable() {
    let run = run_with(FakeConnector::unreachable(), &["--server", "srv", "tools"]).await;

    let err = run.result.expect_err("connect failure must surface");
    assert_eq!(err.exit_code(), exitcode::UNAVAILABLE);
    assert_eq!(run.stats.closes(), 0);
}

// ============================================================
// server target handling
// ============================================================

#[rstest]
#[case::tools(&["tools"])]
#[case::resources(&["resources"])]
#[case::prompts(&["prompts"])]
#[case::call(&["call", "echo", "--params", "{}"])]
#[tokio::test]
async fn given_no_server_when_running_session_command_then_fails_without_session(
    #[case] args: &[&str],
) {
    let run = run(args).await;

    let err = run.result.expect_err("missing server must fail");
    assert!(err.to_string().contains("--server"));
    assert_ne!(err.exit_code(), exitcode::OK);
    assert_eq!(run.stats.connects(), 0);
    assert!(run.stdout.is_empty());
}

#[tokio::test]
async fn given_no_server_when_running_version_then_prints_version() {
    let run = run(&["version"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert_eq!(run.stdout, format!("mcp-tool {}\n", mcp_tool::VERSION));
    assert_eq!(run.stats.connects(), 0);
}

#[test]
fn given_broken_settings_file_when_running_version_then_prints_version() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mcp-tool.toml");
    std::fs::write(&path, "server = [unterminated").unwrap();
    let cli =
        Cli::try_parse_from(["mcp-tool", "--config", path.to_str().unwrap(), "version"]).unwrap();
    assert!(Settings::load(cli.config.as_deref()).is_err());

    let mut out: Vec<u8> = Vec::new();
    let result = execute_standalone(&cli, &mut out).expect("version runs standalone");

    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("mcp-tool {}\n", mcp_tool::VERSION)
    );
}

#[test]
fn given_broken_settings_file_when_generating_completion_then_writes_script() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mcp-tool.toml");
    std::fs::write(&path, "server = [unterminated").unwrap();
    let cli = Cli::try_parse_from([
        "mcp-tool",
        "--config",
        path.to_str().unwrap(),
        "completion",
        "bash",
    ])
    .unwrap();

    let mut out: Vec<u8> = Vec::new();
    let result = execute_standalone(&cli, &mut out).expect("completion runs standalone");

    assert!(result.is_ok(), "{:?}", result);
    assert!(String::from_utf8(out).unwrap().contains("mcp-tool"));
}

#[test]
fn given_session_command_when_running_standalone_then_not_handled() {
    let cli = Cli::try_parse_from(["mcp-tool", "--server", "srv", "tools"]).unwrap();

    let mut out: Vec<u8> = Vec::new();

    assert!(execute_standalone(&cli, &mut out).is_none());
    assert!(out.is_empty());
}

#[tokio::test]
async fn given_bearer_token_with_command_target_when_calling_then_warns_and_proceeds() {
    let run = run(&[
        "--server",
        "python echo_server.py",
        "--bearer-token",
        "s3cret",
        "call",
        "echo",
        "--params",
        r#"{"message":"hello"}"#,
    ])
    .await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.stdout.contains("hello"));
    let warnings = run.diagnostics.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("only supported for HTTP servers"));
    assert_eq!(warnings[0], BEARER_TOKEN_IGNORED);
}

#[tokio::test]
async fn given_http_target_with_token_when_listing_then_connects_over_http() {
    let run = run(&[
        "--server",
        "https://example.com/mcp",
        "--bearer-token",
        "s3cret",
        "tools",
    ])
    .await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.diagnostics.warnings().is_empty());
    let transports = run.stats.transports();
    assert_eq!(transports.len(), 1);
    assert_eq!(
        transports[0],
        mcp_tool::domain::TransportSpec::StreamableHttp {
            url: "https://example.com/mcp".into(),
            bearer_token: Some("s3cret".into()),
        }
    );
}

// ============================================================
// config / completion
// ============================================================

#[tokio::test]
async fn given_bearer_token_when_showing_config_then_token_is_redacted() {
    let run = run(&[
        "--server",
        "https://example.com/mcp",
        "--bearer-token",
        "s3cret",
        "config",
        "show",
    ])
    .await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.stdout.contains("https://example.com/mcp"));
    assert!(!run.stdout.contains("s3cret"));
    assert_eq!(run.stats.connects(), 0);
}

#[tokio::test]
async fn given_bash_when_generating_completion_then_writes_script() {
    let run = run(&["completion", "bash"]).await;

    assert!(run.result.is_ok(), "{:?}", run.result);
    assert!(run.stdout.contains("mcp-tool"));
    assert_eq!(run.stats.connects(), 0);
}
