use std::process::{Command, Output};

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RPC_PATH: &str = "/lib/exe/xmlrpc.php";

/// Run the CLI binary against `wiki` with test credentials.
///
/// The process blocks, so it runs off the async runtime that drives the
/// mock server.
pub async fn run_cli(wiki: &str, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dokuwiki"));
    cmd.args(["--wiki", wiki, "--user", "alice", "--passwd", "secret"])
        .args(args)
        .env_remove("DOKUWIKI_URL")
        .env_remove("DOKUWIKI_USER")
        .env_remove("DOKUWIKI_PASSWD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");

    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
        .await
        .expect("CLI task panicked")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(wiki: &str, args: &[&str]) -> String {
    let output = run_cli(wiki, args).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn xml_response(value: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml")
        .set_body_string(format!(
            "<?xml version=\"1.0\"?>\n<methodResponse><params><param><value>{value}</value></param></params></methodResponse>\n"
        ))
}

pub fn fault_response(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml")
        .set_body_string(format!(
            "<?xml version=\"1.0\"?>\n<methodResponse><fault><value><struct>\
             <member><name>faultCode</name><value><int>{code}</int></value></member>\
             <member><name>faultString</name><value><string>{message}</string></value></member>\
             </struct></value></fault></methodResponse>\n"
        ))
}

/// Start a mock wiki that answers the connection probe.
pub async fn mock_wiki() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RPC_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("XML-RPC server accepts POST requests only."),
        )
        .mount(&server)
        .await;
    server
}

pub async fn mock_procedure(server: &MockServer, procedure: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_string_contains(format!(
            "<methodName>{procedure}</methodName>"
        )))
        .respond_with(response)
        .mount(server)
        .await;
}
