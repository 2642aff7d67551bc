//! CLI integration tests against a mock wiki.

mod common;

use tempfile::TempDir;

use common::{fault_response, mock_procedure, mock_wiki, run_cli, run_cli_success, xml_response};

#[tokio::test]
async fn raw_prints_page_text() {
    let server = mock_wiki().await;
    mock_procedure(
        &server,
        "wiki.getPage",
        xml_response("<string>====== Start ======</string>"),
    )
    .await;

    let stdout = run_cli_success(&server.uri(), &["raw", "start"]).await;
    assert_eq!(stdout.trim_end(), "====== Start ======");
}

#[tokio::test]
async fn allpages_lists_ids() {
    let server = mock_wiki().await;
    mock_procedure(
        &server,
        "wiki.getAllPages",
        xml_response(
            "<array><data>\
             <value><struct><member><name>id</name><value><string>start</string></value></member></struct></value>\
             <value><struct><member><name>id</name><value><string>wiki:syntax</string></value></member></struct></value>\
             </data></array>",
        ),
    )
    .await;

    let stdout = run_cli_success(&server.uri(), &["allpages"]).await;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["start", "wiki:syntax"]);
}

#[tokio::test]
async fn info_as_json() {
    let server = mock_wiki().await;
    mock_procedure(
        &server,
        "wiki.getPageInfo",
        xml_response(
            "<struct>\
             <member><name>name</name><value><string>start</string></value></member>\
             <member><name>version</name><value><int>1700000000</int></value></member>\
             </struct>",
        ),
    )
    .await;

    let stdout = run_cli_success(&server.uri(), &["info", "start", "--json"]).await;
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["name"], "start");
    assert_eq!(json["version"], 1700000000);
}

#[tokio::test]
async fn fault_exits_with_failure() {
    let server = mock_wiki().await;
    mock_procedure(&server, "wiki.getPage", fault_response(121, "Unknown page")).await;

    let output = run_cli(&server.uri(), &["raw", "missing"]).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("121"), "stderr: {stderr}");
    assert!(stderr.contains("Unknown page"), "stderr: {stderr}");
}

#[tokio::test]
async fn unreachable_wiki_exits_with_failure() {
    let output = run_cli("http://127.0.0.1:1/", &["version"]).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("127.0.0.1:1"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn file_get_writes_bytes() {
    let server = mock_wiki().await;
    mock_procedure(
        &server,
        "wiki.getAttachment",
        xml_response("<base64>iVBORw0KGgo=</base64>"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("logo.png");
    run_cli_success(
        &server.uri(),
        &["file", "get", "wiki:logo.png", "-o", dest.to_str().unwrap()],
    )
    .await;

    let bytes = std::fs::read(&dest).unwrap();
    assert_eq!(bytes, b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn lock_requires_a_page() {
    let server = mock_wiki().await;

    let output = run_cli(&server.uri(), &["lock"]).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--lock"), "stderr: {stderr}");
}
