//! GitLab client tests against a mock HTTP server.
//!
//! Covers request shape (path, query, auth header), issue pagination,
//! discussion pagination and error classification.

mod common;

use std::sync::Arc;

use gitlab2jira::adapters::gitlab::GitLabClient;
use gitlab2jira::cli::commands::export::run_export;
use gitlab2jira::domain::errors::DomainError;
use gitlab2jira::domain::ports::IssueTracker;
use gitlab2jira::services::{fetch_all_issues, NoProgress};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn page_query(page: u32, per_page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), per_page.to_string()),
    ])
}

async fn mock_issue_page(
    server: &mut ServerGuard,
    page: u32,
    per_page: u32,
    body: serde_json::Value,
) -> mockito::Mock {
    server
        .mock("GET", "/api/v4/groups/k-t-corp/issues")
        .match_query(page_query(page, per_page))
        .match_header("private-token", "glpat-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

async fn mock_discussions(
    server: &mut ServerGuard,
    iid: u64,
    page: u32,
    body: serde_json::Value,
) -> mockito::Mock {
    server
        .mock("GET", format!("/api/v4/projects/7/issues/{iid}/discussions").as_str())
        .match_query(page_query(page, 100))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

fn client(server: &ServerGuard) -> GitLabClient {
    GitLabClient::new("glpat-test", &server.url()).expect("Failed to create client")
}

#[tokio::test]
async fn test_list_group_issues_sends_token_and_paging() {
    let mut server = Server::new_async().await;
    let mock = mock_issue_page(
        &mut server,
        1,
        10,
        json!([common::issue_json(1, "First", "opened", &["bug"])]),
    )
    .await;

    let issues = client(&server).list_group_issues("k-t-corp", 1, 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "First");
    assert_eq!(issues[0].labels, vec!["bug"]);
    assert_eq!(issues[0].description, "", "null description becomes empty");
}

#[tokio::test]
async fn test_pagination_stops_at_first_empty_page() {
    let mut server = Server::new_async().await;
    let page1 = mock_issue_page(
        &mut server,
        1,
        2,
        json!([
            common::issue_json(3, "C", "opened", &[]),
            common::issue_json(2, "B", "opened", &[]),
        ]),
    )
    .await;
    let page2 = mock_issue_page(
        &mut server,
        2,
        2,
        json!([common::issue_json(1, "A", "opened", &[])]),
    )
    .await;
    let page3 = mock_issue_page(&mut server, 3, 2, json!([])).await;
    let page4 = server
        .mock("GET", "/api/v4/groups/k-t-corp/issues")
        .match_query(page_query(4, 2))
        .expect(0)
        .create_async()
        .await;

    let client = client(&server);
    let issues = fetch_all_issues(&client, "k-t-corp", 2).await.unwrap();

    page1.assert_async().await;
    page2.assert_async().await;
    page3.assert_async().await;
    page4.assert_async().await;
    let titles: Vec<&str> = issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_project_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v4/projects/7")
        .match_header("private-token", "glpat-test")
        .with_status(200)
        .with_body(json!({ "id": 7, "path_with_namespace": "k-t-corp/web", "name": "web" }).to_string())
        .create_async()
        .await;

    let path = client(&server).project_path(7).await.unwrap();

    mock.assert_async().await;
    assert_eq!(path, "k-t-corp/web");
}

#[tokio::test]
async fn test_discussions_follow_every_page() {
    let mut server = Server::new_async().await;
    let first = mock_discussions(
        &mut server,
        5,
        1,
        json!([
            { "id": "a1", "individual_note": true, "notes": [
                { "id": 1, "body": "first", "system": false }
            ]},
            { "id": "a2", "individual_note": false, "notes": [
                { "id": 2, "body": "added ~bug label", "system": true },
                { "id": 3, "body": "reply", "system": false }
            ]}
        ]),
    )
    .await;
    let second = mock_discussions(
        &mut server,
        5,
        2,
        json!([{ "id": "b1", "individual_note": true, "notes": [
            { "id": 4, "body": "late", "system": false }
        ]}]),
    )
    .await;
    let end = mock_discussions(&mut server, 5, 3, json!([])).await;

    let discussions = client(&server).issue_discussions(7, 5).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    end.assert_async().await;
    let bodies: Vec<&str> = discussions
        .iter()
        .flat_map(|d| d.notes.iter())
        .map(|n| n.body.as_str())
        .collect();
    assert_eq!(bodies, vec!["first", "added ~bug label", "reply", "late"]);
    assert!(discussions[1].notes[0].system);
}

#[tokio::test]
async fn test_non_success_status_is_remote_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v4/groups/k-t-corp/issues")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"401 Unauthorized"}"#)
        .create_async()
        .await;

    let err = client(&server).list_group_issues("k-t-corp", 1, 10).await.unwrap_err();

    match err {
        DomainError::Remote { operation, message } => {
            assert_eq!(operation, "list_group_issues");
            assert!(message.contains("401"), "message was: {message}");
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_remote_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v4/projects/7")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client(&server).project_path(7).await.unwrap_err();
    assert!(matches!(err, DomainError::Remote { ref operation, .. } if operation == "get_project"));
}

#[tokio::test]
async fn test_export_over_http() {
    common::setup_test_logging();
    let mut server = Server::new_async().await;
    let dir = common::temp_dir();
    let export_path = dir.path().join("export.json");

    let _issues = mock_issue_page(
        &mut server,
        1,
        10,
        json!([
            common::issue_json(2, "Checkout crashes", "closed", &["bug"]),
            common::issue_json(1, "Platform rewrite", "opened", &["bug", "eng-project"]),
        ]),
    )
    .await;
    let _end = mock_issue_page(&mut server, 2, 10, json!([])).await;
    let project = server
        .mock("GET", "/api/v4/projects/7")
        .with_status(200)
        .with_body(json!({ "id": 7, "path_with_namespace": "k-t-corp/web" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let _d1 = mock_discussions(&mut server, 1, 1, json!([])).await;
    let _d2 = mock_discussions(
        &mut server,
        2,
        1,
        json!([{ "id": "x", "individual_note": true, "notes": [
            { "id": 9, "body": "Reproduced on staging", "system": false }
        ]}]),
    )
    .await;
    let _d2_end = mock_discussions(&mut server, 2, 2, json!([])).await;

    let mut config = common::test_config(&export_path);
    config.source.base_url = server.url();

    let tracker: Arc<dyn IssueTracker> = Arc::new(GitLabClient::from_config(&config).unwrap());
    let summary = run_export(&config, tracker, Arc::new(NoProgress), false)
        .await
        .unwrap();

    project.assert_async().await;
    assert_eq!(summary.total_issues, 2);

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "projects": [
                { "key": "ENG", "issues": [{
                    "issueType": "Epic",
                    "status": "To Do",
                    "summary": "Platform rewrite",
                    "description": "",
                    "comments": [
                        { "body": "Imported from https://gitlab.com/k-t-corp/web/-/issues/1" }
                    ]
                }]},
                { "key": "WEB", "issues": [{
                    "issueType": "Bug",
                    "status": "Done",
                    "summary": "Checkout crashes",
                    "description": "",
                    "comments": [
                        { "body": "Reproduced on staging" },
                        { "body": "Imported from https://gitlab.com/k-t-corp/web/-/issues/2" }
                    ]
                }]}
            ]
        })
    );
}
