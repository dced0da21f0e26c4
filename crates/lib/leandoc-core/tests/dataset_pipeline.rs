use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use leandoc_core::control::{ControlConfig, ErrorKind, LeanDocControlPlane};
use leandoc_core::fetch::FetchOutcome;
use leandoc_core::format::format_result;
use leandoc_core::search::SearchScope;
use leandoc_store::models::SearchResult;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATASET_ROUTE: &str = "/mathlib4_docs/declarations/declaration-data.bmp";

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("declaration-data.json")
}

fn load_fixture() -> String {
    let path = fixture_path();
    std::fs::read_to_string(&path).unwrap_or_else(|err| {
        let path_display = path.display();
        panic!("failed to read declaration fixture at {path_display}: {err}")
    })
}

async fn serve_fixture(expected_requests: u64, delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATASET_ROUTE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture())
                .set_delay(delay),
        )
        .expect(expected_requests)
        .mount(&server)
        .await;
    server
}

fn control_for(server_uri: &str, dir: &tempfile::TempDir) -> LeanDocControlPlane {
    LeanDocControlPlane::new(
        ControlConfig::new(dir.path().join("cache").join("declaration-data.bmp"))
            .with_dataset_url(format!("{server_uri}{DATASET_ROUTE}")),
    )
}

#[tokio::test]
async fn first_call_downloads_then_reuses_local_copy() {
    let server = serve_fixture(1, Duration::ZERO).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let blocks = control
        .search_lean_doc(&["add".to_string()])
        .await
        .expect("search should succeed");
    assert!(control.dataset_path().exists(), "dataset should be saved");
    assert!(blocks.contains(
        &"Declaration: add_comm\nKind: theorem\nDocumentation Link: ./Mathlib/Add.html\n-----"
            .to_string()
    ));

    let again = control
        .search_lean_doc(&["add".to_string()])
        .await
        .expect("second search should succeed");
    assert_eq!(blocks, again);
}

#[tokio::test]
async fn results_follow_query_then_dataset_order() {
    let server = serve_fixture(1, Duration::ZERO).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let results = control
        .search(
            &["comm".to_string(), "nat.add".to_string()],
            SearchScope::Declarations,
            Some(3),
        )
        .await
        .expect("search should succeed");
    let names: Vec<&str> = results.iter().map(SearchResult::name).collect();
    assert_eq!(
        names,
        ["add_comm", "mul_comm", "AddCommMonoid", "Nat.add", "Nat.add_zero"]
    );

    let rendered: Vec<String> = results.iter().map(format_result).collect();
    assert!(rendered.iter().all(|block| block.ends_with("\n-----")));
}

#[tokio::test]
async fn missing_fields_render_with_defaults() {
    let server = serve_fixture(1, Duration::ZERO).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let blocks = control
        .search_lean_doc(&["sum_add".to_string()])
        .await
        .expect("search should succeed");
    assert_eq!(
        blocks,
        ["Declaration: Finset.sum_add_distrib\nKind: theorem\nDocumentation Link: \n-----"]
    );
}

#[tokio::test]
async fn module_scope_uses_absolute_urls_and_truncates_importers() {
    let server = serve_fixture(1, Duration::ZERO).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let results = control
        .search(&["group.defs".to_string()], SearchScope::Modules, None)
        .await
        .expect("module search should succeed");
    assert_eq!(results.len(), 1);
    let block = format_result(&results[0]);
    assert!(block.starts_with(
        "Module: Mathlib.Algebra.Group.Defs\nURL: https://leanprover-community.github.io/mathlib4_docs/Mathlib/Algebra/Group/Defs.html\n"
    ));
    assert!(block.ends_with("Mathlib.Data.Nat.Basic...\n-----"));
}

#[tokio::test]
async fn failed_download_surfaces_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATASET_ROUTE))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>unavailable</html>"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let err = control
        .search_lean_doc(&["add".to_string()])
        .await
        .expect_err("missing dataset should fail");
    assert_eq!(err.kind(), ErrorKind::MissingData);
    assert!(err.source().is_some(), "fetch failure should be the cause");
    assert!(!control.dataset_path().exists(), "error page must not be saved");
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_missing_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    let control = LeanDocControlPlane::new(
        ControlConfig::new(dir.path().join("declaration-data.bmp"))
            .with_dataset_url("http://127.0.0.1:9/declaration-data.bmp")
            .with_fetch_timeout(Some(Duration::from_secs(5))),
    );

    let err = control
        .load_dataset()
        .await
        .expect_err("unreachable endpoint should fail");
    assert_eq!(err.kind(), ErrorKind::MissingData);
}

#[tokio::test]
async fn explicit_fetch_reports_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DATASET_ROUTE))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);

    let err = control.fetch().await.expect_err("404 should fail");
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn concurrent_first_calls_download_once() {
    let server = serve_fixture(1, Duration::from_millis(200)).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let control = control_for(&server.uri(), &dir);
    let other = control.clone();

    let queries = ["add".to_string()];
    let (first, second) = tokio::join!(
        control.search_lean_doc(&queries),
        other.search_lean_doc(&queries)
    );

    assert_eq!(
        first.expect("first call should succeed"),
        second.expect("second call should succeed")
    );
    let outcome = control.fetch().await.expect("fetch should see the file");
    assert_eq!(outcome, FetchOutcome::AlreadyPresent);
}
