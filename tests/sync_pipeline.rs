//! End-to-end sync pipeline tests: real client, real SQLite store, stub
//! upstream.

use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pokesync::application::SyncService;
use pokesync::domain::{
    CatalogClient, DetailResolver, PokemonRepository, RankAttribute, SyncError,
};
use pokesync::infrastructure::config::DatabaseConfig;
use pokesync::infrastructure::{
    DatabaseConnection, HttpClient, HttpClientConfig, PokeApiClient, SqlitePokemonRepository,
};

async fn sqlite_repository() -> (Arc<SqlitePokemonRepository>, TempDir) {
    let temp_dir = tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite:{}", temp_dir.path().join("sync.db").display()),
        max_connections: 2,
    };
    let db = DatabaseConnection::new(&config).await.unwrap();
    db.migrate().await.unwrap();
    (
        Arc::new(SqlitePokemonRepository::new(db.pool().clone())),
        temp_dir,
    )
}

fn pipeline(server: &MockServer, repository: Arc<SqlitePokemonRepository>) -> SyncService {
    let http = Arc::new(HttpClient::new(HttpClientConfig::default()).unwrap());
    let client = Arc::new(PokeApiClient::new(http, &server.uri()));
    SyncService::new(
        Arc::clone(&client) as Arc<dyn CatalogClient>,
        client as Arc<dyn DetailResolver>,
        repository as Arc<dyn PokemonRepository>,
        1500,
        4,
    )
}

async fn mount_catalog(server: &MockServer, entries: &[(&str, i64)]) {
    let results: Vec<String> = entries
        .iter()
        .map(|(name, id)| {
            format!(
                r#"{{"name":"{name}","url":"{}/pokemon/{id}/"}}"#,
                server.uri()
            )
        })
        .collect();
    let body = format!(
        r#"{{"count":{},"next":null,"previous":null,"results":[{}]}}"#,
        entries.len(),
        results.join(",")
    );
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: i64, name: &str, height: i64, weight: i64, xp: i64) {
    let body = format!(
        r#"{{"id":{id},"name":"{name}","height":{height},"weight":{weight},"base_experience":{xp}}}"#
    );
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{id}/")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn one_broken_detail_link_does_not_abort_the_cycle() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[("pikachu", 25), ("charizard", 6)]).await;
    mount_detail(&server, 25, "pikachu", 4, 60, 112).await;
    Mock::given(method("GET"))
        .and(path("/pokemon/6/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (repository, _dir) = sqlite_repository().await;
    let service = pipeline(&server, Arc::clone(&repository));

    let report = service.run_sync_cycle().await.unwrap();

    assert_eq!(report.listed, 2);
    assert_eq!(report.resolved, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(repository.count().await.unwrap(), 1);

    let stored = repository
        .top_by_attribute(RankAttribute::Weight, 1)
        .await
        .unwrap();
    assert_eq!(stored[0].name, "pikachu");
    assert_eq!(stored[0].height, Some(4));
    assert_eq!(stored[0].base_experience, Some(112));
}

#[tokio::test]
async fn rerun_with_unchanged_catalog_keeps_one_row_per_pokemon() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[("pikachu", 25), ("charizard", 6)]).await;
    mount_detail(&server, 25, "pikachu", 4, 60, 112).await;
    mount_detail(&server, 6, "charizard", 17, 905, 240).await;

    let (repository, _dir) = sqlite_repository().await;
    let service = pipeline(&server, Arc::clone(&repository));

    service.run_sync_cycle().await.unwrap();
    let first = repository
        .top_by_attribute(RankAttribute::Weight, 10)
        .await
        .unwrap();
    assert_eq!(first.len(), 2);

    service.run_sync_cycle().await.unwrap();

    assert_eq!(repository.count().await.unwrap(), 2);
    let second = repository
        .top_by_attribute(RankAttribute::Weight, 10)
        .await
        .unwrap();
    // Internal ids assigned on the first cycle survive the second.
    for row in &second {
        let original = first.iter().find(|p| p.poke_api_id == row.poke_api_id).unwrap();
        assert_eq!(row.id, original.id);
    }
}

#[tokio::test]
async fn missing_result_list_leaves_the_store_unchanged() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[("pikachu", 25)]).await;
    mount_detail(&server, 25, "pikachu", 4, 60, 112).await;

    let (repository, _dir) = sqlite_repository().await;

    // Seed one record through a healthy cycle.
    let service = pipeline(&server, Arc::clone(&repository));
    service.run_sync_cycle().await.unwrap();
    assert_eq!(repository.count().await.unwrap(), 1);

    // Upstream degrades: the list response loses its result array.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"count":0}"#))
        .mount(&server)
        .await;

    let err = service.run_sync_cycle().await.unwrap_err();
    assert!(matches!(err, SyncError::UpstreamUnavailable { .. }));
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn zero_entry_catalog_completes_successfully() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[]).await;

    let (repository, _dir) = sqlite_repository().await;
    let service = pipeline(&server, Arc::clone(&repository));

    let report = service.run_sync_cycle().await.unwrap();
    assert_eq!(report.listed, 0);
    assert_eq!(report.resolved, 0);
    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn ranking_queries_serve_the_synced_snapshot() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        &[("pikachu", 25), ("charizard", 6), ("snorlax", 143)],
    )
    .await;
    mount_detail(&server, 25, "pikachu", 4, 60, 112).await;
    mount_detail(&server, 6, "charizard", 17, 905, 240).await;
    mount_detail(&server, 143, "snorlax", 21, 4600, 189).await;

    let (repository, _dir) = sqlite_repository().await;
    let service = pipeline(&server, Arc::clone(&repository));
    service.run_sync_cycle().await.unwrap();

    let by_height = repository
        .top_by_attribute(RankAttribute::Height, 2)
        .await
        .unwrap();
    assert_eq!(by_height[0].name, "snorlax");
    assert_eq!(by_height[1].name, "charizard");

    let by_weight = repository
        .top_by_attribute(RankAttribute::Weight, 1)
        .await
        .unwrap();
    assert_eq!(by_weight[0].name, "snorlax");

    let by_xp = repository
        .top_by_attribute(RankAttribute::BaseExperience, 3)
        .await
        .unwrap();
    assert_eq!(by_xp[0].name, "charizard");
    assert_eq!(by_xp[2].name, "pikachu");
}
