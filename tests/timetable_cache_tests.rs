use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;
use timetable_bot::error::BotError;
use timetable_bot::timetable::catalog::{GroupCatalog, GroupEntry};
use timetable_bot::timetable::{TimetableCache, WeekParity};

fn sample_payload() -> Value {
    let empty_day = json!({"lessons": []});
    let mut odd_week: Vec<Value> = (0..7).map(|_| empty_day.clone()).collect();
    odd_week[0] = json!({
        "lessons": [{
            "time": "08:00-09:30",
            "subgroups": [{
                "name": "Calculus",
                "type": 1,
                "teacher": "Ivanov I. I.",
                "place": "22-11",
                "num": 0
            }]
        }]
    });
    let even_week: Vec<Value> = (0..7).map(|_| empty_day.clone()).collect();

    json!([{"odd_week": odd_week, "even_week": even_week}])
}

/// Spins up an in-process fake of the remote timetable provider.
async fn spawn_provider(week: i64) -> String {
    let payload = sample_payload();
    let app = Router::new()
        .route(
            "/timetable/:id",
            get(move |Path(_id): Path<i64>| {
                let payload = payload.clone();
                async move { Json(payload) }
            }),
        )
        .route(
            "/CurrentWeek/",
            get(move || async move { Json(json!({"week": week})) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind provider listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

fn catalog() -> GroupCatalog {
    GroupCatalog::from_entries(vec![GroupEntry {
        name: "БПИ19-02".to_string(),
        id: 42,
    }])
}

#[tokio::test]
async fn test_ensure_fresh_then_load() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new(base_url, temp_dir.path());

    assert!(!cache.has_cache("БПИ19-02"));
    cache.ensure_fresh(&catalog(), "БПИ19-02").await.unwrap();
    assert!(cache.has_cache("БПИ19-02"));

    let document = cache.load("БПИ19-02").unwrap();
    assert_eq!(document.odd_week.len(), 7);
    assert_eq!(document.odd_week[0].lessons[0].time, "08:00-09:30");
    assert_eq!(document.odd_week[0].lessons[0].subgroups[0].name, "Calculus");
}

#[tokio::test]
async fn test_cache_artifact_is_named_by_canonical_group() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new(base_url, temp_dir.path());

    cache.ensure_fresh(&catalog(), "бпи19-02").await.unwrap();
    assert!(temp_dir.path().join("БПИ19-02.json").is_file());
    // lookups under any casing hit the same artifact
    assert!(cache.has_cache("бпи19-02"));
    assert!(cache.has_cache("БПИ19-02"));
}

#[tokio::test]
async fn test_ensure_fresh_is_idempotent() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new(base_url, temp_dir.path());
    let artifact = temp_dir.path().join("БПИ19-02.json");

    cache.ensure_fresh(&catalog(), "БПИ19-02").await.unwrap();
    let first = std::fs::read(&artifact).unwrap();

    cache.ensure_fresh(&catalog(), "БПИ19-02").await.unwrap();
    let second = std::fs::read(&artifact).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_refreshes_keep_artifact_readable() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = std::sync::Arc::new(TimetableCache::new(base_url, temp_dir.path()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            cache.ensure_fresh(&catalog(), "БПИ19-02").await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // whichever write won, the published artifact is a complete document
    let document = cache.load("БПИ19-02").unwrap();
    assert_eq!(document.odd_week[0].lessons[0].subgroups[0].name, "Calculus");

    // every temp file was renamed away
    let leftovers = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_unknown_group_fails_without_fetch() {
    let temp_dir = TempDir::new().unwrap();
    // unroutable base: resolution must fail before any request happens
    let cache = TimetableCache::new("http://127.0.0.1:1", temp_dir.path());

    let err = cache.ensure_fresh(&catalog(), "ФХ19-01").await.unwrap_err();
    assert!(matches!(err, BotError::UnknownGroup(_)));
}

#[tokio::test]
async fn test_fetch_failure_leaves_previous_artifact() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();

    let cache = TimetableCache::new(base_url, temp_dir.path());
    cache.ensure_fresh(&catalog(), "БПИ19-02").await.unwrap();

    let dead_cache = TimetableCache::new("http://127.0.0.1:1", temp_dir.path());
    let err = dead_cache
        .ensure_fresh(&catalog(), "БПИ19-02")
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::FetchFailed(_)));

    // the old artifact is still there and still readable
    assert!(dead_cache.has_cache("БПИ19-02"));
    let document = dead_cache.load("БПИ19-02").unwrap();
    assert_eq!(document.odd_week[0].lessons[0].subgroups[0].name, "Calculus");
}

#[tokio::test]
async fn test_load_without_artifact_is_no_cache_yet() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new("http://127.0.0.1:1", temp_dir.path());

    let err = cache.load("БПИ19-02").unwrap_err();
    assert!(matches!(err, BotError::NoCacheYet(_)));
}

#[tokio::test]
async fn test_week_counter_one_means_odd() {
    let base_url = spawn_provider(1).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new(base_url, temp_dir.path());

    assert_eq!(cache.current_week_parity().await.unwrap(), WeekParity::Odd);
}

#[tokio::test]
async fn test_week_counter_zero_means_even() {
    let base_url = spawn_provider(0).await;
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new(base_url, temp_dir.path());

    assert_eq!(cache.current_week_parity().await.unwrap(), WeekParity::Even);
}

#[tokio::test]
async fn test_week_counter_failure_is_fetch_failed() {
    let temp_dir = TempDir::new().unwrap();
    let cache = TimetableCache::new("http://127.0.0.1:1", temp_dir.path());

    let err = cache.current_week_parity().await.unwrap_err();
    assert!(matches!(err, BotError::FetchFailed(_)));
}
