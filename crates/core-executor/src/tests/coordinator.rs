#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::MockDb;
use crate::coordinator::{QueryCoordinator, QueryOptions};
use crate::error::{AggregationError, ExecutionError};
use crate::handlers::{collect_handler, merge_handler};
use crate::models::{QueryRequest, QueryResult};
use crate::utils::Config;
use core_graphdb::{GraphResponse, MemoryGraphDb};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn coordinator(db: Arc<MemoryGraphDb>) -> QueryCoordinator {
    QueryCoordinator::new(db, Arc::new(Config::default()))
}

fn scalar_db(statements: &[(&str, &str, Value)]) -> MemoryGraphDb {
    statements
        .iter()
        .fold(MemoryGraphDb::new(), |db, (statement, column, value)| {
            db.with_response(
                statement,
                GraphResponse::new([*column]).with_row([value.clone()]),
            )
        })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_merge_two_concurrent_queries() {
    let db = Arc::new(scalar_db(&[
        ("RETURN 1 AS x", "x", json!(1)),
        ("RETURN 2 AS y", "y", json!(2)),
    ]));
    let coordinator = coordinator(db);

    let merged = coordinator
        .run_concurrent_queries(
            vec![
                QueryRequest::<Value>::new("a", "RETURN 1 AS x"),
                QueryRequest::<Value>::new("b", "RETURN 2 AS y"),
            ],
            merge_handler,
        )
        .await
        .expect("Failed to run queries");

    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!({"a": [{"x": 1}], "b": [{"y": 2}]})
    );
}

#[tokio::test]
async fn test_zero_requests_call_handler_with_empty_results() {
    let db = Arc::new(MemoryGraphDb::new());
    let coordinator = coordinator(db.clone());
    let calls = AtomicUsize::new(0);

    let merged = coordinator
        .run_concurrent_queries(Vec::<QueryRequest>::new(), |results| {
            calls.fetch_add(1, Ordering::SeqCst);
            assert!(results.is_empty());
            merge_handler(results)
        })
        .await
        .unwrap();

    assert!(merged.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(db.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_handler_runs_once_with_every_result() {
    for n in [1_usize, 2, 5, 16] {
        let statements: Vec<String> = (0..n).map(|i| format!("RETURN {i} AS v")).collect();
        let db = statements.iter().enumerate().fold(
            MemoryGraphDb::new(),
            |db, (i, statement)| {
                db.with_response(statement, GraphResponse::new(["v"]).with_row([json!(i)]))
            },
        );
        let coordinator = coordinator(Arc::new(db));
        let calls = AtomicUsize::new(0);

        let requests = statements
            .iter()
            .enumerate()
            .map(|(i, statement)| QueryRequest::<Value>::new(format!("q{i}"), statement.clone()))
            .collect();
        let received = coordinator
            .run_concurrent_queries(requests, |results| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(results.len())
            })
            .await
            .unwrap();

        assert_eq!(received, n);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_keep_their_own_payload() {
    // Every execution must see its own request, not the last one of the batch.
    let n = 32;
    let db = (0..n).fold(MemoryGraphDb::new(), |db, i| {
        db.with_response(
            &format!("MATCH (u:USER {{id: '{i}'}}) RETURN u.id AS id"),
            GraphResponse::new(["id"]).with_row([json!(i.to_string())]),
        )
    });
    let db = Arc::new(db);
    let coordinator = coordinator(db.clone());

    let requests = (0..n)
        .map(|i| {
            QueryRequest::<Value>::new(
                format!("user-{i}"),
                format!("MATCH (u:USER {{id: '{i}'}}) RETURN u.id AS id"),
            )
        })
        .collect();
    let merged = coordinator
        .run_concurrent_queries(requests, merge_handler)
        .await
        .unwrap();

    assert_eq!(merged.len(), n);
    for i in 0..n {
        assert_eq!(merged[&format!("user-{i}")], vec![json!({"id": i.to_string()})]);
    }
    assert_eq!(db.calls().len(), n);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_results_follow_submission_order() {
    // the first request finishes last
    let db = scalar_db(&[
        ("RETURN 'slow' AS v", "v", json!("slow")),
        ("RETURN 'medium' AS v", "v", json!("medium")),
        ("RETURN 'fast' AS v", "v", json!("fast")),
    ])
    .with_latency("RETURN 'slow' AS v", Duration::from_millis(150))
    .with_latency("RETURN 'medium' AS v", Duration::from_millis(50));
    let coordinator = coordinator(Arc::new(db));

    let results: Vec<QueryResult> = coordinator
        .run_concurrent_queries(
            vec![
                QueryRequest::new("slow", "RETURN 'slow' AS v"),
                QueryRequest::new("medium", "RETURN 'medium' AS v"),
                QueryRequest::new("fast", "RETURN 'fast' AS v"),
            ],
            collect_handler,
        )
        .await
        .unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["slow", "medium", "fast"]);
    assert_eq!(results[0].payload, vec![json!({"v": "slow"})]);
    assert_eq!(results[2].columns, vec!["v"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failing_query_aborts_batch() {
    let db = scalar_db(&[("RETURN 1 AS x", "x", json!(1))])
        .with_error("MATCH (n) RETURN n", "connection refused");
    let coordinator = coordinator(Arc::new(db));
    let calls = AtomicUsize::new(0);

    let err = coordinator
        .run_concurrent_queries(
            vec![
                QueryRequest::<Value>::new("ok", "RETURN 1 AS x"),
                QueryRequest::<Value>::new("failing", "MATCH (n) RETURN n"),
            ],
            |results| {
                calls.fetch_add(1, Ordering::SeqCst);
                merge_handler(results)
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Query { .. }));
    assert_eq!(err.request_name(), Some("failing"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_statement_names_request() {
    let coordinator = coordinator(Arc::new(MemoryGraphDb::new()));

    let err = coordinator
        .run_concurrent_queries(
            vec![QueryRequest::<Value>::new("bad", "RETRN 1 AS x")],
            merge_handler,
        )
        .await
        .unwrap_err();

    assert_eq!(err.request_name(), Some("bad"));
    assert_eq!(
        err.to_string(),
        "Query bad failed: Unknown statement: RETRN 1 AS x"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_timeout_lists_pending_queries() {
    let db = scalar_db(&[
        ("RETURN 1 AS x", "x", json!(1)),
        ("RETURN 2 AS y", "y", json!(2)),
    ])
    .with_latency("RETURN 2 AS y", Duration::from_secs(30));
    let db = Arc::new(db);
    let coordinator = QueryCoordinator::new(
        db.clone(),
        Arc::new(Config::new().with_query_timeout(Duration::from_millis(100))),
    );

    let err = coordinator
        .run_concurrent_queries(
            vec![
                QueryRequest::<Value>::new("a", "RETURN 1 AS x"),
                QueryRequest::<Value>::new("b", "RETURN 2 AS y"),
            ],
            merge_handler,
        )
        .await
        .unwrap_err();

    match err {
        ExecutionError::Timeout { timeout, pending } => {
            assert_eq!(timeout, Duration::from_millis(100));
            assert_eq!(pending, vec!["b".to_string()]);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    // the slow execution was aborted and released its handle
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(Arc::strong_count(&db), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_options_timeout_overrides_config() {
    let db = scalar_db(&[("RETURN 1 AS x", "x", json!(1))])
        .with_latency("RETURN 1 AS x", Duration::from_millis(200));
    let coordinator = QueryCoordinator::new(
        Arc::new(db),
        Arc::new(Config::new().with_query_timeout(Duration::from_millis(10))),
    );

    let merged = coordinator
        .run_concurrent_queries_with(
            vec![QueryRequest::<Value>::new("a", "RETURN 1 AS x")],
            merge_handler,
            QueryOptions::new().with_timeout(Duration::from_secs(5)),
        )
        .await
        .unwrap();
    assert_eq!(merged["a"], vec![json!({"x": 1})]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cancellation_stops_waiting() {
    let db = scalar_db(&[("RETURN 1 AS x", "x", json!(1))])
        .with_latency("RETURN 1 AS x", Duration::from_secs(30));
    let coordinator = coordinator(Arc::new(db));
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = coordinator
        .run_concurrent_queries_with(
            vec![QueryRequest::<Value>::new("slow", "RETURN 1 AS x")],
            merge_handler,
            QueryOptions::new().with_cancellation(token),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::Cancelled { ref pending } if pending == &["slow"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_bounds_in_flight_queries() {
    let statements: Vec<String> = (0..6).map(|i| format!("RETURN {i} AS v")).collect();
    let db = statements.iter().fold(MemoryGraphDb::new(), |db, statement| {
        db.with_response(statement, GraphResponse::new(["v"]).with_row([json!(0)]))
            .with_latency(statement, Duration::from_millis(30))
    });
    let db = Arc::new(db);
    let coordinator = QueryCoordinator::new(
        db.clone(),
        Arc::new(Config::new().with_max_concurrent_queries(2)),
    );

    let requests = statements
        .iter()
        .enumerate()
        .map(|(i, statement)| QueryRequest::<Value>::new(format!("q{i}"), statement.clone()))
        .collect();
    let results = coordinator
        .run_concurrent_queries(requests, collect_handler)
        .await
        .unwrap();

    assert_eq!(results.len(), 6);
    assert!(db.max_in_flight() <= 2);
    assert_eq!(db.calls().len(), 6);
}

#[tokio::test]
async fn test_aggregation_error_is_propagated() {
    let db = Arc::new(scalar_db(&[("RETURN 1 AS x", "x", json!(1))]));
    let coordinator = coordinator(db);

    let err = coordinator
        .run_concurrent_queries(
            vec![QueryRequest::<Value>::new("a", "RETURN 1 AS x")],
            |_results| -> Result<(), AggregationError> {
                Err(AggregationError::Inconsistent {
                    message: "no author for post".to_string(),
                })
            },
        )
        .await
        .unwrap_err();

    match err {
        ExecutionError::Aggregation {
            source: AggregationError::Inconsistent { message },
        } => assert_eq!(message, "no author for post"),
        other => panic!("expected aggregation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_names_keep_both_results() {
    let db = Arc::new(scalar_db(&[
        ("RETURN 1 AS x", "x", json!(1)),
        ("RETURN 2 AS x", "x", json!(2)),
    ]));
    let coordinator = coordinator(db);
    let requests = vec![
        QueryRequest::<Value>::new("same", "RETURN 1 AS x"),
        QueryRequest::<Value>::new("same", "RETURN 2 AS x"),
    ];

    let results = coordinator
        .run_concurrent_queries(requests.clone(), collect_handler)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);

    // results arrive in submission order, so the later request wins the merge
    let merged = coordinator
        .run_concurrent_queries(requests, merge_handler)
        .await
        .unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged["same"], vec![json!({"x": 2})]);
}

#[tokio::test]
async fn test_run_single_query() {
    let db = Arc::new(scalar_db(&[("RETURN 1 AS x", "x", json!(1))]));
    let coordinator = coordinator(db);

    let result = coordinator
        .run_single_query(QueryRequest::<Value>::new("single", "RETURN 1 AS x"))
        .await
        .unwrap();
    assert_eq!(result.name, "single");
    assert_eq!(result.payload, vec![json!({"x": 1})]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panicking_execution_is_reported() {
    let mut db = MockDb::new();
    db.expect_run()
        .times(1)
        .returning(|_, _| panic!("driver bug"));
    let coordinator = QueryCoordinator::new(Arc::new(db), Arc::new(Config::default()));

    let err = coordinator
        .run_concurrent_queries(
            vec![QueryRequest::<Value>::new("boom", "RETURN 1")],
            merge_handler,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutionError::TaskJoin { .. }));
    assert_eq!(err.request_name(), Some("boom"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dropped_call_aborts_executions() {
    let db = scalar_db(&[("RETURN 1 AS x", "x", json!(1))])
        .with_latency("RETURN 1 AS x", Duration::from_millis(500));
    let db = Arc::new(db);
    let coordinator = QueryCoordinator::new(db.clone(), Arc::new(Config::new()));

    let outcome = tokio::time::timeout(
        Duration::from_millis(50),
        coordinator.run_concurrent_queries(
            vec![QueryRequest::<Value>::new("slow", "RETURN 1 AS x")],
            merge_handler,
        ),
    )
    .await;
    assert!(outcome.is_err());

    // only the test and the coordinator still hold the database
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(Arc::strong_count(&db), 2);
    assert_eq!(db.call_count("RETURN 1 AS x"), 1);
}
