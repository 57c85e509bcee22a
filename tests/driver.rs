use std::time::Duration;

use corun::prelude::*;
use corun::{Resumed, Started, YieldKind};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A coroutine that yields each of `steps` in order and records what it was resumed
/// with, catching failures as `{"caught": message}` when `catch` is set.
fn recorder(steps: Vec<Yield>, catch: bool) -> impl Coroutine {
    let mut steps = steps.into_iter();
    let mut seen = Vec::new();
    let mut started = false;
    from_fn(move |resume: Resume| -> Resumed {
        if started {
            match resume {
                Ok(value) => seen.push(value),
                Err(error) if catch => seen.push(json!({"caught": error.to_string()})),
                Err(error) => return Err(error),
            }
        }
        started = true;
        Ok(match steps.next() {
            Some(next) => Step::Suspended(next),
            None => Step::Finished(Value::Array(std::mem::take(&mut seen))),
        })
    })
}

#[tokio::test]
async fn immediate_values_match_direct_execution() {
    init_tracing();

    let direct = json!([[1, 2], {"x": "y"}]);
    let stage = recorder(
        vec![
            Yield::sequence([Yield::value(1), Yield::value(2)]),
            Yield::record([("x", Yield::value("y"))]),
        ],
        false,
    );
    let result = run_detached(stage.boxed(), vec![]).await.unwrap();
    assert_eq!(result, direct);
}

#[tokio::test]
async fn sequence_of_thunks_resumes_in_order() {
    init_tracing();

    let thunks = (1..=3)
        .map(|n| Yield::thunk(move |_, done| done.ok(json!(n))))
        .collect::<Vec<_>>();
    let stage = recorder(vec![Yield::from(thunks)], false);
    let result = run_detached(stage.boxed(), vec![]).await.unwrap();
    assert_eq!(result, json!([[1, 2, 3]]));
}

#[tokio::test]
async fn record_with_future_resumes_with_settled_record() {
    init_tracing();

    let record = Yield::record([
        ("a", Yield::future(async { Ok(json!(1)) })),
        ("b", Yield::value(2)),
    ]);
    let result = run_detached(recorder(vec![record], false).boxed(), vec![])
        .await
        .unwrap();
    assert_eq!(result, json!([{"a": 1, "b": 2}]));
}

#[tokio::test]
async fn bare_number_is_an_invalid_yield() {
    init_tracing();

    let uncaught = recorder(vec![Yield::value(1)], false);
    let error = run_detached(uncaught.boxed(), vec![]).await.unwrap_err();
    assert!(matches!(
        error,
        Error::InvalidYield {
            kind: YieldKind::Other
        }
    ));

    let caught = recorder(
        vec![Yield::value(1), Yield::future(async { Ok(json!("next")) })],
        true,
    );
    let result = run_detached(caught.boxed(), vec![]).await.unwrap();
    assert_eq!(result[0]["caught"], json!(error.to_string()));
    assert_eq!(result[1], json!("next"));
}

#[tokio::test]
async fn thunk_result_arity() {
    init_tracing();

    let stage = recorder(
        vec![
            Yield::thunk(|_, done| done.call(None, vec![json!(10), json!(20)])),
            Yield::thunk(|_, done| done.call(None, vec![json!(10)])),
        ],
        false,
    );
    let result = run_detached(stage.boxed(), vec![]).await.unwrap();
    assert_eq!(result, json!([[10, 20], 10]));
}

#[tokio::test]
async fn wrap_is_equivalent_to_run() {
    init_tracing();

    let factory = Factory::from_fn(|ctx, args| {
        let scale = ctx.get::<i64>().copied().unwrap_or(1);
        let thunks = args
            .into_iter()
            .map(|arg| {
                let n = arg.as_i64().unwrap_or_default() * scale;
                Yield::thunk(move |_, done| done.ok(json!(n)))
            })
            .collect::<Vec<_>>();
        recorder(vec![Yield::from(thunks)], false)
    });
    let ctx = Context::new(10_i64);
    let args = vec![json!(1), json!(2)];

    let wrapped = wrap(factory.clone()).call(&ctx, args.clone()).await.unwrap();
    let direct = run(factory, &ctx, args).await.unwrap();
    assert_eq!(wrapped, direct);
    assert_eq!(wrapped, json!([[10, 20]]));
}

#[tokio::test]
async fn join_rejects_without_waiting_on_pending_siblings() {
    init_tracing();

    let sequence = Yield::sequence([
        Yield::future(futures::future::pending()),
        Yield::thunk(|_, done| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                done.err(Error::msg("thunk failed"));
            });
        }),
    ]);
    let stage = recorder(vec![sequence], false);

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        run_detached(stage.boxed(), vec![]),
    )
    .await
    .expect("the failing thunk must reject the join");
    assert_eq!(outcome.unwrap_err().to_string(), "thunk failed");
}

#[tokio::test]
async fn conversion_failures_are_offered_to_the_coroutine() {
    init_tracing();

    let stage = recorder(
        vec![
            Yield::record([(
                "bad",
                Yield::future(async { Err(Error::rejected(json!({"status": 500}))) }),
            )]),
            Yield::thunk(|_, done| done.ok(json!("recovered"))),
        ],
        true,
    );
    let result = run_detached(stage.boxed(), vec![]).await.unwrap();
    assert_eq!(
        result,
        json!([{"caught": r#"rejected with {"status":500}"#}, "recovered"])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn independent_runs_interleave_on_a_threaded_runtime() {
    init_tracing();

    let slow = |label: &'static str, delay: u64| {
        recorder(
            vec![Yield::thunk(move |_, done| {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    done.ok(json!(label));
                });
            })],
            false,
        )
    };

    let first = tokio::spawn(run_detached(slow("first", 20).boxed(), vec![]));
    let second = tokio::spawn(run_detached(slow("second", 1).boxed(), vec![]));

    assert_eq!(first.await.unwrap().unwrap(), json!(["first"]));
    assert_eq!(second.await.unwrap().unwrap(), json!(["second"]));
}

#[tokio::test]
async fn nested_coroutines_settle_to_their_results() {
    init_tracing();

    let inner = recorder(vec![Yield::future(async { Ok(json!("deep")) })], false);
    let outer = recorder(
        vec![Yield::sequence([
            Yield::coroutine(inner),
            Yield::Factory(Factory::new(|_, _| Started::Value(json!("plain")))),
        ])],
        false,
    );
    let result = run_detached(outer.boxed(), vec![]).await.unwrap();
    assert_eq!(result, json!([[["deep"], "plain"]]));
}

#[tokio::test]
async fn nested_coroutine_error_reaches_parent_fail() {
    init_tracing();

    let mut inner = Some(from_fn(|_: Resume| -> Resumed { Err(Error::msg("inner boom")) }));
    let outer = from_fn(move |resume: Resume| -> Resumed {
        if let Some(inner) = inner.take() {
            return Ok(Step::Suspended(Yield::coroutine(inner)));
        }
        match resume {
            Ok(value) => Ok(Step::Finished(value)),
            Err(error) => Ok(Step::Finished(json!(format!("caught {error}")))),
        }
    });
    let result = run_detached(outer.boxed(), vec![]).await.unwrap();
    assert_eq!(result, json!("caught inner boom"));
}
