use verity_core::prelude::*;
use verity_result::ResultPayload;
use verity_test_utils::{failure, interactive_engine};

#[test]
fn test_wrapping_registers_promise_and_passes_through() {
    let engine = interactive_engine();
    let check = engine
        .accuracy()
        .apply(TestFn::nullary("auc", || Ok::<_, anyhow::Error>(0.88)));

    assert_eq!(engine.report().pending_promises(), 1);

    // direct calls bypass capture
    let outcome = check.call(()).unwrap();
    assert_eq!(outcome.payload(), &ResultPayload::Number(0.88));
    assert!(engine.report().results().is_empty());
}

#[test]
fn test_execution_captures_each_promise_once() {
    let engine = interactive_engine();
    let _auc = engine
        .accuracy()
        .description("area under curve")
        .apply(TestFn::nullary("auc", || Ok::<_, anyhow::Error>(0.88)));

    let results = engine.execute_promises();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].key(), "auc");
    assert_eq!(results[0].description(), "area under curve");
    assert_eq!(results[0].success(), Some(true));
    assert_eq!(engine.report().results(), results);

    // registry is drained
    assert_eq!(engine.report().pending_promises(), 0);
    assert!(engine.execute_promises().is_empty());
}

#[test]
fn test_failures_are_isolated() {
    let engine = interactive_engine();
    let _p1 = engine
        .unit()
        .apply(TestFn::nullary("p1", || Err::<f64, _>(failure("boom"))));
    let _p2 = engine
        .unit()
        .apply(TestFn::nullary("p2", || Ok::<_, anyhow::Error>(1.0)));

    let results = engine.execute_promises();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0].key(), "p1");
    assert_eq!(results[0].success(), Some(false));
    let error = results[0].result().as_error().unwrap();
    assert_eq!(error.kind, "error");
    assert_eq!(error.message, "boom");

    assert_eq!(results[1].key(), "p2");
    assert_eq!(results[1].success(), Some(true));
    assert_eq!(results[1].result(), &ResultPayload::Number(1.0));
}

#[test]
fn test_panics_are_isolated() {
    let engine = interactive_engine();
    let _p1 = engine
        .unit()
        .apply(TestFn::nullary("explodes", || -> anyhow::Result<f64> {
            panic!("division by zero")
        }));
    let _p2 = engine
        .unit()
        .apply(TestFn::nullary("fine", || Ok::<_, anyhow::Error>(true)));

    let results = engine.execute_promises();
    assert_eq!(results.len(), 2);
    let error = results[0].result().as_error().unwrap();
    assert_eq!(error.kind, "panic");
    assert!(error.message.contains("division by zero"));
    assert_eq!(results[1].success(), Some(true));
}

#[test]
fn test_stacked_labels_merge_into_one_promise() {
    let engine = interactive_engine();
    let inner = engine
        .label([TestLabel::Fairness, TestLabel::Bias])
        .apply(TestFn::nullary("gap", || Ok::<_, anyhow::Error>(0.1)));
    let _outer = engine
        .label([TestLabel::Bias, TestLabel::Accountability])
        .name("named_gap")
        .description("outer description")
        .apply(inner);

    assert_eq!(engine.report().pending_promises(), 1);
    let results = engine.execute_promises();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].labels().to_strings(),
        vec!["fairness", "bias", "accountability"]
    );
    assert_eq!(results[0].key(), "named_gap");
    assert_eq!(results[0].description(), "outer description");
}

#[test]
fn test_same_named_checks_stay_separate() {
    let engine = interactive_engine();
    let first = engine
        .fairness()
        .apply(TestFn::nullary("check", || Ok::<_, anyhow::Error>(1.0)));
    let second = engine
        .accuracy()
        .apply(TestFn::nullary("check", || Ok::<_, anyhow::Error>(2.0)));

    assert_ne!(first.function_id(), second.function_id());
    assert_eq!(engine.report().pending_promises(), 2);

    let results = engine.execute_promises();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].key(), "check");
    assert_eq!(results[0].labels().to_strings(), vec!["fairness"]);
    assert_eq!(results[0].result(), &ResultPayload::Number(1.0));
    assert_eq!(results[1].key(), "check");
    assert_eq!(results[1].labels().to_strings(), vec!["accuracy"]);
    assert_eq!(results[1].result(), &ResultPayload::Number(2.0));
}

#[test]
fn test_stacked_layers_share_identity() {
    let engine = interactive_engine();
    let inner = engine
        .unit()
        .apply(TestFn::nullary("smoke", || Ok::<_, anyhow::Error>(())));
    let inner_id = inner.function_id().clone();
    let outer = engine.integration().apply(inner);

    assert_eq!(outer.function_id(), &inner_id);
    assert_eq!(inner_id.name(), "smoke");
    assert_eq!(engine.report().pending_promises(), 1);
}

#[test]
fn test_first_supplied_key_wins() {
    let engine = interactive_engine();
    let inner = engine
        .unit()
        .name("first")
        .apply(TestFn::nullary("check", || Ok::<_, anyhow::Error>(())));
    let _outer = engine.integration().name("second").apply(inner);

    let results = engine.execute_promises();
    assert_eq!(results[0].key(), "first");
}

#[test]
fn test_promise_runs_with_default_arguments() {
    let engine = interactive_engine();
    let _check = engine.accuracy().apply(TestFn::new("threshold", |t: f64| {
        Ok::<_, anyhow::Error>(t == 0.0)
    }));

    let results = engine.execute_promises();
    assert_eq!(results[0].result(), &ResultPayload::Bool(true));
}

#[test]
fn test_promise_returning_result_merges_labels() {
    let engine = interactive_engine();
    let _check = engine.fairness().apply(TestFn::nullary("prebuilt", || {
        Ok::<_, anyhow::Error>(TestResult::new("inner", TestLabel::Unit.into(), 0.5, "inner desc"))
    }));

    let results = engine.execute_promises();
    assert_eq!(results[0].key(), "prebuilt");
    assert_eq!(results[0].labels().to_strings(), vec!["fairness", "unit"]);
    assert_eq!(results[0].description(), "inner desc");
    assert_eq!(results[0].success(), Some(true));
}
