use verity_core::prelude::*;
use verity_result::ResultPayload;
use verity_test_utils::{failure, merging_engine, scripted_engine};

#[test]
fn test_each_call_captures_one_result() {
    let engine = scripted_engine();
    let accuracy = engine
        .accuracy()
        .description("holdout accuracy")
        .apply(TestFn::new("holdout_accuracy", |threshold: f64| {
            Ok::<_, anyhow::Error>(0.91 > threshold)
        }));

    accuracy.call(0.9).unwrap();
    accuracy.call(0.95).unwrap();

    let results = engine.report().results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].key(), "holdout_accuracy");
    assert_eq!(results[0].labels().to_strings(), vec!["accuracy"]);
    assert_eq!(results[0].description(), "holdout accuracy");
    assert_eq!(results[0].result(), &ResultPayload::Bool(true));
    assert_eq!(results[1].result(), &ResultPayload::Bool(false));
    assert!(results[0].success().is_none());
}

#[test]
fn test_supplied_name_overrides_declared_name() {
    let engine = scripted_engine();
    let check = engine
        .bias()
        .name("gender_gap")
        .apply(TestFn::nullary("compute_gap", || Ok::<_, anyhow::Error>(0.04)));

    let outcome = check.call(()).unwrap();
    let captured = outcome.into_result().unwrap();
    assert_eq!(captured.key(), "gender_gap");
    assert_eq!(engine.report().results()[0], captured);
}

#[test]
fn test_errors_propagate_without_capture() {
    let engine = scripted_engine();
    let check = engine
        .unit()
        .apply(TestFn::nullary("loads_data", || Err::<f64, _>(failure("missing column"))));

    let err = check.call(()).unwrap_err();
    assert_eq!(err.to_string(), "missing column");
    assert!(engine.report().results().is_empty());
}

#[test]
#[should_panic(expected = "index out of range")]
fn test_panics_propagate() {
    let engine = scripted_engine();
    let check = engine
        .unit()
        .apply(TestFn::nullary("panics", || -> anyhow::Result<f64> {
            panic!("index out of range")
        }));
    let _ = check.call(());
}

#[test]
fn test_stacked_combinators_capture_once() {
    let engine = scripted_engine();
    let inner = engine
        .fairness()
        .apply(TestFn::nullary("tpr_gap", || Ok::<_, anyhow::Error>(0.03)));
    let outer = engine.bias().apply(inner);

    let outcome = outer.call(()).unwrap();

    let results = engine.report().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].labels().to_strings(), vec!["fairness"]);
    assert_eq!(outcome.into_result().unwrap(), results[0]);
}

#[test]
fn test_check_returning_result_is_not_recaptured() {
    let engine = scripted_engine();
    let check = engine.accuracy().apply(TestFn::nullary("prebuilt", || {
        Ok::<_, anyhow::Error>(TestResult::new("custom", TestLabel::Unit.into(), 1.0, "built by hand"))
    }));

    let result = check.call(()).unwrap().into_result().unwrap();
    assert_eq!(result.key(), "custom");
    assert!(engine.report().results().is_empty());
}

#[test]
fn test_merge_mode_recaptures_with_outer_labels() {
    let engine = merging_engine();
    let inner = engine
        .fairness()
        .description("inner")
        .apply(TestFn::nullary("tpr_gap", || Ok::<_, anyhow::Error>(0.03)));
    let outer = engine.bias().name("outer_gap").apply(inner);

    outer.call(()).unwrap();

    let results = engine.report().results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].key(), "tpr_gap");
    assert_eq!(results[1].key(), "outer_gap");
    assert_eq!(results[1].labels().to_strings(), vec!["fairness", "bias"]);
    assert_eq!(results[1].description(), "inner");
}

#[test]
fn test_calling_directly_in_scripted_mode_registers_no_promise() {
    let engine = scripted_engine();
    let _check = engine
        .integration()
        .apply(TestFn::nullary("pipeline", || Ok::<_, anyhow::Error>(())));
    assert_eq!(engine.report().pending_promises(), 0);
}
