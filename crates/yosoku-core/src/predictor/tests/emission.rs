//! Emission-stage rules: filter drops, trivial matches, aggressive
//! suggestions.

use super::*;
use crate::filter::WordSetFilter;
use crate::predictor::INFINITY_COST;
use crate::settings::settings;

fn filtered_stack() -> TestStack {
    TestStack {
        dictionary: MockDictionary::new(vec![
            (
                "きんく".to_string(),
                vec![token("きんく", "禁句", 4000, 10, 10)],
            ),
            (
                "きんくかも".to_string(),
                vec![token("きんくかも", "禁句かも", 4200, 10, 10)],
            ),
        ]),
        filter: WordSetFilter::new(["禁句かも"]),
        ..TestStack::default()
    }
}

#[test]
fn filtered_value_is_dropped_off_key() {
    let stack = filtered_stack();
    let mut segments = make_segments(RequestType::Suggestion, "きんく");
    stack
        .predictor()
        .predict_for_request(&ConversionRequest::default(), &mut segments);

    let values = emitted_values(&segments);
    assert!(values.contains(&"禁句".to_string()));
    assert!(!values.contains(&"禁句かも".to_string()));
}

#[test]
fn filtered_value_survives_on_exact_key() {
    let stack = filtered_stack();
    let mut segments = make_segments(RequestType::Suggestion, "きんくかも");
    stack
        .predictor()
        .predict_for_request(&ConversionRequest::default(), &mut segments);

    assert!(emitted_values(&segments).contains(&"禁句かも".to_string()));
}

#[test]
fn mixed_conversion_demotes_filtered_value_instead_of_dropping() {
    let stack = filtered_stack();
    let mut request = ConversionRequest::default();
    request.request.mixed_conversion = true;

    let mut segments = make_segments(RequestType::Suggestion, "きんく");
    stack.predictor().predict_for_request(&request, &mut segments);

    let filtered = candidate_by_value(&segments, "禁句かも").expect("demoted, not dropped");
    let clean = candidate_by_value(&segments, "禁句").unwrap();
    assert!(filtered.cost >= clean.cost + settings().cost.bad_suggestion_penalty);
}

#[test]
fn suggestion_equal_to_typed_key_is_dropped() {
    let stack = TestStack {
        dictionary: MockDictionary::new(vec![(
            "かな".to_string(),
            vec![
                token("かな", "かな", 3000, 10, 10),
                token("かな", "仮名", 3500, 10, 10),
            ],
        )]),
        ..TestStack::default()
    };
    let mut segments = make_segments(RequestType::Prediction, "かな");
    stack
        .predictor()
        .predict_for_request(&ConversionRequest::default(), &mut segments);

    let values = emitted_values(&segments);
    assert!(!values.contains(&"かな".to_string()));
    assert!(values.contains(&"仮名".to_string()));
}

#[test]
fn aggressive_suggestion_is_suppressed() {
    // A short query with many long, costly sentence completions: the long
    // ones are forced to the infinity sentinel and never emitted.
    let mut entries = vec![(
        "ただしい".to_string(),
        vec![token("ただしい", "正しい", 3000, 10, 10)],
    )];
    for i in 0..12 {
        let key = format!("ただしいけめんにかぎる{i:02}");
        entries.push((
            key.clone(),
            vec![token(&key, &format!("正しいイケメンに限る{i:02}"), 6000, 10, 10)],
        ));
    }
    let stack = TestStack {
        dictionary: MockDictionary::new(entries),
        ..TestStack::default()
    };

    let mut segments = make_segments(RequestType::Suggestion, "ただしい");
    segments.max_prediction_candidates = 30;
    stack
        .predictor()
        .predict_for_request(&ConversionRequest::default(), &mut segments);

    let values = emitted_values(&segments);
    assert_eq!(values, vec!["正しい".to_string()]);
    for candidate in segments.conversion_segment(0).unwrap().candidates() {
        assert!(candidate.cost < INFINITY_COST);
    }
}

#[test]
fn prediction_mode_does_not_suppress_long_completions() {
    let mut entries = vec![(
        "ただしい".to_string(),
        vec![token("ただしい", "正しい", 3000, 10, 10)],
    )];
    for i in 0..12 {
        let key = format!("ただしいけめんにかぎる{i:02}");
        entries.push((
            key.clone(),
            vec![token(&key, &format!("正しいイケメンに限る{i:02}"), 6000, 10, 10)],
        ));
    }
    let stack = TestStack {
        dictionary: MockDictionary::new(entries),
        ..TestStack::default()
    };

    let mut segments = make_segments(RequestType::Prediction, "ただしい");
    segments.max_prediction_candidates = 30;
    stack
        .predictor()
        .predict_for_request(&ConversionRequest::default(), &mut segments);

    assert!(emitted_values(&segments).len() > 1);
}
