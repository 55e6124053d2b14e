use super::*;

#[test]
fn defaults_match_the_classic_tool() {
    let p = TraceParams::default();
    assert_eq!((p.black, p.white), (30, 230));
    assert_eq!(p.jump_period, 100);
    assert_eq!(p.search_distance, 30);
    assert_eq!(p.mode, SamplingMode::Normal);
    p.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let p = TraceParams::from_json_str(r#"{ "target_count": 123, "mode": 4, "invert": true }"#)
        .unwrap();
    assert_eq!(p.target_count, 123);
    assert_eq!(p.mode, SamplingMode::ScrollingGrid { period_log2: 2 });
    assert!(p.invert);
    assert_eq!(p.black, 30);
}

#[test]
fn json_rejects_unknown_fields_and_bad_values() {
    assert!(TraceParams::from_json_str(r#"{ "targt_count": 1 }"#).is_err());
    let err = TraceParams::from_json_str(r#"{ "black": 200, "white": 100 }"#).unwrap_err();
    assert!(err.to_string().contains("validation error"));
}

#[test]
fn from_path_reads_json_and_names_missing_files() {
    let dir = std::env::temp_dir().join(format!("hilligoss_params_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("p.json");
    std::fs::write(&file, r#"{ "target_count": 100, "jump_period": 7 }"#).unwrap();

    let p = TraceParams::from_path(&file).unwrap();
    assert_eq!((p.target_count, p.jump_period), (100, 7));

    let err = TraceParams::from_path(&dir.join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("absent.json"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn validate_catches_zero_counts() {
    let p = TraceParams {
        target_count: 0,
        ..TraceParams::default()
    };
    assert!(p.validate().is_err());
    let p = TraceParams {
        jump_period: 0,
        ..TraceParams::default()
    };
    assert!(p.validate().is_err());
}

#[test]
fn output_len_counts_both_channels_and_border() {
    let p = TraceParams {
        target_count: 10,
        border_samples: 4,
        ..TraceParams::default()
    };
    assert_eq!(p.output_len(), 28);
    let wide = TraceParams {
        search_distance: 100_000,
        ..TraceParams::default()
    };
    assert_eq!(wide.effective_search_distance(), 512);
}
