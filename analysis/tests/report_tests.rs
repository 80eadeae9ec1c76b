use std::collections::BTreeMap;

use analysis::report::AnalysisReport;
use analysis::sweep::CycleResult;

fn one_pair_report(key: &str) -> AnalysisReport {
    let mut pairs = BTreeMap::new();
    pairs.insert(
        key.to_string(),
        vec![CycleResult {
            open: 5.0,
            close: 1.0,
            cycles: 7,
        }],
    );
    AnalysisReport::new(pairs)
}

#[test]
fn json_field_names_match_reader_contract() {
    let report = one_pair_report("AAA-BBB");

    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

    let generated_at = json["generated_at"].as_str().unwrap();
    assert!(generated_at.ends_with('Z'));
    assert_eq!(generated_at.len(), "2024-01-01T00:00:00Z".len());

    let rec = &json["pairs"]["AAA-BBB"][0];
    assert_eq!(rec["open"], 5.0);
    assert_eq!(rec["close"], 1.0);
    assert_eq!(rec["cycles"], 7);
}

#[test]
fn save_fully_replaces_any_previous_report() {
    let path = std::env::temp_dir().join(format!("report_replace_{}.json", std::process::id()));

    one_pair_report("AAA-BBB").save(&path).unwrap();
    one_pair_report("CCC-DDD").save(&path).unwrap();

    let loaded = AnalysisReport::load(&path).unwrap();
    assert!(!loaded.pairs.contains_key("AAA-BBB"));
    assert!(loaded.pairs.contains_key("CCC-DDD"));

    let _ = std::fs::remove_file(&path);
}
