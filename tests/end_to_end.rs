use std::path::Path;

use d3join::{run_pipeline, PipelineConfig, PipelineError};

const SLEEP: &str = "\
Unnamed: 0,Person ID,Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Stress Level
0,7,m,30,Nurse,6.5,6,8
1,8,Female,40,\"Engineer, Senior\",8,9,3
2,9,x,35,Teacher,7,7,5
3,,f,50,NA,5,4,7
4,8,fem,45,Doctor,7.5,8,4
";

const PERFORMANCE: &str = "\
Employee_ID,Gender,Age,Department,Performance_Score
7,Female,31,IT,80
8,Male,41,HR,1
8,Male,41,HR,\"1,000\"
10,Male,22,Ops,60
";

fn write_inputs(dir: &Path) -> PipelineConfig {
    let sleep_path = dir.join("sleep.csv");
    let performance_path = dir.join("performance.csv");
    std::fs::write(&sleep_path, SLEEP).unwrap();
    std::fs::write(&performance_path, PERFORMANCE).unwrap();

    PipelineConfig {
        sleep_path,
        performance_path,
        out_dir: dir.join("out"),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_pipeline_writes_joined_csv_and_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());

    let result = run_pipeline(&config).await.unwrap();

    assert_eq!(result.rows_written, 3);
    assert_eq!(result.missing_key, 1);
    assert_eq!(result.unmatched, 1);

    let csv = std::fs::read_to_string(dir.path().join("out/joined_for_d3.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Person ID,Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Stress Level,person_id,\
Employee_ID,Department,Performance_Score,Sleep Duration_norm,Quality of Sleep_norm,\
Stress Level_norm,Performance_Score_norm,Age_norm"
    );
    assert_eq!(lines[1], "7,Male,30,Nurse,6.5,6,8,7,7,IT,80,0,0,1,0,0");
    assert_eq!(
        lines[2],
        "8,Female,40,\"Engineer, Senior\",8,9,3,8,8,HR,1000,1,1,0,1,0.6666666666666666"
    );
    assert_eq!(lines[3], "8,Female,45,Doctor,7.5,8,4,8,8,HR,1000,0.6666666666666666,0.6666666666666666,0.2,1,1");

    let log: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("out/transform_log.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        log["steps"],
        serde_json::json!(["dropUnnamed", "standardize", "join", "normalize"])
    );
    assert_eq!(log["ranges"]["Age"], serde_json::json!({"min": 30, "max": 45}));
    assert_eq!(
        log["ranges"]["Performance_Score"],
        serde_json::json!({"min": 80, "max": 1000})
    );
}

#[tokio::test]
async fn test_missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = write_inputs(dir.path());
    config.performance_path = dir.path().join("missing.csv");

    let err = run_pipeline(&config).await.unwrap_err();

    assert!(matches!(err, PipelineError::Io { .. }));
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn test_malformed_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(dir.path());
    std::fs::write(&config.sleep_path, "Person ID,Gender\n1,\"unterminated\n").unwrap();

    let err = run_pipeline(&config).await.unwrap_err();

    assert!(matches!(err, PipelineError::Parse { ref name, .. } if name == "sleep.csv"));
    assert!(!dir.path().join("out").exists());
}
