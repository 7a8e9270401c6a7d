use hogrs_imgproc::{ExecutionStrategy, HistogramWeight, HogConfig};

#[test]
fn config_from_partial_json() -> Result<(), serde_json::Error> {
    let config: HogConfig = serde_json::from_str(r#"{ "bins": 9, "weight": "magnitude" }"#)?;
    assert_eq!(config.bins, 9);
    assert_eq!(config.cell_size, 32);
    assert_eq!(config.weight, HistogramWeight::Magnitude);
    assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
    Ok(())
}

#[test]
fn config_json_roundtrip() -> Result<(), serde_json::Error> {
    let config = HogConfig::new()
        .with_cell_size(8)
        .with_strategy(ExecutionStrategy::Fixed(4));
    let json = serde_json::to_string(&config)?;
    let parsed: HogConfig = serde_json::from_str(&json)?;
    assert_eq!(parsed, config);
    Ok(())
}

#[test]
fn config_json_zero_threads_fails_validation() -> Result<(), serde_json::Error> {
    let config: HogConfig = serde_json::from_str(r#"{ "strategy": { "Fixed": 0 } }"#)?;
    assert_eq!(config.strategy, ExecutionStrategy::Fixed(0));
    assert!(config.validate().is_err());
    Ok(())
}
