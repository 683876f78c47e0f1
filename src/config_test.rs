use super::*;

#[test]
fn default_config_is_valid() {
  let config = HazardConfig::default();
  assert_eq!(config.validate(), Ok(()));
  assert_eq!(config.half_range(), 64);
}

#[test]
fn odd_or_zero_resolution_is_rejected() {
  assert_eq!(
    HazardConfig::default().with_resolution(0).validate(),
    Err(ConfigError::Resolution(0))
  );
  assert_eq!(
    HazardConfig::default().with_resolution(127).validate(),
    Err(ConfigError::Resolution(127))
  );
}

#[test]
fn non_positive_scalars_are_rejected() {
  assert_eq!(
    HazardConfig::default().with_cell_size(0.0).validate(),
    Err(ConfigError::CellSize(0.0))
  );
  assert_eq!(
    HazardConfig::default().with_time_cutoff(-1.0).validate(),
    Err(ConfigError::TimeCutoff(-1.0))
  );
  assert!(matches!(
    HazardConfig::default().with_cell_size(f32::NAN).validate(),
    Err(ConfigError::CellSize(_))
  ));
}

#[test]
fn edge_must_cover_grid_extent() {
  // 128 cells of 10 units: the diagonal is ~1810, longer than the default edge.
  let config = HazardConfig::default().with_cell_size(10.0);
  match config.validate() {
    Err(ConfigError::EdgeTooShort { edge_length, required }) => {
      assert_eq!(edge_length, DEFAULT_EDGE_LENGTH);
      assert!(required > 1800.0 && required < 1820.0, "{}", required);
    }
    other => panic!("expected EdgeTooShort, got {:?}", other),
  }

  assert_eq!(config.with_edge_length(5000.0).validate(), Ok(()));
}

#[cfg(feature = "serde")]
#[test]
fn deserializes_with_defaults() {
  let config: HazardConfig =
    serde_json::from_str(r#"{ "resolution": 64, "time_cutoff": 2.5 }"#)
      .expect("config should parse");
  assert_eq!(
    config,
    HazardConfig::default().with_resolution(64).with_time_cutoff(2.5)
  );

  assert!(serde_json::from_str::<HazardConfig>(r#"{ "bogus": 1 }"#).is_err());
}
