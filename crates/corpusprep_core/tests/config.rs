use corpusprep_core::{parse_vocab_cap, ConfigError, PreprocessConfig, DEFAULT_VOCAB_CAP};

#[test]
fn default_config_does_not_build_a_vocabulary() {
    let config = PreprocessConfig::default();
    assert!(!config.lowercase);
    assert!(!config.build_vocabulary());
    assert!(PreprocessConfig::new(true).with_vocabulary(DEFAULT_VOCAB_CAP).build_vocabulary());
}

#[test]
fn vocab_cap_parsing_rejects_negative_and_garbage() {
    assert_eq!(parse_vocab_cap("40000"), Ok(40_000));
    assert_eq!(parse_vocab_cap(" 0 "), Ok(0));
    assert_eq!(parse_vocab_cap("-1"), Err(ConfigError::NegativeVocabCap(-1)));
    assert_eq!(
        parse_vocab_cap("lots"),
        Err(ConfigError::InvalidVocabCap("lots".to_string()))
    );
}
