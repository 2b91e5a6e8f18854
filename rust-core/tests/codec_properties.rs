//! Contract tests shared by all three strategies
//!
//! Note: extract() never returns Err. A missing or damaged message comes back
//! as Extraction::Failed.

use spectral_stego::{
    CoefficientConfig, Extraction, ExtractionFailure, FailureReason, Method, StegoCodec,
    StegoConfig, StegoError, Strategy,
};
use std::f64::consts::PI;

fn carrier(len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / 44_100.0;
            0.5 * (2.0 * PI * 523.25 * t).sin() + 0.2 * (2.0 * PI * 1_760.0 * t).cos()
        })
        .collect()
}

fn strategies() -> Vec<Strategy> {
    let config = StegoConfig::default();
    Method::ALL
        .into_iter()
        .map(|method| Strategy::new(method, &config).unwrap())
        .collect()
}

/// Channel length at which each default strategy offers exactly 32 slots
fn exact_fit_len(method: Method) -> usize {
    match method {
        Method::Dft => 2 * (2_000 + 32 * 2),
        Method::Dct => 32 * 1_024,
        Method::Dwt => 32 * 100 * 16,
    }
}

#[test]
fn test_capacity_boundary() {
    for strategy in strategies() {
        let method = strategy.method();
        let samples = carrier(exact_fit_len(method));
        assert_eq!(strategy.capacity(samples.len()), 32, "method {method}");

        // "Hi" is 16 bits + 16 marker bits
        let modified = strategy.embed(&samples, "Hi").unwrap();
        assert_eq!(modified.len(), samples.len());
        assert_eq!(strategy.extract(&modified).message(), Some("Hi"), "method {method}");

        let err = strategy.embed(&samples, "Hi!").unwrap_err();
        assert!(
            matches!(err, StegoError::Capacity { needed: 40, available: 32 }),
            "method {method}: {err}"
        );
    }
}

#[test]
fn test_empty_message() {
    let samples = carrier(120_000);
    for strategy in strategies() {
        let modified = strategy.embed(&samples, "").unwrap();
        assert_eq!(strategy.extract(&modified), Extraction::Recovered(String::new()));
    }
}

#[test]
fn test_latin1_round_trip() {
    let samples = carrier(200_000);
    for strategy in strategies() {
        let modified = strategy.embed(&samples, "café ñ").unwrap();
        assert_eq!(strategy.extract(&modified).message(), Some("café ñ"));
    }
}

#[test]
fn test_embedding_is_deterministic() {
    let samples = carrier(120_000);
    for strategy in strategies() {
        let first = strategy.embed(&samples, "same").unwrap();
        let second = strategy.embed(&samples, "same").unwrap();
        assert_eq!(first, second, "method {}", strategy.method());
    }
}

#[test]
fn test_input_is_not_modified() {
    // 120_000 samples give the default DWT 75 slots: up to 7 characters
    let samples = carrier(120_000);
    let before = samples.clone();
    for strategy in strategies() {
        let method = strategy.method();
        let modified = strategy.embed(&samples, "intact").unwrap();

        assert_ne!(modified, samples, "method {method}");
        assert_eq!(samples, before, "method {method}");
    }
}

#[test]
fn test_wide_characters_rejected() {
    let samples = carrier(120_000);
    for strategy in strategies() {
        let err = strategy.embed(&samples, "5€").unwrap_err();
        assert!(matches!(err, StegoError::Encoding { ch: '€', position: 1 }));
    }
}

#[test]
fn test_marker_inside_message_rejected() {
    let samples = carrier(120_000);
    for strategy in strategies() {
        // ÿ þ = 11111111 11111110, the end marker on a byte boundary
        let err = strategy.embed(&samples, "x\u{ff}\u{fe}y").unwrap_err();
        assert!(matches!(err, StegoError::MarkerCollision { position: 8 }));
    }
}

#[test]
fn test_short_channel_reports_failure() {
    for strategy in strategies() {
        let extraction = strategy.extract(&carrier(64));
        assert!(matches!(
            extraction,
            Extraction::Failed(ExtractionFailure {
                reason: FailureReason::ChannelTooShort,
                ..
            })
        ));
    }
}

#[test]
fn test_wrong_method_does_not_recover() {
    let samples = carrier(120_000);
    let config = StegoConfig::default();
    let dct = Strategy::new(Method::Dct, &config).unwrap();
    let dwt = Strategy::new(Method::Dwt, &config).unwrap();

    let modified = dct.embed(&samples, "only dct").unwrap();
    assert_ne!(dwt.extract(&modified).message(), Some("only dct"));
}

#[test]
fn test_config_override_changes_capacity() {
    let config = StegoConfig::from_json_str(r#"{ "coefficient": { "block_size": 256 } }"#).unwrap();
    assert_eq!(
        config.coefficient,
        CoefficientConfig {
            block_size: 256,
            ..Default::default()
        }
    );

    let strategy = Strategy::new(Method::Dct, &config).unwrap();
    let samples = carrier(256 * 100);
    assert_eq!(strategy.capacity(samples.len()), 100);

    let modified = strategy.embed(&samples, "256 blk").unwrap();
    assert_eq!(strategy.extract(&modified).message(), Some("256 blk"));
}

#[test]
fn test_invalid_config_rejected() {
    let err = StegoConfig::from_json_str(r#"{ "wavelet": { "subband_index": 9 } }"#).unwrap_err();
    assert!(matches!(err, StegoError::InvalidConfig(_)));

    let err = StegoConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, StegoError::Config(_)));
}
