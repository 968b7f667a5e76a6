//! End-to-end issuance through the library API.

use chrono::{DateTime, Utc};
use notiflux_token::core::CoreError;
use notiflux_token::{run, IssueError, Issuer, IssuerConfig, KeySource, Scope};
use notiflux_token_testkit::fixtures::keys;
use notiflux_token_testkit::generators::{signing_key, IssueParams};
use notiflux_token_testkit::{decode_payload_unverified, reference_verify, tamper_signature, TestFixture};
use p256::ecdsa::VerifyingKey;
use p256::pkcs8::{EncodePublicKey, LineEnding};
use proptest::prelude::*;

const HUNDRED_YEARS_SECS: i64 = 36_500 * 86_400;

fn config_for(fixture: &TestFixture) -> IssuerConfig {
    IssuerConfig {
        key_source: KeySource::Path(fixture.key_path()),
        ..IssuerConfig::default()
    }
}

fn run_to_string(config: IssuerConfig, scope: Scope, topic: &str) -> (String, notiflux_token::Token) {
    let mut out = Vec::new();
    let token = run(config, scope, topic, Utc::now(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), token)
}

#[test]
fn test_payload_contents_and_expiry() {
    let fixture = TestFixture::new();
    let before = Utc::now().timestamp();
    let (_, token) = run_to_string(config_for(&fixture), Scope::Broadcast, "weather.alerts");
    let after = Utc::now().timestamp();

    let claims = fixture.verify(token.as_str()).unwrap();
    assert_eq!(claims.sub, "notiflux");
    assert_eq!(claims.scope, Scope::Broadcast);
    assert_eq!(claims.topic, "weather.alerts");
    assert!(claims.exp >= before + HUNDRED_YEARS_SECS);
    assert!(claims.exp <= after + HUNDRED_YEARS_SECS);
}

#[test]
fn test_output_is_exactly_the_token() {
    let fixture = TestFixture::new();
    let (output, token) = run_to_string(config_for(&fixture), Scope::Subscribe, "news");
    assert_eq!(output, format!("{token}\n"));
}

#[test]
fn test_verbose_echo_precedes_token() {
    let fixture = TestFixture::new();
    let config = IssuerConfig {
        verbose: true,
        ..config_for(&fixture)
    };
    let (output, token) = run_to_string(config, Scope::Subscribe, "sensors.temp");

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("claims="));
    assert!(lines[0].contains("\"topic\":\"sensors.temp\""));
    assert!(lines[0].contains("\"scope\":\"subscribe\""));
    assert_eq!(lines[1], token.as_str());
}

#[test]
fn test_exact_expiry_with_fixed_clock() {
    let fixture = TestFixture::new();
    let issuer = Issuer::from_config(config_for(&fixture)).unwrap();
    let now = DateTime::from_timestamp(1_767_225_600, 0).unwrap();

    let issued = issuer.issue(Scope::Broadcast, "weather.alerts", now).unwrap();
    assert_eq!(issued.claims.exp, 4_920_825_600);
    assert_eq!(fixture.verify(issued.token.as_str()).unwrap(), issued.claims);
}

#[test]
fn test_custom_validity() {
    let fixture = TestFixture::new();
    let config = IssuerConfig {
        validity_days: 30,
        ..config_for(&fixture)
    };
    let now = Utc::now();
    let issued = Issuer::from_config(config).unwrap().issue(Scope::Broadcast, "t", now).unwrap();
    assert_eq!(issued.claims.exp, now.timestamp() + 30 * 86_400);
}

#[test]
fn test_tampered_signature_fails_verification() {
    let fixture = TestFixture::new();
    let (_, token) = run_to_string(config_for(&fixture), Scope::Broadcast, "t");

    for index in [0, 1, 31, 32, 63] {
        let tampered = tamper_signature(token.as_str(), index);
        assert!(
            fixture.verify(&tampered).is_err(),
            "flipping signature byte {index} must break verification"
        );
    }
}

#[test]
fn test_accepted_key_layouts() {
    let layouts = [
        ("pkcs8", keys::P256_PKCS8, keys::P256_PUBLIC),
        ("sec1", keys::P256_SEC1, keys::P256_PUBLIC),
        ("sec1 with parameters", keys::P256_WITH_PARAMS, keys::P256_WITH_PARAMS_PUBLIC),
    ];

    for (name, private_pem, public_pem) in layouts {
        let fixture = TestFixture::with_keys(private_pem, public_pem);
        let (_, token) = run_to_string(config_for(&fixture), Scope::Broadcast, name);
        let claims = fixture.verify(token.as_str()).unwrap();
        assert_eq!(claims.topic, name);
    }
}

#[test]
fn test_inline_base64_key() {
    let fixture = TestFixture::new();
    let config = IssuerConfig {
        key_source: KeySource::Base64(fixture.private_key_b64()),
        ..IssuerConfig::default()
    };
    let (_, token) = run_to_string(config, Scope::Subscribe, "inline");
    assert_eq!(fixture.verify(token.as_str()).unwrap().topic, "inline");
}

#[test]
fn test_missing_key_file() {
    let fixture = TestFixture::new();
    let config = IssuerConfig {
        key_source: KeySource::Path(fixture.missing_path()),
        ..IssuerConfig::default()
    };
    let mut out = Vec::new();
    let err = run(config, Scope::Broadcast, "t", Utc::now(), &mut out).unwrap_err();

    assert!(matches!(err, IssueError::KeyRead { .. }));
    assert!(err.to_string().contains("does-not-exist.pem"));
    assert!(out.is_empty());
}

#[test]
fn test_rejected_keys_produce_no_token() {
    let rejected = [
        ("wrong curve", keys::P384_PKCS8),
        ("rsa", keys::RSA_PKCS8),
        ("public key", keys::P256_PUBLIC),
        ("garbage", "this is not PEM"),
    ];

    for (name, contents) in rejected {
        let fixture = TestFixture::new();
        let path = fixture.write_file("bad.pem", contents);
        let config = IssuerConfig {
            key_source: KeySource::Path(path),
            ..IssuerConfig::default()
        };

        let mut out = Vec::new();
        let err = run(config, Scope::Broadcast, "t", Utc::now(), &mut out).unwrap_err();
        assert!(
            matches!(err, IssueError::Crypto(CoreError::InvalidPrivateKey(_))),
            "{name}: unexpected error {err:?}"
        );
        assert!(out.is_empty(), "{name}: wrote output");
    }
}

#[test]
fn test_tokens_from_other_key_do_not_verify() {
    let fixture = TestFixture::new();
    let (_, token) = run_to_string(config_for(&fixture), Scope::Broadcast, "t");
    assert!(reference_verify(token.as_str(), keys::OTHER_P256_PUBLIC).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_round_trip(params: IssueParams) {
        let fixture = TestFixture::new();
        let issuer = Issuer::from_config(config_for(&fixture)).unwrap();

        let issued = issuer.issue(params.scope, &params.topic, params.now).unwrap();
        prop_assert_eq!(&issued.claims, &params.claims());
        prop_assert_eq!(decode_payload_unverified(issued.token.as_str()), Some(params.claims()));
        prop_assert_eq!(issued.claims.exp, params.now.timestamp() + HUNDRED_YEARS_SECS);
    }

    #[test]
    fn prop_any_key_verifies(key in signing_key(), params: IssueParams) {
        let public_pem = VerifyingKey::from(&key).to_public_key_pem(LineEnding::LF).unwrap();
        let issuer = Issuer::new(key.into(), IssuerConfig::default());

        let issued = issuer.issue(params.scope, &params.topic, Utc::now()).unwrap();
        let claims = reference_verify(issued.token.as_str(), &public_pem).unwrap();
        prop_assert_eq!(claims.topic, params.topic);
        prop_assert_eq!(claims.scope, params.scope);
    }
}
