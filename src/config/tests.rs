use super::*;
use serial_test::serial;
use std::env;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_shelfrank_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SHELFRANK_QDRANT_URL");
        env::remove_var("SHELFRANK_COLLECTION");
        env::remove_var("SHELFRANK_OLLAMA_URL");
        env::remove_var("SHELFRANK_EMBED_MODEL");
        env::remove_var("SHELFRANK_EMBED_DIM");
        env::remove_var("SHELFRANK_CHAT_MODEL");
        env::remove_var("SHELFRANK_K");
        env::remove_var("SHELFRANK_FETCH_SIZE");
        env::remove_var("SHELFRANK_RATING_BOOST");
        env::remove_var("SHELFRANK_DNF_PENALTY");
        env::remove_var("SHELFRANK_REQUEST_TIMEOUT_SECS");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.qdrant_url, "http://localhost:6334");
    assert_eq!(config.collection, "reading_history");
    assert_eq!(config.ollama_url, "http://localhost:11434");
    assert_eq!(config.embed_model, "nomic-embed-text");
    assert_eq!(config.embed_dim, 768);
    assert_eq!(config.chat_model, "llama3.1");
    assert_eq!(config.k, 5);
    assert_eq!(config.fetch_size, 20);
    assert_eq!(config.rating_boost, 0.3);
    assert_eq!(config.dnf_penalty, 0.4);
    assert_eq!(config.request_timeout(), Duration::from_secs(60));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_shelfrank_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_shelfrank_env();

    with_env_vars(
        &[
            ("SHELFRANK_QDRANT_URL", "http://qdrant:6334"),
            ("SHELFRANK_COLLECTION", "books"),
            ("SHELFRANK_K", "3"),
            ("SHELFRANK_FETCH_SIZE", " 40 "),
            ("SHELFRANK_RATING_BOOST", "0.5"),
            ("SHELFRANK_DNF_PENALTY", "1"),
            ("SHELFRANK_CHAT_MODEL", "gpt-4o-mini"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.qdrant_url, "http://qdrant:6334");
            assert_eq!(config.collection, "books");
            assert_eq!(config.k, 3);
            assert_eq!(config.fetch_size, 40);
            assert_eq!(config.rating_boost, 0.5);
            assert_eq!(config.dnf_penalty, 1.0);
            assert_eq!(config.chat_model, "gpt-4o-mini");
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_string_uses_default() {
    clear_shelfrank_env();

    with_env_vars(&[("SHELFRANK_EMBED_MODEL", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.embed_model, "nomic-embed-text");
    });
}

#[test]
#[serial]
fn test_from_env_malformed_k() {
    clear_shelfrank_env();

    with_env_vars(&[("SHELFRANK_K", "five")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::IntParseError {
                name: "SHELFRANK_K",
                ..
            }
        ));
        assert!(err.to_string().contains("five"));
    });
}

#[test]
#[serial]
fn test_from_env_negative_fetch_size_is_parse_error() {
    clear_shelfrank_env();

    with_env_vars(&[("SHELFRANK_FETCH_SIZE", "-1")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::IntParseError { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_malformed_weight() {
    clear_shelfrank_env();

    with_env_vars(&[("SHELFRANK_DNF_PENALTY", "lots")], || {
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::FloatParseError {
                name: "SHELFRANK_DNF_PENALTY",
                ..
            })
        ));
    });
}

#[test]
fn test_validate_zero_k() {
    let config = Config {
        k: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroCount {
            name: "SHELFRANK_K",
            value: 0
        })
    ));
}

#[test]
fn test_validate_zero_fetch_size() {
    let config = Config {
        fetch_size: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroCount { .. })
    ));
}

#[test]
fn test_validate_negative_weight() {
    let config = Config {
        rating_boost: -0.1,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeight {
            name: "SHELFRANK_RATING_BOOST",
            ..
        })
    ));
}

#[test]
fn test_validate_nan_weight() {
    let config = Config {
        dnf_penalty: f64::NAN,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidWeight { .. })
    ));
}

#[test]
fn test_validate_empty_url() {
    let config = Config {
        qdrant_url: String::new(),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyValue {
            name: "SHELFRANK_QDRANT_URL"
        })
    ));
}

#[test]
#[serial]
fn test_from_env_embed_dim() {
    clear_shelfrank_env();

    with_env_vars(&[("SHELFRANK_EMBED_DIM", "1024")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.embed_dim, 1024);
    });
}

#[test]
fn test_validate_zero_embed_dim() {
    let config = Config {
        embed_dim: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroCount {
            name: "SHELFRANK_EMBED_DIM",
            ..
        })
    ));
}
