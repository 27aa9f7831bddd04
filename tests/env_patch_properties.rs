//! Property-based tests for `.env` patching
//!
//! - Setting a key twice gives the same file as setting it once
//! - Every line for the key carries the new value
//! - Lines for other keys survive in their original order

use igniter_migrate::converter::{format_env_value, set_env_value};
use proptest::prelude::*;

fn env_key() -> impl Strategy<Value = String> {
    "[A-C]{1,2}_[A-Z]{1,4}"
}

fn env_file() -> impl Strategy<Value = String> {
    prop::collection::vec(("[A-C]{1,2}_[A-Z]{1,4}", "[a-z0-9]{0,8}"), 0..8).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect()
    })
}

fn env_value() -> impl Strategy<Value = String> {
    "[ -~]{0,16}"
}

fn is_key_line(line: &str, key: &str) -> bool {
    line.strip_prefix(key).is_some_and(|rest| rest.starts_with('='))
}

proptest! {
    #[test]
    fn prop_set_is_idempotent(content in env_file(), key in env_key(), value in env_value()) {
        let once = set_env_value(&content, &key, &value);
        let twice = set_env_value(&once, &key, &value);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_key_lines_carry_new_value(content in env_file(), key in env_key(), value in env_value()) {
        let patched = set_env_value(&content, &key, &value);
        let expected = format!("{}={}", key, format_env_value(&value));
        let lines: Vec<_> = patched.lines().filter(|l| is_key_line(l, &key)).collect();
        prop_assert!(!lines.is_empty());
        prop_assert!(lines.iter().all(|l| *l == expected));
    }

    #[test]
    fn prop_other_lines_are_preserved(content in env_file(), key in env_key(), value in env_value()) {
        let patched = set_env_value(&content, &key, &value);
        let others = |text: &str| -> Vec<String> {
            text.lines()
                .filter(|l| !is_key_line(l, &key))
                .map(str::to_string)
                .collect()
        };
        prop_assert_eq!(others(&content), others(&patched));
        prop_assert!(patched.ends_with('\n'));
    }
}
