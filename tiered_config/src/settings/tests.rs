//! Tests for flag resolution precedence: builder over environment over default.

use rstest::rstest;
use serial_test::serial;
use test_helpers::env as test_env;

use super::{Settings, SettingsOverrides, parse_flag};

#[rstest]
#[serial]
fn defaults_apply_without_environment_or_overrides() {
    let guards = [
        test_env::remove_var("FLAGAPP_EXTENSION"),
        test_env::remove_var("FLAGAPP_UPDATE_CFG_AT_INIT"),
        test_env::remove_var("FLAGAPP_SYSTEM_OVERRIDE"),
        test_env::remove_var("FLAGAPP_LOCAL_FILE_READ"),
        test_env::remove_var("FLAGAPP_LOCAL_FILE_HIDDEN"),
    ];
    let settings = Settings::resolve("FLAGAPP", SettingsOverrides::default());
    assert_eq!(settings.extension, "yml");
    assert!(settings.update_at_init);
    assert!(!settings.system_override);
    assert!(settings.load_local);
    assert!(settings.hidden_local);
    drop(guards);
}

#[rstest]
#[serial]
fn environment_overrides_defaults() {
    let _ext = test_env::set_var("FLAGAPP_EXTENSION", "json");
    let _ovr = test_env::set_var("FLAGAPP_SYSTEM_OVERRIDE", "yes");
    let _local = test_env::set_var("FLAGAPP_LOCAL_FILE_READ", "off");
    let settings = Settings::resolve("FLAGAPP", SettingsOverrides::default());
    assert_eq!(settings.extension, "json");
    assert!(settings.system_override);
    assert!(!settings.load_local);
}

#[rstest]
#[serial]
fn builder_overrides_beat_environment() {
    let _ext = test_env::set_var("FLAGAPP_EXTENSION", "json");
    let _ovr = test_env::set_var("FLAGAPP_SYSTEM_OVERRIDE", "true");
    let overrides = SettingsOverrides {
        extension: Some("cfg".to_owned()),
        system_override: Some(false),
        ..SettingsOverrides::default()
    };
    let settings = Settings::resolve("FLAGAPP", overrides);
    assert_eq!(settings.extension, "cfg");
    assert!(!settings.system_override);
}

#[rstest]
#[serial]
fn unrecognised_flag_value_falls_back_to_default() {
    let _guard = test_env::set_var("FLAGAPP_UPDATE_CFG_AT_INIT", "maybe");
    let settings = Settings::resolve("FLAGAPP", SettingsOverrides::default());
    assert!(settings.update_at_init);
}

#[rstest]
#[case("1", Some(true))]
#[case("TRUE", Some(true))]
#[case("Yes", Some(true))]
#[case("on", Some(true))]
#[case("0", Some(false))]
#[case("false", Some(false))]
#[case("NO", Some(false))]
#[case("off", Some(false))]
#[case(" true ", Some(true))]
#[case("2", None)]
#[case("enabled", None)]
fn parse_flag_recognises_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_flag(raw), expected);
}
