//! End-to-end resolution through environment-variable directory overrides.
//!
//! These tests drive the public API the way an embedding application would:
//! tier directories are redirected via `{PREFIX}_*` variables and the
//! configurator discovers, reads, and merges the files on its own.

use anyhow::{Context, Result};
use rstest::rstest;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use test_helpers::env as test_env;
use tiered_config::Configurator;

const APP: &str = "moapp";
const PREFIX: &str = "MOAPP";

struct TierDirs {
    root: TempDir,
    guards: Vec<test_env::EnvVarGuard>,
}

/// Creates system/user/local directories under one temp root and points the
/// `{PREFIX}_*` overrides at them.
fn tier_dirs() -> Result<TierDirs> {
    let root = TempDir::new().context("create temp root")?;
    let mut guards = Vec::new();
    for (key, sub) in [
        ("SYSTEM_CONFIG", "system"),
        ("USER_CONFIG", "user"),
        ("LOCAL_CONFIG", "local"),
    ] {
        let dir = root.path().join(sub);
        std::fs::create_dir_all(&dir).context("create tier dir")?;
        guards.push(test_env::set_var(format!("{PREFIX}_{key}"), &dir));
    }
    // Flag variables must not leak in from the host environment.
    for key in [
        "UPDATE_CFG_AT_INIT",
        "SYSTEM_OVERRIDE",
        "LOCAL_FILE_READ",
        "LOCAL_FILE_HIDDEN",
        "EXTENSION",
    ] {
        guards.push(test_env::remove_var(format!("{PREFIX}_{key}")));
    }
    Ok(TierDirs { root, guards })
}

impl TierDirs {
    /// Writes a file under the given tier subdirectory, creating parents.
    fn write(&self, tier: &str, relative: &str, contents: &str) -> Result<()> {
        let path = self.root.path().join(tier).join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("create parent")?;
        }
        std::fs::write(path, contents).context("write tier file")
    }
}

#[rstest]
#[serial]
fn three_tiers_merge_with_local_highest() -> Result<()> {
    let dirs = tier_dirs()?;
    dirs.write("system", &format!("{APP}/{APP}.yml"), "k: system\nsys: 1\n")?;
    dirs.write("user", &format!("{APP}/{APP}.yml"), "k: user\nusr: 2\n")?;
    dirs.write("local", &format!(".{APP}.yml"), "k: local\nloc: 3\n")?;

    let cfg = Configurator::builder(APP).build().expect("all tiers valid");
    assert_eq!(cfg.obj().get("k"), Some(&json!("local")));
    assert_eq!(cfg.obj().get("sys"), Some(&json!(1)));
    assert_eq!(cfg.obj().get("usr"), Some(&json!(2)));
    assert_eq!(cfg.obj().get("loc"), Some(&json!(3)));
    drop(dirs.guards);
    Ok(())
}

#[rstest]
#[serial]
fn environment_qualifier_segments_system_and_user_paths() -> Result<()> {
    let dirs = tier_dirs()?;
    dirs.write("system", &format!("{APP}/prod/{APP}.yml"), "where: sys-prod\n")?;
    dirs.write("user", &format!("{APP}/prod/9.1/{APP}.yml"), "who: usr-prod\n")?;

    let cfg = Configurator::builder(APP)
        .environment("prod")
        .version("9.1")
        .build()
        .expect("qualified tiers valid");
    assert_eq!(cfg.obj().get("where"), Some(&json!("sys-prod")));
    assert_eq!(cfg.obj().get("who"), Some(&json!("usr-prod")));
    drop(dirs.guards);
    Ok(())
}

#[rstest]
#[serial]
fn hidden_local_naming_follows_the_flag() -> Result<()> {
    let dirs = tier_dirs()?;
    let hidden = Configurator::builder(APP).build().expect("build hidden");
    assert!(hidden.local().location().ends_with(&format!(".{APP}.yml")));

    let plain = Configurator::builder(APP)
        .hidden_local(false)
        .build()
        .expect("build plain");
    assert!(plain.local().location().ends_with(&format!("/{APP}.yml")));
    drop(dirs.guards);
    Ok(())
}

#[rstest]
#[serial]
fn system_override_env_var_flips_precedence() -> Result<()> {
    let dirs = tier_dirs()?;
    dirs.write("system", &format!("{APP}/{APP}.yml"), "k: system\n")?;
    dirs.write("local", &format!(".{APP}.yml"), "k: local\nonly: here\n")?;
    let flag = test_env::set_var(format!("{PREFIX}_SYSTEM_OVERRIDE"), "1");

    let cfg = Configurator::builder(APP).build().expect("tiers valid");
    assert_eq!(cfg.obj().get("k"), Some(&json!("system")));
    assert_eq!(cfg.obj().get("only"), Some(&json!("here")));
    drop(flag);
    drop(dirs.guards);
    Ok(())
}

#[rstest]
#[serial]
fn extension_env_var_changes_the_filename() -> Result<()> {
    let dirs = tier_dirs()?;
    dirs.write("user", &format!("{APP}/{APP}.cfg"), "ext: cfg\n")?;
    let flag = test_env::set_var(format!("{PREFIX}_EXTENSION"), "cfg");

    let cfg = Configurator::builder(APP).build().expect("cfg tier valid");
    assert_eq!(cfg.filename(), format!("{APP}.cfg"));
    assert_eq!(cfg.obj().get("ext"), Some(&json!("cfg")));
    drop(flag);
    drop(dirs.guards);
    Ok(())
}
