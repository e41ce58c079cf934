//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global mutex and returns an RAII guard that
//! restores the previous state when dropped (removing the variable if it was
//! previously absent). Guards for the same key restore in LIFO order; tests
//! that mutate overlapping keys across threads should additionally serialise
//! themselves (for example with `serial_test`).
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("KEY", "VALUE");
//! // `KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::Mutex;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
#[derive(Debug)]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        if let Some(value) = self.original.take() {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            unsafe { env::set_var(&self.key, &value) };
        } else {
            // SAFETY: `ENV_MUTEX` is held during restoration.
            unsafe { env::remove_var(&self.key) };
        }
    }
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// Mutates process-wide state; access is serialised by a global mutex during
/// the mutation and again during restoration.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `ENV_MUTEX` is held by `mutate` while the variable changes.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
///
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `ENV_MUTEX` is held by `mutate` while the variable changes.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}
