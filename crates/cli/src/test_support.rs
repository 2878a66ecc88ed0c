use std::sync::{Mutex, OnceLock};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Runs `run` with the given environment variables set (`Some`) or removed
/// (`None`), restoring their previous values afterwards.
///
/// Holds a process-wide lock for the whole body so parallel tests never
/// observe each other's environment.
pub(crate) fn with_env<R>(vars: &[(&str, Option<&str>)], run: impl FnOnce() -> R) -> R {
    let _guard = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        apply(key, *value);
    }
    let result = run();
    for (key, value) in &saved {
        apply(key, value.as_deref());
    }
    result
}

fn apply(key: &str, value: Option<&str>) {
    // SAFETY: env mutation only happens while `env_lock` is held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
