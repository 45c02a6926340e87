//! Best-score and preference storage
//!
//! LocalStorage on the web. Absence is never an error: a missing or
//! unparsable best score reads as 0, missing settings read as defaults.
//! Native builds keep nothing.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// LocalStorage key for the best score
const BEST_SCORE_KEY: &str = "gapwing_best_score";

#[cfg(target_arch = "wasm32")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read the stored best score, defaulting to 0 when absent
#[cfg(target_arch = "wasm32")]
pub fn read_best() -> u32 {
    let Some(storage) = storage() else { return 0 };
    match storage.get_item(BEST_SCORE_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Store a new best score
#[cfg(target_arch = "wasm32")]
pub fn write_best(best: u32) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(BEST_SCORE_KEY, &best.to_string());
        log::info!("Best score saved: {}", best);
    } else {
        log::warn!("LocalStorage unavailable - best score not saved");
    }
}

/// Load a JSON-serialized value by key (settings and the like)
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// Save a JSON-serialized value by key
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    if let Some(storage) = storage() {
        if let Ok(json) = serde_json::to_string(value) {
            let _ = storage.set_item(key, &json);
        }
    }
}

// Native stubs - nothing persists outside the browser

#[cfg(not(target_arch = "wasm32"))]
pub fn read_best() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write_best(_best: u32) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_best_reads_as_zero() {
        assert_eq!(read_best(), 0);
    }

    #[test]
    fn test_absent_json_reads_as_none() {
        let loaded: Option<crate::Settings> = load_json("no_such_key");
        assert!(loaded.is_none());
    }
}
