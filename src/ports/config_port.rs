//! Configuration access port trait.
//!
//! Section and key lookups are case-insensitive. Adapters only supply raw
//! string lookups; numeric parsing lives in the provided method.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Raw lookup that distinguishes a missing key from a malformed number.
    fn get_f64(&self, section: &str, key: &str) -> Option<Result<f64, String>> {
        self.get_string(section, key).map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| format!("{raw:?} is not a number: {e}"))
        })
    }
}
