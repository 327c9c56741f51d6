//! Configuration access port trait.

/// Typed lookups return `Ok(None)` for an absent key and `Err(reason)` when a
/// key is present but its value cannot be read as the requested type.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String>;
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, String>;
}
