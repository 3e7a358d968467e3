//! Key to value lookup table produced by parsing

use std::any::Any;
use std::collections::HashMap;

use num_traits::{NumCast, ToPrimitive};

use crate::core::value::Value;
use crate::error::LookupError;

/// Parsed values keyed by each argument's canonical name
///
/// Inserting under a key that already exists overwrites the earlier entry;
/// the replaced value is handed back to the caller.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    entries: HashMap<String, Value>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` with an occurrence count of zero
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) -> Option<Value> {
        self.insert_value(key, Value::new(value))
    }

    /// Store `value` under `key` with the given occurrence count
    pub fn insert_with_count<T: Any + Send + Sync>(
        &mut self,
        key: impl Into<String>,
        value: T,
        count: u8,
    ) -> Option<Value> {
        self.insert_value(key, Value::with_count(value, count))
    }

    /// Store an already erased value, replacing any previous entry
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        let previous = self.entries.insert(key.clone(), value);
        if let Some(old) = &previous {
            tracing::trace!(key = %key, previous = old.type_name(), "overwrote result entry");
        }
        previous
    }

    /// The raw entry for `key`
    pub fn value(&self, key: &str) -> Result<&Value, LookupError> {
        self.entries
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound(key.to_string()))
    }

    pub fn get<T: Any + Clone>(&self, key: &str) -> Result<T, LookupError> {
        self.value(key)?.get::<T>()
    }

    pub fn get_ref<T: Any>(&self, key: &str) -> Result<&T, LookupError> {
        self.value(key)?.get_ref::<T>()
    }

    /// Read the entry as `T` and convert it numerically to `U`
    pub fn cast<T, U>(&self, key: &str) -> Result<U, LookupError>
    where
        T: Any + Copy + ToPrimitive,
        U: NumCast,
    {
        self.value(key)?.cast::<T, U>()
    }

    /// How many times the argument stored under `key` was supplied
    pub fn count(&self, key: &str) -> Result<u8, LookupError> {
        Ok(self.value(key)?.count())
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Truthiness of the entry; missing keys are false
    pub fn is_truthy(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(Value::is_truthy)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        let mut res = ResultTable::new();
        res.insert("integer", -32i32);
        res.insert_value("missing", Value::absent());
        res.insert("true", true);
        res.insert("false", false);
        res
    }

    #[test]
    fn test_insert_and_get() {
        let mut res = ResultTable::new();
        res.insert("k", 5i32);
        assert_eq!(res.get::<i32>("k"), Ok(5));
        assert_eq!(res.get_ref::<i32>("k"), Ok(&5));
    }

    #[test]
    fn test_missing_key() {
        let res = sample();
        assert_eq!(
            res.get::<i32>("nope"),
            Err(LookupError::KeyNotFound("nope".to_string()))
        );
        assert!(matches!(res.value("nope"), Err(LookupError::KeyNotFound(_))));
        assert!(matches!(res.count("nope"), Err(LookupError::KeyNotFound(_))));
    }

    #[test]
    fn test_wrong_type_is_not_key_not_found() {
        let res = sample();
        assert!(matches!(
            res.get::<String>("integer"),
            Err(LookupError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_truthiness_by_presence() {
        let res = sample();
        assert!(res.value("integer").unwrap().is_truthy());
        assert!(!res.value("missing").unwrap().is_truthy());
        assert!(res.value("true").unwrap().is_truthy());
        assert!(!res.value("false").unwrap().is_truthy());
        assert!(!res.is_truthy("never-inserted"));
        assert!(!res.has("never-inserted"));
    }

    #[test]
    fn test_has() {
        let res = sample();
        assert!(res.has("integer"));
        assert!(res.has("missing"));
        assert!(res.value("integer").unwrap().is_present());
        assert!(!res.value("missing").unwrap().is_present());
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut res = ResultTable::new();
        assert!(res.insert("k", 1u8).is_none());

        let previous = res.insert_with_count("k", "two".to_string(), 2).unwrap();
        assert_eq!(previous.get::<u8>(), Ok(1));
        assert_eq!(res.get::<String>("k").unwrap(), "two");
        assert_eq!(res.count("k"), Ok(2));
        assert_eq!(res.len(), 1);
    }

    #[test]
    fn test_count() {
        let mut res = ResultTable::new();
        res.insert_with_count("verbose", true, 3);
        res.insert("quiet", false);
        assert_eq!(res.count("verbose"), Ok(3));
        assert_eq!(res.count("quiet"), Ok(0));
    }

    #[test]
    fn test_cast_through_table() {
        let mut res = ResultTable::new();
        res.insert("ratio", 2.0f32);
        assert_eq!(res.cast::<f32, u64>("ratio"), Ok(2));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultTable>();

        let res = std::sync::Arc::new(sample());
        let handle = {
            let res = std::sync::Arc::clone(&res);
            std::thread::spawn(move || res.get::<i32>("integer"))
        };
        assert_eq!(handle.join().unwrap(), Ok(-32));
    }

    #[test]
    fn test_iteration() {
        let res = sample();
        let mut keys: Vec<_> = res.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["false", "integer", "missing", "true"]);
        assert_eq!(res.iter().count(), 4);
        assert!(!res.is_empty());
    }
}
