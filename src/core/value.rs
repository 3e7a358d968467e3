//! Type-erased storage for a single parsed value
//!
//! A [`Value`] owns exactly one value of some concrete type together with an
//! occurrence count. The concrete type is forgotten at construction and only
//! recovered through a checked downcast, so asking for the wrong type is a
//! [`LookupError::TypeMismatch`] rather than a reinterpretation.

use std::any::{type_name, Any};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use num_traits::{NumCast, ToPrimitive};

use crate::error::LookupError;

/// Type name reported for a value that holds nothing
pub const ABSENT: &str = "<absent>";

/// One erased value plus the number of times it was supplied
#[derive(Clone)]
pub struct Value {
    payload: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
    count: u8,
}

impl Value {
    /// Wrap a value with an occurrence count of zero
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::with_count(value, 0)
    }

    /// Wrap a value with an explicit occurrence count
    pub fn with_count<T: Any + Send + Sync>(value: T, count: u8) -> Self {
        Self {
            payload: Some(Arc::new(value)),
            type_name: type_name::<T>(),
            count,
        }
    }

    /// A value that holds nothing
    ///
    /// Absent values are falsy and compare unequal to everything.
    pub fn absent() -> Self {
        Self {
            payload: None,
            type_name: ABSENT,
            count: 0,
        }
    }

    /// Same payload, different occurrence count
    pub(crate) fn counted(self, count: u8) -> Self {
        Self { count, ..self }
    }

    /// Borrow the payload as `T`
    pub fn get_ref<T: Any>(&self) -> Result<&T, LookupError> {
        self.payload
            .as_deref()
            .and_then(|payload| payload.downcast_ref::<T>())
            .ok_or(LookupError::TypeMismatch {
                expected: type_name::<T>(),
                found: self.type_name,
            })
    }

    /// Copy the payload out as `T`
    pub fn get<T: Any + Clone>(&self) -> Result<T, LookupError> {
        self.get_ref::<T>().cloned()
    }

    /// Read the payload as `T` and convert it numerically to `U`
    ///
    /// Fails with [`LookupError::CastFailed`] when the value does not fit in `U`.
    pub fn cast<T, U>(&self) -> Result<U, LookupError>
    where
        T: Any + Copy + ToPrimitive,
        U: NumCast,
    {
        let value = *self.get_ref::<T>()?;
        U::from(value).ok_or(LookupError::CastFailed {
            from: type_name::<T>(),
            to: type_name::<U>(),
        })
    }

    /// Number of times the value was supplied, fixed at construction
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Whether a payload is stored at all
    pub fn is_present(&self) -> bool {
        self.payload.is_some()
    }

    /// Name of the stored type, or [`ABSENT`]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Absent is false, a stored `bool` is itself, anything else is true
    pub fn is_truthy(&self) -> bool {
        match self.payload.as_deref() {
            None => false,
            Some(payload) => payload.downcast_ref::<bool>().copied().unwrap_or(true),
        }
    }

    pub fn equals<T: Any + PartialEq>(&self, rhs: &T) -> Result<bool, LookupError> {
        if !self.is_present() {
            return Ok(false);
        }
        Ok(self.get_ref::<T>()? == rhs)
    }

    pub fn not_equals<T: Any + PartialEq>(&self, rhs: &T) -> Result<bool, LookupError> {
        self.equals(rhs).map(|eq| !eq)
    }

    /// Native ordering of the payload against `rhs`
    ///
    /// Absent values have no ordering, so every relational helper below
    /// reports `false` for them. Use [`Value::is_present`] to test presence.
    pub fn compare<T: Any + PartialOrd>(&self, rhs: &T) -> Result<Option<Ordering>, LookupError> {
        if !self.is_present() {
            return Ok(None);
        }
        Ok(self.get_ref::<T>()?.partial_cmp(rhs))
    }

    pub fn lt<T: Any + PartialOrd>(&self, rhs: &T) -> Result<bool, LookupError> {
        Ok(matches!(self.compare(rhs)?, Some(Ordering::Less)))
    }

    pub fn le<T: Any + PartialOrd>(&self, rhs: &T) -> Result<bool, LookupError> {
        Ok(matches!(
            self.compare(rhs)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    pub fn gt<T: Any + PartialOrd>(&self, rhs: &T) -> Result<bool, LookupError> {
        Ok(matches!(self.compare(rhs)?, Some(Ordering::Greater)))
    }

    pub fn ge<T: Any + PartialOrd>(&self, rhs: &T) -> Result<bool, LookupError> {
        Ok(matches!(
            self.compare(rhs)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .field("count", &self.count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::new(-32i32).is_truthy());
        assert!(Value::new(true).is_truthy());
        assert!(!Value::new(false).is_truthy());
        assert!(!Value::absent().is_truthy());
        assert!(Value::new(String::new()).is_truthy());
    }

    #[test]
    fn test_presence() {
        assert!(Value::new(0u8).is_present());
        assert!(Value::new(false).is_present());
        assert!(!Value::absent().is_present());
    }

    #[test]
    fn test_get_matching_type() {
        let value = Value::new(-32i32);
        assert_eq!(value.get::<i32>(), Ok(-32));
        assert_eq!(value.get_ref::<i32>(), Ok(&-32));

        let value = Value::new("hello".to_string());
        assert_eq!(value.get::<String>().unwrap(), "hello");
    }

    #[test]
    fn test_get_wrong_type() {
        let value = Value::new(5i32);
        assert_eq!(
            value.get::<i64>(),
            Err(LookupError::TypeMismatch {
                expected: "i64",
                found: "i32"
            })
        );
        assert!(matches!(
            value.get::<String>(),
            Err(LookupError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_get_absent() {
        assert_eq!(
            Value::absent().get::<i32>(),
            Err(LookupError::TypeMismatch {
                expected: "i32",
                found: ABSENT
            })
        );
    }

    #[test]
    fn test_count_is_fixed() {
        let value = Value::with_count(true, 3);
        assert_eq!(value.count(), 3);
        let copy = value.clone();
        assert_eq!(copy.count(), 3);
        assert_eq!(Value::new(1u8).count(), 0);
    }

    #[test]
    fn test_cast() {
        let value = Value::new(1.0f64);
        assert_eq!(value.cast::<f64, i32>(), Ok(1));

        let value = Value::new(-32i32);
        assert_eq!(value.cast::<i32, f32>(), Ok(-32.0));
        assert_eq!(
            value.cast::<i32, u8>(),
            Err(LookupError::CastFailed { from: "i32", to: "u8" })
        );
        assert!(value.cast::<u32, f32>().is_err());
    }

    macro_rules! comparison_tests {
        ($($name:ident: $ty:ty => ($zero:expr, $one:expr)),* $(,)?) => {
            $(
                #[test]
                fn $name() {
                    let a = Value::new::<$ty>($zero);
                    let b = Value::new::<$ty>($one);
                    let c = Value::absent();

                    assert!(a.equals(&$zero).unwrap());
                    assert!(b.equals(&$one).unwrap());
                    assert!(!c.equals(&$zero).unwrap());

                    assert!(!a.not_equals(&$zero).unwrap());
                    assert!(!b.not_equals(&$one).unwrap());
                    assert!(c.not_equals(&$zero).unwrap());

                    assert!(!a.lt(&$zero).unwrap());
                    assert!(!b.lt(&$one).unwrap());
                    assert!(!c.lt(&$zero).unwrap());
                    assert!(a.lt(&$one).unwrap());

                    assert!(a.le(&$zero).unwrap());
                    assert!(b.le(&$one).unwrap());
                    assert!(!c.le(&$zero).unwrap());

                    assert!(!a.gt(&$zero).unwrap());
                    assert!(!b.gt(&$one).unwrap());
                    assert!(!c.gt(&$zero).unwrap());
                    assert!(b.gt(&$zero).unwrap());

                    assert!(a.ge(&$zero).unwrap());
                    assert!(b.ge(&$one).unwrap());
                    assert!(!c.ge(&$zero).unwrap());
                }
            )*
        };
    }

    comparison_tests! {
        test_compare_bool: bool => (false, true),
        test_compare_char: char => ('\0', '\u{1}'),
        test_compare_i32: i32 => (0i32, 1i32),
        test_compare_u32: u32 => (0u32, 1u32),
        test_compare_f32: f32 => (0.0f32, 1.0f32),
        test_compare_f64: f64 => (0.0f64, 1.0f64),
    }

    #[test]
    fn test_compare_wrong_type_is_an_error() {
        let value = Value::new(1i32);
        assert!(value.equals(&1u32).is_err());
        assert!(value.lt(&2i64).is_err());
        assert!(value.compare(&"1").is_err());
    }

    #[test]
    fn test_compare_nan_has_no_ordering() {
        let value = Value::new(f64::NAN);
        assert_eq!(value.compare(&0.0f64), Ok(None));
        assert!(!value.lt(&0.0f64).unwrap());
        assert!(!value.ge(&0.0f64).unwrap());
    }

    #[test]
    fn test_debug_hides_payload() {
        let rendered = format!("{:?}", Value::with_count(7u16, 2));
        assert_eq!(rendered, "Value { type: \"u16\", count: 2 }");
    }
}
