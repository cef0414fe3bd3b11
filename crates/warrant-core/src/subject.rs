//! Opaque references to the domain object a check concerns.

use std::any::{Any, type_name};
use std::fmt;

/// A borrowed, type-erased domain object.
///
/// The engine never looks inside; voters that care downcast it to the
/// concrete type they understand and abstain otherwise.
#[derive(Clone, Copy)]
pub struct Subject<'a> {
    value: &'a (dyn Any + 'static),
    type_name: &'static str,
}

impl<'a> Subject<'a> {
    /// Wrap a reference to any `'static` type.
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
        }
    }

    /// Downcast to a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }

    /// Whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Name of the wrapped type, for logging.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("type", &self.type_name)
            .finish()
    }
}

impl<'a, T: Any> From<&'a T> for Subject<'a> {
    fn from(value: &'a T) -> Self {
        Subject::new(value)
    }
}
