/// A typed field that may hold the Null Sentinel.
///
/// Domain fields are `Option<_>` to express presence. `Option<Nullable<T>>`
/// distinguishes all three wire states of a reference field:
///
/// | field value                        | wire       |
/// |------------------------------------|------------|
/// | `None`                             | key omitted |
/// | `Some(Nullable::Null)`             | `null`     |
/// | `Some(Nullable::Value(v))`         | `v`        |
///
/// # Examples
///
/// ```
/// use ee_serial::Nullable;
///
/// let transform: Nullable<u32> = Nullable::Null;
/// assert!(transform.is_null());
/// assert_eq!(Nullable::from(3).into_option(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// Explicitly null.
    #[default]
    Null,
    /// A present value.
    Value(T),
}

impl<T> Nullable<T> {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Nullable::Null)
    }

    #[inline]
    pub const fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Null => Nullable::Null,
            Nullable::Value(v) => Nullable::Value(v),
        }
    }

    #[inline]
    pub fn as_mut(&mut self) -> Nullable<&mut T> {
        match self {
            Nullable::Null => Nullable::Null,
            Nullable::Value(v) => Nullable::Value(v),
        }
    }

    /// Converts into an `Option`, losing the null marker.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Null => None,
            Nullable::Value(v) => Some(v),
        }
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Nullable<U> {
        match self {
            Nullable::Null => Nullable::Null,
            Nullable::Value(v) => Nullable::Value(f(v)),
        }
    }
}

impl<T> From<T> for Nullable<T> {
    #[inline]
    fn from(value: T) -> Self {
        Nullable::Value(value)
    }
}
