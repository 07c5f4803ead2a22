//! Field path tracking for error reports.
//!
//! With the `debug` feature in debug builds, the copy engine pushes every
//! field it descends into onto a thread-local stack. The first error raised
//! below a field is wrapped into [`SerialError::Traced`] with the path at
//! that point. Otherwise both helpers compile to nothing.

use crate::ops::SerialError;

#[cfg(all(debug_assertions, feature = "debug", feature = "std"))]
mod stack {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::fmt::{Debug, Formatter};

    /// Stack of `(type, field)` pairs currently being copied.
    pub(super) struct FieldStack {
        stack: Vec<(&'static str, &'static str)>,
    }

    impl FieldStack {
        pub(super) const fn new() -> Self {
            Self { stack: Vec::new() }
        }

        pub(super) fn push(&mut self, type_name: &'static str, field: &'static str) {
            self.stack.push((type_name, field));
        }

        pub(super) fn pop(&mut self) {
            self.stack.pop();
        }

        pub(super) fn is_empty(&self) -> bool {
            self.stack.is_empty()
        }

        pub(super) fn path(&self) -> String {
            format!("{self:?}")
        }
    }

    impl Debug for FieldStack {
        fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
            let mut iter = self.stack.iter();

            if let Some((ty, field)) = iter.next() {
                write!(f, "`{ty}.{field}`")?;
            }

            for (ty, field) in iter {
                write!(f, " -> `{ty}.{field}`")?;
            }

            Ok(())
        }
    }

    std::thread_local! {
        pub(super) static FIELD_STACK: RefCell<FieldStack> =
            const { RefCell::new(FieldStack::new()) };
    }
}

/// Keeps a field on the path until dropped.
#[must_use]
pub(crate) struct FieldGuard {
    _private: (),
}

impl Drop for FieldGuard {
    #[inline]
    fn drop(&mut self) {
        #[cfg(all(debug_assertions, feature = "debug", feature = "std"))]
        stack::FIELD_STACK.with_borrow_mut(stack::FieldStack::pop);
    }
}

/// Pushes `type_name.field` onto the path.
#[inline]
pub(crate) fn enter(type_name: &'static str, field: &'static str) -> FieldGuard {
    #[cfg(all(debug_assertions, feature = "debug", feature = "std"))]
    stack::FIELD_STACK.with_borrow_mut(|stack| stack.push(type_name, field));
    #[cfg(not(all(debug_assertions, feature = "debug", feature = "std")))]
    let _ = (type_name, field);

    FieldGuard { _private: () }
}

/// Attaches the current path to `err`, unless it already carries one.
#[inline]
pub(crate) fn traced(err: SerialError) -> SerialError {
    #[cfg(all(debug_assertions, feature = "debug", feature = "std"))]
    if !matches!(err, SerialError::Traced { .. }) {
        return stack::FIELD_STACK.with_borrow(|stack| {
            if stack.is_empty() {
                err
            } else {
                SerialError::Traced {
                    path: stack.path(),
                    source: alloc::boxed::Box::new(err),
                }
            }
        });
    }

    err
}
