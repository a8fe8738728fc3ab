use std::{fmt::Display, panic::Location};

use anyhow::Context;

pub mod prelude {
    pub use anyhow::{anyhow, bail, Context, Result};
    pub use thiserror::Error;

    pub use super::{LocatedError, LocatedOption};
}

/// Prefix `context` with the `[file:line:column]` location of the caller.
fn locate(caller: &Location<'_>, context: impl Display) -> String {
    format!("[{}:{}:{}] {context}", caller.file(), caller.line(), caller.column())
}

/// Attach a context message, along with the source location at which it was attached, to an error.
pub trait LocatedError<T, E> {
    /// Wrap the error value with additional context + the location at which it was called.
    ///
    /// # Errors
    /// Forwards the inner error, if any.
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Wrap the error value with additional context that is evaluated lazily
    /// only once an error does occur + the location at which it was called.
    ///
    /// # Errors
    /// Forwards the inner error, if any.
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> LocatedError<T, E> for Result<T, E>
where
    Result<T, E>: Context<T, E>,
{
    #[track_caller]
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, context))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, f()))
    }
}

/// Same as [`LocatedError`], for missing values.
pub trait LocatedOption<T> {
    /// Convert `None` into an error carrying `context` + the location at which it was called.
    ///
    /// # Errors
    /// if `self` is `None`.
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazy version of [`LocatedOption::loc`].
    ///
    /// # Errors
    /// if `self` is `None`.
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> LocatedOption<T> for Option<T> {
    #[track_caller]
    fn loc<C>(self, context: C) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, context))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> anyhow::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, f()))
    }
}
