// SPDX-License-Identifier: MIT

use std::path::Path;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;

pub fn err_from_str(msg: &str) -> Error {
    msg.into()
}

/// An error with a description of what was being done when it happened.
#[derive(Debug)]
pub struct ContextError {
    context: String,
    cause: Error,
}
impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.cause)
    }
}
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Run `f` and prefix any errors with the string returned by `context`.
pub fn try_forward<F, R, C, S>(f: F, context: C) -> Result<R>
where
    F: FnOnce() -> Result<R>,
    C: FnOnce() -> S,
    S: Into<String>,
{
    f().map_err(|cause| -> Error {
        Box::new(ContextError {
            context: context().into(),
            cause,
        })
    })
}

/// Read a file that must be valid UTF-8.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    try_forward(
        || Ok(std::fs::read_to_string(path)?),
        || path.display().to_string(),
    )
}
