use std::fmt::Display;

pub type EmptyResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
pub type ResultWithError<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub trait ResultTrait<T, E> {
    /// Replaces the error with `"{desc}: {error}"`.
    fn auto_err(self, desc: &str) -> ResultWithError<T>;
}

impl<T, E> ResultTrait<T, E> for Result<T, E>
where
    E: Display,
{
    fn auto_err(self, desc: &str) -> ResultWithError<T> {
        self.map_err(|e| format!("{desc}: {e}").into())
    }
}

pub trait OptionResultTrait<T> {
    fn auto_err(self, desc: &str) -> ResultWithError<T>;
}

impl<T> OptionResultTrait<T> for Option<T> {
    fn auto_err(self, desc: &str) -> ResultWithError<T> {
        self.ok_or_else(|| desc.into())
    }
}
