pub mod car;
pub mod error;
pub mod repository;
pub mod user;

/// Returns the value only when it is present and non-empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
