/// Port for user-facing progress output.
///
/// Each command receives a reporter instead of writing to stdout directly, so
/// output can be captured in tests.
pub trait Reporter {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    /// One line of a plan or listing, indented under the previous message.
    fn item(&self, message: &str);
    /// Unadorned output, e.g. machine-readable JSON.
    fn raw(&self, message: &str);
}
