//! Progress reporting seam between handlers and the terminal

/// Receives user-facing output of a running command.
pub trait Reporter: Send + Sync {
    /// Rendered listing table.
    fn listing(&self, table: &str);

    /// An item is about to be processed.
    fn progress(&self, message: &str);

    /// The current item finished successfully.
    fn succeeded(&self, message: &str);

    /// An item failed; processing continues with the next one.
    fn failed(&self, message: &str);
}
