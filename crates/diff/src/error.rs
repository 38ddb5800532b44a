//! Error types for the diff writer.

/// Misuse of a [`DiffWriter`](crate::DiffWriter) state machine.
///
/// A writer is open until [`flush`](crate::DiffWriter::flush) is called and
/// closed afterwards. Writing requires an open writer; reading the rendered
/// lines requires a closed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A write or flush was attempted after the writer was flushed.
    #[error("writer already flushed")]
    WriterClosed,

    /// Rendered lines were requested before the writer was flushed.
    #[error("writer must be flushed before its lines can be read")]
    WriterOpen,
}

/// An unrecognized terminal encoding name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown terminal encoding: {name}")]
pub struct UnknownEncoding {
    /// The rejected name.
    pub name: String,
}
