pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when fetching or shaping book metadata.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The error is associated with an underlying IO or network error, including non-success
    /// HTTP statuses.
    IO,
    /// An error caused when parsing/deserialization fails.
    Deserialize,
    /// An error when an operation has failed to return a value.
    NoValue,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Wraps an existing error as the source of [`Error`] with a message giving context.
    pub fn wrap_with<S, E>(kind: ErrorKind, message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<DynError>,
    {
        Self {
            kind,
            message: Some(message.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::IO => f.write_str("IO error")?,
            ErrorKind::Deserialize => f.write_str("Deserialize error")?,
            ErrorKind::NoValue => f.write_str("No value error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

/// Outcome of a best-effort enrichment step.
///
/// Enrichment never decides whether a lookup succeeds; when a step is [`Unavailable`] the
/// caller keeps whatever it already had. The reason is kept so that it can be logged and
/// inspected in tests.
///
/// [`Unavailable`]: Enrichment::Unavailable
#[derive(Debug)]
pub enum Enrichment<T> {
    /// The step produced data.
    Available(T),
    /// The step failed and the reason why.
    Unavailable(Error),
}

impl<T> From<Result<T, Error>> for Enrichment<T> {
    fn from(res: Result<T, Error>) -> Self {
        match res {
            Ok(data) => Self::Available(data),
            Err(reason) => Self::Unavailable(reason),
        }
    }
}
