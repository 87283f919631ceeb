use std::fmt;

pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a bookinfo operation.
///
/// Carries an [`ErrorKind`] for callers that branch on the cause, an optional context message
/// and the underlying error when there is one.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// What went wrong, see [`Error::kind`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the input, writing the output or reaching the API failed.
    IO,
    /// The API answered with a non-success HTTP status.
    Status,
    /// The API response could not be decoded.
    Deserialize,
    /// A record could not be encoded as CSV.
    Serialize,
}

impl ErrorKind {
    const fn label(self) -> &'static str {
        match self {
            Self::IO => "IO error",
            Self::Status => "Status error",
            Self::Deserialize => "Deserialize error",
            Self::Serialize => "Serialize error",
        }
    }
}

impl Error {
    /// An error of `kind` described only by `message`.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// An error of `kind` caused by `source`.
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

    /// Replaces the context message, e.g. with the path that failed to open.
    #[must_use]
    pub fn with_message<S: Into<String>>(self, message: S) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.label())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        match &self.source {
            Some(cause) => write!(f, ": caused by {cause}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_message_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::wrap(ErrorKind::IO, io).with_message("Cannot open 'input.txt'");

        assert_eq!(
            "IO error: Cannot open 'input.txt': caused by no such file",
            err.to_string()
        );
        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn display_without_source() {
        let err = Error::new(ErrorKind::Status, "404 Not Found");
        assert_eq!("Status error: 404 Not Found", err.to_string());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn wrapped_source_is_exposed() {
        let err = Error::wrap(ErrorKind::Serialize, "bad field");
        let source = std::error::Error::source(&err).map(ToString::to_string);

        assert_eq!(Some("bad field".to_owned()), source);
        assert_eq!("Serialize error: caused by bad field", err.to_string());
    }
}
