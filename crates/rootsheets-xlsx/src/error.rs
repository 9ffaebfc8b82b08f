//! Errors raised while packaging or unpacking an XLSX archive

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Failure reading or writing a workbook archive.
///
/// Variants wrapping another error leave its text to `source()`, so a
/// reporter walking the chain prints each message once.
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("I/O failure on workbook archive")]
    Io(#[from] std::io::Error),

    #[error("malformed zip container")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed workbook XML")]
    Xml(#[from] quick_xml::Error),

    /// Structurally valid archive that is not a usable workbook
    #[error("not a usable workbook: {0}")]
    InvalidFormat(String),

    /// A part listed in the package is absent
    #[error("archive is missing part '{0}'")]
    MissingPart(String),

    #[error("bad cell data: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] rootsheets_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_wrapped_message_not_repeated() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err = XlsxError::from(io);

        assert!(!err.to_string().contains("no such directory"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "no such directory");
    }

    #[test]
    fn test_core_error_is_transparent() {
        let core = rootsheets_core::Error::SheetOutOfBounds(4, 2);
        let expected = core.to_string();
        assert_eq!(XlsxError::from(core).to_string(), expected);
    }
}
