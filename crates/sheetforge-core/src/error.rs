//! Error types for the SheetKit core library.
//!
//! Provides a comprehensive [`Error`] enum covering all failure modes
//! encountered when reading, writing, and manipulating Excel workbooks.

use thiserror::Error;

/// The top-level error type for SheetKit.
#[derive(Error, Debug)]
pub enum Error {
    // ===== Cell reference errors =====
    /// The given string is not a valid A1-style cell reference.
    #[error("invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// The row number is out of the allowed range (1..=1_048_576).
    #[error("invalid row number: {0}")]
    InvalidRowNumber(u32),

    /// The column number is out of the allowed range (1..=16_384).
    #[error("invalid column number: {0}")]
    InvalidColumnNumber(u32),

    // ===== Sheet errors =====
    /// No sheet with the given name exists in the workbook.
    #[error("sheet '{name}' does not exist")]
    SheetNotFound { name: String },

    /// A sheet with the given name already exists.
    #[error("sheet '{name}' already exists")]
    SheetAlreadyExists { name: String },

    /// The sheet name violates Excel naming rules.
    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    // ===== I/O errors =====
    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error originating from the ZIP layer.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// An error encountered while parsing XML.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// An error encountered while deserializing XML into typed structures.
    #[error("XML deserialization error: {0}")]
    XmlDeserialize(String),

    // ===== Value errors =====
    /// A cell value exceeds the maximum character limit.
    #[error("cell value too long: {length} characters (max {max})")]
    CellValueTooLong { length: usize, max: usize },

    // ===== Address / range errors (C1) =====
    /// A range reference (e.g. "A1:C3") could not be parsed.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    // ===== Image errors (C2/C3) =====
    /// The image payload's magic bytes do not match its declared format, or
    /// the format could not be determined from a GIF/PNG/JPEG prefix.
    #[error("unrecognized or truncated image header: {0}")]
    InvalidImageHeader(String),

    /// An extension or format tag outside gif/png/jpeg.
    #[error("unsupported image format: {format}")]
    UnsupportedImageFormat { format: String },

    // ===== Archive errors (C8) =====
    /// Writing a part to the destination failed.
    #[error("file write error: {0}")]
    FileWrite(String),

    /// The deflate archive could not be assembled.
    #[error("zip creation error: {0}")]
    ZipCreation(String),

    /// Generating XML for a part failed in a way that is not a plain parse
    /// error (e.g. an invariant the emitter relies on was violated).
    #[error("xml generation error: {0}")]
    XmlGeneration(String),

    // ===== Security policy errors (C9) =====
    /// The configured `SecurityPolicy` vetoed the write.
    #[error("security policy rejected the operation: {0}")]
    Security(String),

    /// The rate limiter's sliding window is exhausted.
    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    /// A file (typically an image payload) exceeds the policy's size cap.
    #[error("file size limit exceeded: {length} bytes (max {max})")]
    FileSizeLimit { length: usize, max: usize },

    /// An image payload was quarantined by the security policy.
    #[error("suspicious file rejected: {0}")]
    SuspiciousFile(String),

    /// An internal or otherwise unclassified error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_cell_reference() {
        let err = Error::InvalidCellReference("XYZ0".to_string());
        assert_eq!(err.to_string(), "invalid cell reference: XYZ0");
    }

    #[test]
    fn test_error_display_sheet_not_found() {
        let err = Error::SheetNotFound {
            name: "Missing".to_string(),
        };
        assert_eq!(err.to_string(), "sheet 'Missing' does not exist");
    }

    #[test]
    fn test_error_display_sheet_already_exists() {
        let err = Error::SheetAlreadyExists {
            name: "Sheet1".to_string(),
        };
        assert_eq!(err.to_string(), "sheet 'Sheet1' already exists");
    }

    #[test]
    fn test_error_display_invalid_sheet_name() {
        let err = Error::InvalidSheetName("bad[name".to_string());
        assert_eq!(err.to_string(), "invalid sheet name: bad[name");
    }

    #[test]
    fn test_error_display_invalid_row_number() {
        let err = Error::InvalidRowNumber(0);
        assert_eq!(err.to_string(), "invalid row number: 0");
    }

    #[test]
    fn test_error_display_invalid_column_number() {
        let err = Error::InvalidColumnNumber(99999);
        assert_eq!(err.to_string(), "invalid column number: 99999");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::Io(io_err);
        assert_eq!(err.to_string(), "I/O error: gone");
    }

    #[test]
    fn test_error_display_zip() {
        let err = Error::Zip("corrupted archive".to_string());
        assert_eq!(err.to_string(), "ZIP error: corrupted archive");
    }

    #[test]
    fn test_error_display_xml_parse() {
        let err = Error::XmlParse("unexpected EOF".to_string());
        assert_eq!(err.to_string(), "XML parse error: unexpected EOF");
    }

    #[test]
    fn test_error_display_xml_deserialize() {
        let err = Error::XmlDeserialize("missing attribute".to_string());
        assert_eq!(err.to_string(), "XML deserialization error: missing attribute");
    }

    #[test]
    fn test_error_display_cell_value_too_long() {
        let err = Error::CellValueTooLong {
            length: 40000,
            max: 32767,
        };
        assert_eq!(
            err.to_string(),
            "cell value too long: 40000 characters (max 32767)"
        );
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("something went wrong".to_string());
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_display_invalid_range() {
        let err = Error::InvalidRange("A1:".to_string());
        assert_eq!(err.to_string(), "invalid range: A1:");
    }

    #[test]
    fn test_error_display_invalid_image_header() {
        let err = Error::InvalidImageHeader("truncated PNG prefix".to_string());
        assert_eq!(
            err.to_string(),
            "unrecognized or truncated image header: truncated PNG prefix"
        );
    }

    #[test]
    fn test_error_display_unsupported_image_format() {
        let err = Error::UnsupportedImageFormat {
            format: "bmp".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported image format: bmp");
    }

    #[test]
    fn test_error_display_zip_creation() {
        let err = Error::ZipCreation("disk full".to_string());
        assert_eq!(err.to_string(), "zip creation error: disk full");
    }

    #[test]
    fn test_error_display_security_and_rate_limit() {
        let sec = Error::Security("path outside workspace".to_string());
        assert_eq!(
            sec.to_string(),
            "security policy rejected the operation: path outside workspace"
        );
        let rl = Error::RateLimit("100/60s exceeded".to_string());
        assert_eq!(rl.to_string(), "rate limit exceeded: 100/60s exceeded");
    }

    #[test]
    fn test_error_display_file_size_limit() {
        let err = Error::FileSizeLimit {
            length: 25_000_000,
            max: 20_971_520,
        };
        assert_eq!(
            err.to_string(),
            "file size limit exceeded: 25000000 bytes (max 20971520)"
        );
    }

    #[test]
    fn test_error_display_suspicious_file() {
        let err = Error::SuspiciousFile("banned substring detected".to_string());
        assert_eq!(
            err.to_string(),
            "suspicious file rejected: banned substring detected"
        );
    }
}
