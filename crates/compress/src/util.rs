use crate::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Compression {
    /// Returns the file extension for this compression format.
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Gzip => ".gz",
            Compression::Brotli => ".br",
        }
    }

    /// Returns the short name for configuration (for displaying to user)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Brotli => "brotli",
        }
    }

    /// Returns the token used in HTTP `Content-Encoding` and `Accept-Encoding` headers.
    #[inline]
    #[must_use]
    pub fn content_encoding(&self) -> &'static str {
        match self {
            Compression::None => "identity",
            Compression::Gzip => "gzip",
            Compression::Brotli => "br",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case(Compression::None, "", "identity")]
    #[case(Compression::Gzip, ".gz", "gzip")]
    #[case(Compression::Brotli, ".br", "br")]
    fn test_names(#[case] format: Compression, #[case] extension: &str, #[case] encoding: &str) {
        assert_eq!(format.extension(), extension);
        assert_eq!(format.content_encoding(), encoding);
        assert_eq!(format.to_string().parse::<Compression>().unwrap(), format);
    }
}
