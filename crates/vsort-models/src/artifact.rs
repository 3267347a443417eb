//! In-memory image artifact.

/// A named binary blob moving through the pipeline.
///
/// The bytes are buffered once and reused for both the classifier call and
/// the destination write, so there is no stream position to rewind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Logical name (object key relative to the source location)
    pub name: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content type guessed from the file extension, for destination writes.
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .name
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            Some("webp") => "image/webp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_reports_byte_length() {
        let artifact = Artifact::new("a.jpg", vec![1, 2, 3]);
        assert_eq!(artifact.size(), 3);
        assert!(!artifact.is_empty());
    }

    #[test]
    fn content_type_from_extension() {
        assert_eq!(Artifact::new("a.jpg", vec![]).content_type(), "image/jpeg");
        assert_eq!(Artifact::new("a.png", vec![]).content_type(), "image/png");
        assert_eq!(Artifact::new("noext", vec![]).content_type(), "application/octet-stream");
    }

    #[test]
    fn content_type_ignores_extension_case() {
        assert_eq!(Artifact::new("a.PNG", vec![]).content_type(), "image/png");
        assert_eq!(Artifact::new("b.JPEG", vec![]).content_type(), "image/jpeg");
    }
}
