use axum::body::Bytes;

/// Image formats accepted for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    Png,
    Jpeg,
}

impl ImageMediaType {
    /// Match a declared `Content-Type` against the allow-list.
    ///
    /// Parameters (`; charset=...`) are ignored and the comparison is
    /// case-insensitive; anything else is rejected.
    pub fn from_mime(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("image/png") {
            Some(Self::Png)
        } else if essence.eq_ignore_ascii_case("image/jpeg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    fn default_file_name(&self) -> &'static str {
        match self {
            Self::Png => "image.png",
            Self::Jpeg => "image.jpg",
        }
    }
}

/// Image as received from the caller, ready to forward.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub media_type: ImageMediaType,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn file_name_or_default(&self) -> String {
        self.file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.media_type.default_file_name().to_string())
    }
}
