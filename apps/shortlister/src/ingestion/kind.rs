/// How an uploaded item is turned into text, decided by its name's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// `.jpg`, `.jpeg` or `.png`
    Image,
    Docx,
    /// `.zip`; only expanded when uploaded directly, never when nested.
    Archive,
    Unsupported,
}

impl DocumentKind {
    /// Classifies by case-insensitive suffix. `resume.PDF` is a PDF; `pdf` is not.
    pub fn from_identifier(identifier: &str) -> Self {
        let name = identifier.to_lowercase();
        if name.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if name.ends_with(".jpg") || name.ends_with(".jpeg") || name.ends_with(".png") {
            DocumentKind::Image
        } else if name.ends_with(".docx") {
            DocumentKind::Docx
        } else if name.ends_with(".zip") {
            DocumentKind::Archive
        } else {
            DocumentKind::Unsupported
        }
    }

    /// Kinds that are kept when found inside an archive.
    pub fn is_resume(self) -> bool {
        matches!(
            self,
            DocumentKind::Pdf | DocumentKind::Image | DocumentKind::Docx
        )
    }
}
