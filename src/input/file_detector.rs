//! Document type detection

use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Extension first; files without a known extension are sniffed for the PDF header
    pub fn detect(path: &Path) -> Self {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown);

        if by_extension != FileType::Unknown {
            return by_extension;
        }

        if has_pdf_header(path) {
            FileType::Pdf
        } else {
            FileType::Unknown
        }
    }
}

fn has_pdf_header(path: &Path) -> bool {
    let mut header = [0u8; 5];
    std::fs::File::open(path)
        .and_then(|mut file| file.read_exact(&mut header))
        .map(|_| header == PDF_MAGIC)
        .unwrap_or(false)
}
