//! Raw text extraction from PDF, Markdown and plain text documents

use crate::error::{Result, ScorerError};
use pulldown_cmark::{Event, Options, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ScorerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;

        Ok(tidy_lines(&text))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown))
    }
}

/// Visible text of a Markdown document, one block per line
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak
            | Event::Rule
            | Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::TableRow)
            | Event::End(Tag::TableHead) => text.push('\n'),
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    tidy_lines(&text)
}

/// Trim each line and drop blank ones
fn tidy_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n**Senior** Rust engineer.\nBuilt `tokio` services.\n\n- Kubernetes\n- AWS\n\n[Site](https://example.com)";
        let text = markdown_to_text(markdown);
        assert_eq!(
            text,
            "Jane Doe\nSenior Rust engineer. Built tokio services.\nKubernetes\nAWS\nSite"
        );
    }

    #[test]
    fn test_tidy_lines() {
        assert_eq!(tidy_lines("  a \n\n\n b  \n"), "a\nb");
    }

    #[tokio::test]
    async fn test_plain_and_markdown_files() {
        let temp_dir = TempDir::new().unwrap();

        let txt = temp_dir.path().join("job.txt");
        std::fs::write(&txt, "Python developer\n").unwrap();
        assert_eq!(PlainTextExtractor.extract(&txt).await.unwrap(), "Python developer\n");

        let md = temp_dir.path().join("resume.md");
        std::fs::write(&md, "## Skills\n\n* Django\n").unwrap();
        assert_eq!(MarkdownExtractor.extract(&md).await.unwrap(), "Skills\nDjango");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = PlainTextExtractor.extract(Path::new("/definitely/not/here.txt")).await;
        assert!(matches!(result, Err(ScorerError::Io(_))));
    }
}
