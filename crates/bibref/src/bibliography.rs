//! Bibliography loading.
//!
//! BibTeX grammar is handled entirely by the `biblatex` crate. This module
//! only reads the file and maps each parsed record onto a typed [`Entry`].

use std::path::Path;

use biblatex::ChunksExt;

use crate::Error;

/// One bibliography record with the fields used for rendering.
///
/// Every display field is optional; absent fields are omitted from the
/// reference list rather than rendered empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Citation key, matched case-insensitively.
    pub key: String,
    /// Raw author list, e.g. `Jones, A. and Lee, B.`.
    pub author: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub booktitle: Option<String>,
    pub bookurl: Option<String>,
    pub publisher: Option<String>,
    /// Year as written in the source (`2020` and `{2020}` are both text).
    pub year: Option<String>,
}

impl Entry {
    /// Create an entry with only a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    fn from_parsed(entry: &biblatex::Entry) -> Self {
        // Field names are matched ignoring case: `TITLE` and `title` are the same field.
        let field = |name: &str| {
            entry
                .fields
                .iter()
                .find(|(field, _)| field.eq_ignore_ascii_case(name))
                .map(|(_, chunks)| chunks.format_verbatim().trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        Self {
            key: entry.key.clone(),
            author: field("author"),
            title: field("title"),
            url: field("url"),
            booktitle: field("booktitle"),
            bookurl: field("bookurl"),
            publisher: field("publisher"),
            year: field("year").or_else(|| field("date")),
        }
    }
}

/// Parsed bibliography, in source order.
#[derive(Clone, Debug, Default)]
pub struct Bibliography {
    entries: Vec<Entry>,
}

impl Bibliography {
    /// Read and parse a BibTeX file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file is missing or not UTF-8, and
    /// [`Error::Parse`] if the parser rejects it.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let bibliography = Self::parse(&source)?;

        tracing::info!(
            path = %path.display(),
            entries = bibliography.len(),
            "Loaded bibliography"
        );
        Ok(bibliography)
    }

    /// Parse BibTeX source text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with the parser's message on malformed input.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let parsed = biblatex::Bibliography::parse(source).map_err(|e| Error::Parse {
            message: e.to_string(),
        })?;

        Ok(Self {
            entries: parsed.iter().map(Entry::from_parsed).collect(),
        })
    }

    /// Build a bibliography from already-typed entries.
    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r"
@article{SMITH2020,
    author = {Smith, J.},
    title = {Foo},
    url = {https://example.com/foo},
    year = 2020
}

@inproceedings{Doe2018,
    AUTHOR = {Doe, J.},
    TITLE = {Baz},
    BOOKTITLE = {Proceedings of Things},
    BOOKURL = {https://example.com/proc},
    PUBLISHER = {ACM},
    YEAR = {2018}
}
";

    #[test]
    fn test_parse_entries_in_source_order() {
        let bib = Bibliography::parse(SAMPLE).unwrap();

        assert_eq!(bib.len(), 2);
        assert_eq!(bib.entries()[0].key, "SMITH2020");
        assert_eq!(bib.entries()[1].key, "Doe2018");
    }

    #[test]
    fn test_parse_fields() {
        let bib = Bibliography::parse(SAMPLE).unwrap();
        let smith = &bib.entries()[0];

        assert_eq!(smith.author.as_deref(), Some("Smith, J."));
        assert_eq!(smith.title.as_deref(), Some("Foo"));
        assert_eq!(smith.url.as_deref(), Some("https://example.com/foo"));
        assert_eq!(smith.year.as_deref(), Some("2020"));
        assert_eq!(smith.booktitle, None);
        assert_eq!(smith.publisher, None);
    }

    #[test]
    fn test_parse_uppercase_field_names() {
        let bib = Bibliography::parse(SAMPLE).unwrap();
        let doe = &bib.entries()[1];

        assert_eq!(doe.booktitle.as_deref(), Some("Proceedings of Things"));
        assert_eq!(doe.bookurl.as_deref(), Some("https://example.com/proc"));
        assert_eq!(doe.publisher.as_deref(), Some("ACM"));
        assert_eq!(doe.year.as_deref(), Some("2018"));
    }

    #[test]
    fn test_empty_source() {
        let bib = Bibliography::parse("").unwrap();
        assert!(bib.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let err = Bibliography::parse("@article{BROKEN, title = {Unclosed").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("literature.bib");

        let err = Bibliography::load(&path).unwrap_err();
        match err {
            Error::Read { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("literature.bib");
        std::fs::write(&path, SAMPLE).unwrap();

        let bib = Bibliography::load(&path).unwrap();
        assert_eq!(bib.len(), 2);
    }

    #[test]
    fn test_entry_new() {
        let entry = Entry::new("KEY");
        assert_eq!(entry.key, "KEY");
        assert_eq!(entry.title, None);
    }
}
