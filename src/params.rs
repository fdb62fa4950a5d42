//! The parameter bag handed to the dispatch layer.
//!
//! Wrappers never build query strings or request bodies themselves; they
//! fill a [`Params`] and let [`crate::ReefClient`] decide how to serialize
//! it (query string for reads, form-encoded or multipart body for writes).

use std::path::Path;

use bytes::Bytes;

use crate::errors::RequestError;

/// An ordered bag of request parameters.
///
/// Keys may repeat; repeated keys serialize as repeated query/form pairs.
/// A bag that contains at least one [`FilePart`] forces the request into
/// `multipart/form-data`.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Params {
    pairs: Vec<(String, ParamValue)>,
}

/// A single parameter value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// A plain text value (numbers and booleans are stringified).
    Text(String),
    /// A file upload part; switches the request body to multipart.
    File(FilePart),
}

impl Params {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text parameter. Values are stringified with `ToString`.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs
            .push((key.into(), ParamValue::Text(value.to_string())));
        self
    }

    /// Appends a text parameter only when `value` is `Some`.
    ///
    /// Handy for optional filters and paging knobs.
    pub fn set_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Appends a file part.
    pub fn file(mut self, key: impl Into<String>, part: FilePart) -> Self {
        self.pairs.push((key.into(), ParamValue::File(part)));
        self
    }

    /// Returns true if the bag holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns true if any value is a file part (multipart body required).
    pub fn has_file(&self) -> bool {
        self.pairs
            .iter()
            .any(|(_, v)| matches!(v, ParamValue::File(_)))
    }

    /// Flattens the bag into `(key, value)` text pairs for query strings and
    /// form bodies. Fails if a file part is present: files cannot ride in a
    /// query string, and the form/multipart decision happens before this.
    pub(crate) fn text_pairs(&self) -> Result<Vec<(String, String)>, RequestError> {
        self.pairs
            .iter()
            .map(|(k, v)| match v {
                ParamValue::Text(t) => Ok((k.clone(), t.clone())),
                ParamValue::File(f) => Err(RequestError::Validation {
                    message: format!("file parameter `{k}` ({}) not allowed here", f.file_name),
                }),
            })
            .collect()
    }

    /// Converts the bag into a multipart form: text values become text
    /// parts, file values become file parts with filename and MIME type.
    pub(crate) fn into_multipart(self) -> Result<reqwest::multipart::Form, RequestError> {
        let mut form = reqwest::multipart::Form::new();
        for (key, value) in self.pairs {
            form = match value {
                ParamValue::Text(t) => form.text(key, t),
                ParamValue::File(f) => {
                    let mut part = reqwest::multipart::Part::bytes(f.content.to_vec())
                        .file_name(f.file_name.clone());
                    if let Some(mime) = &f.mime {
                        part = part.mime_str(mime).map_err(|e| RequestError::Validation {
                            message: format!("invalid MIME type `{mime}`: {e}"),
                        })?;
                    }
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

/// An in-memory file destined for a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub(crate) file_name: String,
    pub(crate) mime: Option<String>,
    pub(crate) content: Bytes,
}

impl FilePart {
    /// Creates a part from a file name and raw content.
    ///
    /// The MIME type is guessed from the file name extension; use
    /// [`FilePart::mime`] to override it.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.essence_str().to_string());
        Self {
            file_name,
            mime,
            content: content.into(),
        }
    }

    /// Reads a local file into a part, keeping its file name.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| RequestError::Validation {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RequestError::Validation {
                message: format!("path {} has no usable file name", path.display()),
            })?;
        Ok(Self::new(file_name, content))
    }

    /// Overrides the guessed MIME type.
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// The file name sent in the part's `Content-Disposition`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
