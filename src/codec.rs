//! JSON wire codec for [`SignatureDocument`].
//!
//! The JSON stroke document is the authoritative persisted form of a
//! signature; the PNG raster is only a preview. This module owns both
//! directions of the conversion: a strict decoder for callers that want
//! typed errors, and a lenient entry point used during hydration where
//! anything unusable collapses to the empty state instead of surfacing an
//! error to the host screen.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use crate::consts::WIRE_VERSION_MAJOR;
use crate::doc::SignatureDocument;

/// Error returned by [`decode_document`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input could not be parsed as a signature document.
    #[error("failed to parse signature document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document's version tag is outside the supported major line.
    #[error("unsupported document version: {0}")]
    UnsupportedVersion(String),
}

/// Encode a document into its JSON wire form.
#[must_use]
pub fn encode_document(doc: &SignatureDocument) -> String {
    // Safety: serialization of this type is infallible; serde_json only
    // errors on maps with non-string keys, which the model does not contain.
    serde_json::to_string(doc).unwrap_or_default()
}

/// Decode a document from its JSON wire form.
///
/// # Errors
///
/// Returns [`CodecError::Parse`] for malformed JSON and
/// [`CodecError::UnsupportedVersion`] for version tags outside the `1.x`
/// line.
pub fn decode_document(input: &str) -> Result<SignatureDocument, CodecError> {
    let doc: SignatureDocument = serde_json::from_str(input)?;
    if !doc.version.starts_with(WIRE_VERSION_MAJOR) {
        return Err(CodecError::UnsupportedVersion(doc.version));
    }
    Ok(doc)
}

/// Hydration entry point: malformed input, unsupported versions, and
/// documents without strokes all collapse to `None`, the empty state.
#[must_use]
pub fn decode_lenient(input: &str) -> Option<SignatureDocument> {
    match decode_document(input) {
        Ok(doc) if doc.strokes.is_empty() => None,
        Ok(doc) => Some(doc),
        Err(err) => {
            log::warn!("ignoring unusable signature document: {err}");
            None
        }
    }
}
