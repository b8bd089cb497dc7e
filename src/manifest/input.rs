use std::io::Read;

use tracing::debug;

use crate::manifest::{ManifestError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 64 * 1024 * 1024;
/// zstd frame magic used by compressed manifests.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for an input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// `apiVersion`/`kind` pair carried by a manifest document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMeta {
	/// Manifest `apiVersion`.
	pub api_version: String,
	/// Manifest `kind`.
	pub kind: String,
}

impl TypeMeta {
	/// Extract type metadata from a parsed document, if both keys are strings.
	pub fn of(doc: &serde_json::Value) -> Option<Self> {
		let api_version = doc.get("apiVersion")?.as_str()?;
		let kind = doc.get("kind")?.as_str()?;
		Some(Self {
			api_version: api_version.to_owned(),
			kind: kind.to_owned(),
		})
	}
}

/// Decompress if needed and parse one JSON or YAML document.
pub fn read_document(raw: Vec<u8>) -> Result<(Compression, serde_json::Value)> {
	let (compression, bytes) = decode_bytes(raw)?;
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Err(ManifestError::EmptyInput);
	}

	let doc = if looks_like_json(&bytes) {
		serde_json::from_slice(&bytes)?
	} else {
		serde_yaml::from_slice(&bytes)?
	};
	debug!(compression = compression.as_str(), bytes = bytes.len(), "read manifest document");
	Ok((compression, doc))
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

/// Whether the first non-whitespace byte opens a JSON object or array.
pub fn looks_like_json(bytes: &[u8]) -> bool {
	matches!(bytes.iter().find(|byte| !byte.is_ascii_whitespace()), Some(&(b'{' | b'[')))
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(ManifestError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
