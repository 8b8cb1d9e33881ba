//! Binary blobs to and from their JSON-safe envelope.

use std::io::{Read, Write};

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
use tracing::debug;

use crate::error::ConfError;
use crate::types::{Blob, BlobFormat, Compression};

/// Parse `bytes` as UTF-8 JSON, or `None` if they are not.
pub fn try_parse_json(bytes: &[u8]) -> Option<Value> {
    let text = std::str::from_utf8(bytes).ok()?;
    serde_json::from_str(text).ok()
}

/// Wrap `bytes` in a [`Blob`].
///
/// With a `"json"` hint, bytes holding a JSON document are stored as that
/// document, provided re-serializing it gives back the same bytes. Anything
/// else is base64-encoded, bzip2-compressed first when that makes it
/// strictly smaller.
pub fn encode_blob(bytes: &[u8], format_hint: Option<&str>) -> Result<Blob, ConfError> {
    if format_hint == Some("json") {
        if let Some(value) = json_payload(bytes) {
            debug!(event = "Blob", phase = "Encode", format = "json", size = bytes.len());
            return Ok(Blob::new(BlobFormat::Json, value));
        }
    }

    let compressed = compress(Compression::Bz2, bytes)?;
    let (format, chosen) = if compressed.len() < bytes.len() {
        (
            BlobFormat::Base64 {
                compression: Some(Compression::Bz2),
            },
            compressed.as_slice(),
        )
    } else {
        (BlobFormat::Base64 { compression: None }, bytes)
    };

    debug!(
        event = "Blob",
        phase = "Encode",
        format = %format,
        size = bytes.len(),
        stored = chosen.len()
    );
    Ok(Blob::new(format, Value::String(STANDARD.encode(chosen))))
}

/// Recover the original bytes from a [`Blob`].
pub fn decode_blob(blob: &Blob) -> Result<Vec<u8>, ConfError> {
    let format = blob.parsed_format()?;
    let bytes = match format {
        BlobFormat::Json => serde_json::to_vec(&blob.payload)?,
        BlobFormat::String => payload_text(blob)?.as_bytes().to_vec(),
        BlobFormat::Base64 { compression } => {
            let raw = STANDARD.decode(payload_text(blob)?)?;
            match compression {
                Some(algo) => decompress(algo, &raw)?,
                None => raw,
            }
        }
    };
    debug!(event = "Blob", phase = "Decode", format = %format, size = bytes.len());
    Ok(bytes)
}

// Only keep the JSON form when decoding it reproduces the input exactly.
fn json_payload(bytes: &[u8]) -> Option<Value> {
    let value = try_parse_json(bytes)?;
    let reserialized = serde_json::to_vec(&value).ok()?;
    (reserialized == bytes).then_some(value)
}

fn payload_text(blob: &Blob) -> Result<&str, ConfError> {
    blob.payload.as_str().ok_or_else(|| {
        ConfError::InvalidBlobPayload(format!(
            "format '{}' expects a string payload",
            blob.format
        ))
    })
}

pub(crate) fn compress(algo: Compression, bytes: &[u8]) -> Result<Vec<u8>, ConfError> {
    match algo {
        Compression::Bz2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::best());
            encoder.write_all(bytes)?;
            Ok(encoder.finish()?)
        }
        Compression::Zip => {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(bytes)?;
            Ok(encoder.finish()?)
        }
    }
}

fn decompress(algo: Compression, bytes: &[u8]) -> Result<Vec<u8>, ConfError> {
    let mut out = Vec::new();
    let result = match algo {
        Compression::Bz2 => bzip2::read::BzDecoder::new(bytes).read_to_end(&mut out),
        Compression::Zip => flate2::read::ZlibDecoder::new(bytes).read_to_end(&mut out),
    };
    result.map_err(|e| ConfError::InvalidBlobPayload(format!("{algo} stream: {e}")))?;
    Ok(out)
}
