//! URL-safe base64 shared by every codec in this crate.
//!
//! Output is padded with `=`, matching existing issuers. Input is accepted
//! with or without padding so hand-trimmed strings still decode.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::CodecError;

const URL_SAFE_PAD_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub(crate) fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_PAD_INDIFFERENT.encode(bytes)
}

pub(crate) fn decode(field: &'static str, s: &str) -> Result<Vec<u8>, CodecError> {
    URL_SAFE_PAD_INDIFFERENT
        .decode(s)
        .map_err(|source| CodecError::Encoding { field, source })
}
