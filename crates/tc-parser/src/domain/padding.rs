//! Value-padding sub-format.
//!
//! Wire layout: `[tag, version]` followed by one 3-byte record per entry:
//! `[output_index, padding_low, padding_high]` with the padding value as a
//! little-endian 16-bit unsigned integer. One byte covers every possible
//! output index; two bytes are sufficient to cover the dust threshold.

use crate::domain::errors::PaddingError;
use shared_types::OpReturnType;

/// Format version written into byte 1 of every padding payload.
pub const PADDING_FORMAT_VERSION: u8 = 1;

/// Encoder/decoder for the padding payload.
pub struct PaddingCodec;

impl PaddingCodec {
    /// A payload is decodable iff it holds the 2-byte header plus a whole
    /// number of non-empty 3-byte records.
    pub fn is_valid(data: &[u8]) -> bool {
        data.len() > 2 && (data.len() - 2) % 3 == 0
    }

    /// Encode `(output_index, padding_value)` pairs.
    ///
    /// Values outside `[0, 65535]` are rejected upfront; nothing is ever
    /// silently truncated.
    pub fn encode(pairs: &[(u8, i64)]) -> Result<Vec<u8>, PaddingError> {
        let mut out = Vec::with_capacity(2 + pairs.len() * 3);
        out.push(OpReturnType::ValuePadding.tag());
        out.push(PADDING_FORMAT_VERSION);

        for &(output_index, padding) in pairs {
            if padding > 65535 {
                return Err(PaddingError::ValueTooLarge { value: padding });
            }
            if padding < 0 {
                return Err(PaddingError::ValueNegative { value: padding });
            }
            out.push(output_index);
            out.push((padding & 0xff) as u8);
            out.push(((padding >> 8) & 0xff) as u8);
        }
        Ok(out)
    }

    pub fn encode_single(output_index: u8, padding: i64) -> Result<Vec<u8>, PaddingError> {
        Self::encode(&[(output_index, padding)])
    }

    /// Padding value declared for `output_index`, scanning records in order
    /// and returning the first match. Absence of a record (or an invalid
    /// payload) means "no padding declared" and yields 0.
    pub fn padding_for_index(data: &[u8], output_index: u8) -> u16 {
        if !Self::is_valid(data) {
            return 0;
        }
        let mut i = 2;
        while i + 2 < data.len() {
            if data[i] == output_index {
                return u16::from_le_bytes([data[i + 1], data[i + 2]]);
            }
            i += 3;
        }
        0
    }
}
