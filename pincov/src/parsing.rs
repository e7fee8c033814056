//! Coverage log line decoding
//!
//! Both log kinds are colon-delimited text. Addresses and block sizes are
//! hexadecimal, counts are decimal:
//!
//! ```text
//! routines: address:symbolToken:callCount
//! blocks:   address:size:instructionCount:symbolToken:callCount
//! ```
//!
//! Comment lines (`#...`) and lines with too few fields are skipped. A field
//! that is present but not a number is an error.

use crate::domain::{BlockRecord, LogRecord, RecordError, RecordKind, RoutineRecord};
use std::io::{self, BufRead};

const ROUTINE_FIELDS: usize = 3;
const BLOCK_FIELDS: usize = 5;

/// Decode a line of the given kind.
///
/// # Errors
/// Returns [`RecordError`] if a numeric field cannot be parsed.
pub fn parse_line(kind: RecordKind, line: &str) -> Result<Option<LogRecord>, RecordError> {
    match kind {
        RecordKind::Routines => parse_routine_line(line),
        RecordKind::Blocks => parse_block_line(line),
    }
}

/// Decode `address:symbolToken:callCount`.
///
/// # Errors
/// Returns [`RecordError`] if the address or call count is malformed.
pub fn parse_routine_line(line: &str) -> Result<Option<LogRecord>, RecordError> {
    let Some(fields) = split_fields(line, ROUTINE_FIELDS) else {
        return Ok(None);
    };

    Ok(Some(LogRecord::Routine(RoutineRecord {
        address: parse_hex(fields[0], "address")?,
        token: fields[1].to_string(),
        calls: parse_decimal(fields[2], "call count")?,
    })))
}

/// Decode `address:size:instructionCount:symbolToken:callCount`.
///
/// # Errors
/// Returns [`RecordError`] if any numeric field is malformed.
pub fn parse_block_line(line: &str) -> Result<Option<LogRecord>, RecordError> {
    let Some(fields) = split_fields(line, BLOCK_FIELDS) else {
        return Ok(None);
    };

    let size = parse_hex(fields[1], "block size")?;
    let size = u32::try_from(size).map_err(|_| RecordError::InvalidHex {
        field: "block size",
        value: fields[1].to_string(),
    })?;

    Ok(Some(LogRecord::Block(BlockRecord {
        address: parse_hex(fields[0], "address")?,
        size,
        instructions: parse_decimal(fields[2], "instruction count")?,
        token: fields[3].to_string(),
        calls: parse_decimal(fields[4], "call count")?,
    })))
}

/// Parse a hexadecimal number. A `0x` prefix and surrounding whitespace are
/// accepted.
///
/// # Errors
/// Returns [`RecordError::InvalidHex`] naming `field`.
pub fn parse_hex(text: &str, field: &'static str) -> Result<u64, RecordError> {
    let trimmed = text.trim();
    let digits =
        trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    u64::from_str_radix(digits, 16)
        .map_err(|_| RecordError::InvalidHex { field, value: text.to_string() })
}

fn parse_decimal(text: &str, field: &'static str) -> Result<u64, RecordError> {
    text.trim().parse().map_err(|_| RecordError::InvalidDecimal { field, value: text.to_string() })
}

/// Lines of `reader` without their terminators.
///
/// Logs are not guaranteed to be UTF-8 (paths in the local code page), so
/// invalid sequences are replaced instead of failing the read.
pub fn lossy_lines<R: BufRead>(mut reader: R) -> impl Iterator<Item = io::Result<String>> {
    let mut buf = Vec::new();
    std::iter::from_fn(move || {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                Some(Ok(line.trim_end_matches(['\r', '\n']).to_string()))
            }
            Err(e) => Some(Err(e)),
        }
    })
}

/// Split a line into fields, or `None` if it is a comment or too short.
fn split_fields(line: &str, required: usize) -> Option<Vec<&str>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.starts_with('#') {
        return None;
    }
    let fields: Vec<&str> = line.split(':').collect();
    (fields.len() >= required).then_some(fields)
}
