use anyhow::{Context, Result};
use fmeta_envelope::Params;
use serde::Serialize;
use std::io::Write;

/// Split a request target into its path and decoded query parameters.
///
/// Repeated names keep every value in order of appearance. A name without
/// `=` gets an empty value.
pub fn split_target(target: &str) -> (String, Params) {
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };
    let query = query.split_once('#').map_or(query, |(q, _)| q);

    let mut params = Params::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(name))
            .or_default()
            .push(decode_component(value));
    }

    (decode_path(path), params)
}

/// Percent-decode one query component, reading `+` as a space.
///
/// Malformed escapes are kept literally; invalid UTF-8 is replaced.
pub fn decode_component(raw: &str) -> String {
    percent_decode(raw, true)
}

fn decode_path(raw: &str) -> String {
    percent_decode(raw, false)
}

fn percent_decode(raw: &str, plus_as_space: bool) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Serialize `value` as JSON, pretty-printed unless `compact`.
pub fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<Vec<u8>> {
    let bytes = if compact {
        serde_json::to_vec(value)
    } else {
        serde_json::to_vec_pretty(value)
    };
    bytes.context("failed to serialize response body")
}

/// Write `value` as JSON followed by a newline.
pub fn write_json<W, T>(writer: &mut W, value: &T, compact: bool) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let bytes = to_json(value, compact)?;
    writer.write_all(&bytes)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
