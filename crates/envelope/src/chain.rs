use std::error::Error;

use crate::{catalog::ErrorCatalog, envelope::ChainLink, failure::Failure};

/// Causes deeper than this are dropped from the chain.
pub const MAX_CHAIN_LINKS: usize = 32;

const UUID_LEN: usize = 36;

/// First version-4 UUID embedded in `message`, if any.
pub fn find_correlation_id(message: &str) -> Option<&str> {
    let bytes = message.as_bytes();
    if bytes.len() < UUID_LEN {
        return None;
    }

    (0..=bytes.len() - UUID_LEN)
        .find(|&start| is_v4_uuid(&bytes[start..start + UUID_LEN]))
        .map(|start| &message[start..start + UUID_LEN])
}

// 8-4-4-4-12 hex groups, version nibble 4, variant nibble 8..=b.
fn is_v4_uuid(s: &[u8]) -> bool {
    if s.len() != UUID_LEN {
        return false;
    }
    for (i, &b) in s.iter().enumerate() {
        let ok = match i {
            8 | 13 | 18 | 23 => b == b'-',
            14 => b == b'4',
            19 => matches!(b, b'8' | b'9' | b'a' | b'b' | b'A' | b'B'),
            _ => matches!(b, b'0'..=b'9' | b'a'..=b'f'),
        };
        if !ok {
            return false;
        }
    }
    true
}

/// Message for one error in a chain. A [`Failure`] is rendered through
/// `catalog`, anything else through its `Display`.
pub fn describe_error(err: &(dyn Error + 'static), catalog: &ErrorCatalog) -> String {
    match err.downcast_ref::<Failure>() {
        Some(failure) => catalog.describe(failure.kind(), failure.args()),
        None => err.to_string(),
    }
}

/// Links for `cause` and every error beneath it, outermost first.
///
/// A [`Failure`] in the chain contributes its own exception id as the
/// link's correlation id; any other error is scanned for an embedded id.
pub fn exception_chain(cause: &(dyn Error + 'static), catalog: &ErrorCatalog) -> Vec<ChainLink> {
    let mut links = Vec::new();
    let mut next = Some(cause);

    while let Some(err) = next {
        if links.len() == MAX_CHAIN_LINKS {
            break;
        }

        let message = describe_error(err, catalog);
        let correlation_id = match err.downcast_ref::<Failure>() {
            Some(failure) => Some(failure.exception_id().to_string()),
            None => find_correlation_id(&message).map(str::to_owned),
        };
        links.push(ChainLink {
            correlation_id,
            message,
        });

        next = err.source();
    }

    links
}

/// Display text of every error from `err` down, joined for log output.
pub fn describe_chain(err: &(dyn Error + 'static), catalog: &ErrorCatalog) -> String {
    let mut out = describe_error(err, catalog);
    let mut next = err.source();
    let mut depth = 1;
    while let Some(e) = next {
        if depth == MAX_CHAIN_LINKS {
            out.push_str(": ...");
            break;
        }
        out.push_str(": ");
        out.push_str(&describe_error(e, catalog));
        next = e.source();
        depth += 1;
    }
    out
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
