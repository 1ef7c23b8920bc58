//! Pulls the HTML artifact out of a raw model reply.
//!
//! Models are told to answer with exactly one fenced code block, but replies
//! routinely arrive with prose around the fence, several blocks, or no fence
//! at all. `extract` is total: it never fails, it only degrades to returning
//! the whole reply trimmed.

const FENCE: &str = "```";

/// Returns the trimmed interior of the first fenced code block, or the whole
/// input trimmed when no complete block exists.
pub fn extract(raw: &str) -> String {
    match first_fenced_block(raw) {
        Some(inner) => inner.trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Single forward scan, no backtracking: locate the first opening fence,
/// skip an optional language tag up to end of line, capture until the first
/// closing fence. An unterminated fence is not a block.
fn first_fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find(FENCE)?;
    let rest = &raw[open + FENCE.len()..];

    // A language tag occupies the remainder of the opening line. If that
    // stretch already holds the closing fence (single-line block), there is
    // no tag to skip.
    let body = match rest.find('\n') {
        Some(nl) if !rest[..nl].contains(FENCE) => &rest[nl + 1..],
        _ => rest,
    };

    let close = body.find(FENCE)?;
    Some(&body[..close])
}
