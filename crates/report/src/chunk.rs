//! Payload chunking for delivery
//!
//! The delivery channel caps message length, so oversized payloads are cut
//! into ordered chunks. The split is a pure character split, not section
//! aware: chunks post sequentially, so a section broken across two
//! messages still reads correctly.

/// Split a payload into chunks of at most `max_chunk` characters
///
/// Counts characters, not bytes. An empty payload yields no chunks;
/// concatenating the chunks reproduces the payload exactly.
pub fn split_for_delivery(payload: &str, max_chunk: usize) -> Vec<String> {
    let max_chunk = max_chunk.max(1);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for ch in payload.chars() {
        current.push(ch);
        len += 1;
        if len == max_chunk {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
