pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// `::` is a cast in some dialects, never a named placeholder.
pub(super) fn is_double_colon(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx + 1) == Some(&b':') || (idx > 0 && bytes[idx - 1] == b':')
}

/// Quote characters are escaped by doubling them.
pub(super) fn is_doubled(bytes: &[u8], idx: usize, quote: u8) -> bool {
    bytes.get(idx + 1) == Some(&quote)
}
