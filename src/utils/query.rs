/// Percent-encodes a user-provided value for use as a URL path segment.
///
/// This is intentionally conservative: everything outside the RFC 3986
/// unreserved set is encoded, so drug names with spaces, slashes, or
/// punctuation cannot change the request path.
pub(crate) fn encode_path_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}
