/// Derives a stable 64-bit seed from a drug name.
///
/// Mock fallbacks must be deterministic: repeated queries for the same
/// drug return the same synthetic data across calls and processes, so the
/// seed comes from an md5 of the normalized name rather than a thread RNG.
pub(crate) fn name_seed(name: &str) -> u64 {
    let digest = md5::compute(name.trim().to_lowercase().as_bytes());
    let d = digest.0;
    u64::from_le_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]])
}
