use subtle::ConstantTimeEq;

/// Digest comparison whose running time does not depend on where the
/// inputs first differ. Unequal lengths compare false.
#[inline]
pub fn digests_match(expected: &[u8], actual: &[u8]) -> bool {
    expected.ct_eq(actual).into()
}
