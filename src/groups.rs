/// Number of bits packed into one bitmap group.
pub const BYTESIZE: usize = 8;

/// Calculates how many bitmap groups are needed to hold the given number of bits.
///
/// # Examples
///
/// ```rust
/// use bitarena::group_count;
///
/// assert_eq!(group_count!(1), 1);
/// assert_eq!(group_count!(8), 1);
/// assert_eq!(group_count!(13), 2);
/// assert_eq!(group_count!(64), 8);
/// ```
#[macro_export]
macro_rules! group_count {
  ($bits:expr) => {
    ($bits + $crate::groups::BYTESIZE - 1) / $crate::groups::BYTESIZE
  };
}
