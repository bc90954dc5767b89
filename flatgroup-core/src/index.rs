use std::fmt::{Debug, Display};

use num_traits::{NumCast, PrimInt, ToPrimitive};

/// Integer type usable as an entry of the offset table.
///
/// Blanket-implemented for every primitive integer. Signed types are accepted
/// so offsets can be shared with Arrow `List` (`i32`) and `LargeList` (`i64`)
/// arrays; negative offsets never convert to a position.
pub trait OffsetIndex: PrimInt + Debug + Display + Send + Sync + 'static {
    /// Converts the offset to a buffer position, `None` if negative or too large.
    fn to_position(self) -> Option<usize> {
        self.to_usize()
    }

    /// Converts a buffer position to an offset, `None` if it does not fit.
    fn from_position(position: usize) -> Option<Self> {
        <Self as NumCast>::from(position)
    }

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<I> OffsetIndex for I where I: PrimInt + Debug + Display + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_within_range() {
        assert_eq!(7u32.to_position(), Some(7));
        assert_eq!(u8::from_position(255), Some(255u8));
        assert_eq!(i32::from_position(12), Some(12i32));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!((-1i64).to_position(), None);
        assert_eq!(u8::from_position(256), None);
        assert_eq!(i32::from_position(usize::MAX), None);
    }

    #[test]
    fn type_name_is_primitive_name() {
        assert_eq!(<u16 as OffsetIndex>::type_name(), "u16");
    }
}
