use std::fmt::Debug;

pub use ::num::{Bounded, Num, NumCast, Signed, Zero};

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default {}
impl<T: ::num::PrimInt + Debug + Default> PrimInt for T {}

/// T values are non-negative primitive integers
pub trait PrimUInt: PrimInt + ::num::Unsigned {}

impl<T: PrimInt + ::num::Unsigned> PrimUInt for T {}

/// Alignment scores: signed, bounded numbers that can be constructed from sequence positions.
/// Both integers (i16, i32, i64) and floats (f32, f64) qualify.
pub trait Score: Num + Signed + Bounded + NumCast + PartialOrd + Copy + Debug + Default {
    /// Converts a sequence position (or a gap length) into the score domain.
    #[inline(always)]
    fn from_position(pos: usize) -> Option<Self> {
        <Self as NumCast>::from(pos)
    }
}

impl<T: Num + Signed + Bounded + NumCast + PartialOrd + Copy + Debug + Default> Score for T {}
