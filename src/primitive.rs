//! Key-domain rules: bit-pattern identity and hash mixing for primitives.
//!
//! Keys are compared by raw bit pattern, never numerically. For floating
//! domains this makes `-0.0` and `+0.0` distinct keys and lets a NaN match
//! only a bit-identical NaN.

use core::fmt::Debug;

/// A primitive usable as a key or a value.
pub trait Primitive: Copy + Debug + Send + Sync + 'static {
    /// The domain zero. Returned by `get` for absent keys unless a different
    /// default is configured.
    const ZERO: Self;

    /// Raw bit pattern, zero-extended to 64 bits. Floats are not canonicalized.
    fn to_bits(self) -> u64;

    /// Avalanche-mixed hash used to pick the first probe position.
    fn mix(self) -> u32;

    /// Bit-pattern equality.
    #[inline]
    fn same(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }

    /// Whether this is the all-zero bit pattern of the domain.
    #[inline]
    fn is_zero(self) -> bool {
        self.to_bits() == 0
    }
}

const PHI_32: u32 = 0x9E37_79B9;
const PHI_64: u64 = 0x9E37_79B9_7F4A_7C15;

#[inline]
pub(crate) fn mix32(x: u32) -> u32 {
    let h = x.wrapping_mul(PHI_32);
    h ^ (h >> 16)
}

#[inline]
pub(crate) fn mix64(x: u64) -> u32 {
    let mut h = x.wrapping_mul(PHI_64);
    h ^= h >> 32;
    (h ^ (h >> 16)) as u32
}

macro_rules! narrow_int {
    ($($t:ty => $u:ty),* $(,)?) => {$(
        impl Primitive for $t {
            const ZERO: Self = 0;
            #[inline]
            fn to_bits(self) -> u64 {
                self as $u as u64
            }
            #[inline]
            fn mix(self) -> u32 {
                // Sign-extend like an int-widened hash code.
                mix32(self as i32 as u32)
            }
        }
    )*};
}

narrow_int!(i8 => u8, i16 => u16, i32 => u32, u8 => u8, u16 => u16, u32 => u32);

macro_rules! wide_int {
    ($($t:ty),* $(,)?) => {$(
        impl Primitive for $t {
            const ZERO: Self = 0;
            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }
            #[inline]
            fn mix(self) -> u32 {
                mix64(self as u64)
            }
        }
    )*};
}

wide_int!(i64, u64, isize, usize);

impl Primitive for f32 {
    const ZERO: Self = 0.0;
    #[inline]
    fn to_bits(self) -> u64 {
        f32::to_bits(self) as u64
    }
    #[inline]
    fn mix(self) -> u32 {
        mix32(f32::to_bits(self))
    }
}

impl Primitive for f64 {
    const ZERO: Self = 0.0;
    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }
    #[inline]
    fn mix(self) -> u32 {
        let bits = f64::to_bits(self);
        mix32((bits ^ (bits >> 32)) as u32)
    }
}

impl Primitive for char {
    const ZERO: Self = '\0';
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
    #[inline]
    fn mix(self) -> u32 {
        mix32(self as u32)
    }
}

impl Primitive for bool {
    const ZERO: Self = false;
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
    #[inline]
    fn mix(self) -> u32 {
        // Same constants as a boxed boolean hash code.
        if self {
            1231
        } else {
            1237
        }
    }
}
