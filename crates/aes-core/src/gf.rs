//! GF(2^8) arithmetic over the AES polynomial x^8 + x^4 + x^3 + x + 1.
//!
//! Only the seven multipliers used by MixColumns and InvMixColumns are
//! supported. Each one is evaluated through its addition chain of `xtime`
//! doublings; anything else is rejected with [`AesError::UnsupportedMultiplier`].

use crate::error::{AesError, Result};

/// Low byte of the reduction polynomial 0x11b.
const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by `x` (i.e. {02}) in GF(2^8).
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// The closed set of multipliers appearing in the (inverse) MixColumns matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GfConstant {
    /// {01}
    One,
    /// {02}
    Two,
    /// {03}
    Three,
    /// {09}
    Nine,
    /// {0b}
    Eleven,
    /// {0d}
    Thirteen,
    /// {0e}
    Fourteen,
}

impl GfConstant {
    /// Every supported multiplier.
    pub const ALL: [GfConstant; 7] = [
        GfConstant::One,
        GfConstant::Two,
        GfConstant::Three,
        GfConstant::Nine,
        GfConstant::Eleven,
        GfConstant::Thirteen,
        GfConstant::Fourteen,
    ];

    /// Byte value of the constant.
    pub const fn value(self) -> u8 {
        match self {
            GfConstant::One => 0x01,
            GfConstant::Two => 0x02,
            GfConstant::Three => 0x03,
            GfConstant::Nine => 0x09,
            GfConstant::Eleven => 0x0b,
            GfConstant::Thirteen => 0x0d,
            GfConstant::Fourteen => 0x0e,
        }
    }

    /// Multiplies `byte` by this constant.
    #[inline]
    pub fn apply(self, byte: u8) -> u8 {
        let x2 = xtime(byte);
        match self {
            GfConstant::One => byte,
            GfConstant::Two => x2,
            GfConstant::Three => x2 ^ byte,
            _ => {
                let x4 = xtime(x2);
                let x8 = xtime(x4);
                match self {
                    GfConstant::Nine => x8 ^ byte,
                    GfConstant::Eleven => x8 ^ x2 ^ byte,
                    GfConstant::Thirteen => x8 ^ x4 ^ byte,
                    _ => x8 ^ x4 ^ x2,
                }
            }
        }
    }
}

impl TryFrom<u8> for GfConstant {
    type Error = AesError;

    fn try_from(value: u8) -> Result<Self> {
        GfConstant::ALL
            .into_iter()
            .find(|c| c.value() == value)
            .ok_or(AesError::UnsupportedMultiplier(value))
    }
}

/// Multiplies `byte` by `constant`, which must be one of the MixColumns multipliers.
pub fn mul(constant: u8, byte: u8) -> Result<u8> {
    GfConstant::try_from(constant).map(|c| c.apply(byte))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{arbitrary::any, proptest};

    fn gmul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        for _ in 0..8 {
            if b & 1 != 0 {
                product ^= a;
            }
            a = xtime(a);
            b >>= 1;
        }
        product
    }

    #[test]
    fn xtime_matches_fips_example() {
        // {57} * {02}, {04}, {08}, {10}
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x47), 0x8e);
        assert_eq!(xtime(0x8e), 0x07);
    }

    #[test]
    fn mul_rejects_unsupported_constants() {
        for c in 0u8..=255 {
            let supported = GfConstant::ALL.iter().any(|k| k.value() == c);
            match mul(c, 0x57) {
                Ok(_) => assert!(supported, "{c:#04x} accepted"),
                Err(err) => {
                    assert!(!supported);
                    assert_eq!(err, AesError::UnsupportedMultiplier(c));
                }
            }
        }
    }

    #[test]
    fn value_round_trips_through_try_from() {
        for c in GfConstant::ALL {
            assert_eq!(GfConstant::try_from(c.value()), Ok(c));
        }
    }

    proptest! {
        #[test]
        fn addition_chains_match_generic_multiply(b in any::<u8>()) {
            for c in GfConstant::ALL {
                assert_eq!(c.apply(b), gmul(c.value(), b));
            }
        }
    }
}
