//! Checked arithmetic for every ledger counter.
//!
//! Overflow and underflow never wrap: the enclosing instruction fails with
//! `ArithmeticOverflow` and nothing is written.

use anchor_lang::prelude::*;

use crate::errors::LaunchpadError;

pub trait SafeMath: Sized {
    fn safe_add(self, v: Self) -> Result<Self>;
    fn safe_sub(self, v: Self) -> Result<Self>;
    fn safe_mul(self, v: Self) -> Result<Self>;
}

macro_rules! impl_safe_math {
    ($type:ty) => {
        impl SafeMath for $type {
            fn safe_add(self, v: $type) -> Result<$type> {
                self.checked_add(v).ok_or_else(|| {
                    msg!("LAUNCHPAD: overflow in safe_add: {} + {}", self, v);
                    LaunchpadError::ArithmeticOverflow.into()
                })
            }

            fn safe_sub(self, v: $type) -> Result<$type> {
                self.checked_sub(v).ok_or_else(|| {
                    msg!("LAUNCHPAD: underflow in safe_sub: {} - {}", self, v);
                    LaunchpadError::ArithmeticOverflow.into()
                })
            }

            fn safe_mul(self, v: $type) -> Result<$type> {
                self.checked_mul(v).ok_or_else(|| {
                    msg!("LAUNCHPAD: overflow in safe_mul: {} * {}", self, v);
                    LaunchpadError::ArithmeticOverflow.into()
                })
            }
        }
    };
}

impl_safe_math!(u32);
impl_safe_math!(u64);
