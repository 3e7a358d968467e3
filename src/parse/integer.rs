//! Overflow-checked integer parsing for every width and signedness
//!
//! A token is an optional `-`, an optional base prefix (`0x`/`0X` hex, `0b`
//! binary, a leading `0` octal) and the digits. Digits are accumulated into
//! the unsigned type of the same width with checked arithmetic, then the
//! magnitude is range checked against the target before the sign is applied.

use num_traits::{NumCast, PrimInt, Unsigned};

use super::patterns::INTEGER;
use super::FromArg;
use crate::error::IncorrectType;

/// The pieces of an integer token
struct Literal<'a> {
    negative: bool,
    radix: u32,
    digits: &'a str,
}

impl<'a> Literal<'a> {
    fn split(text: &'a str) -> Option<Self> {
        let caps = INTEGER.captures(text)?;
        let radix = match caps.get(2).map(|m| m.as_str()) {
            Some("0x" | "0X") => 16,
            Some("0b") => 2,
            Some("0") => 8,
            _ => 10,
        };
        Some(Self {
            negative: caps.get(1).is_some(),
            radix,
            digits: caps.get(3)?.as_str(),
        })
    }

    /// Accumulate the digits, `None` on a bad digit or on overflow of `U`
    fn magnitude<U: PrimInt + Unsigned>(&self) -> Option<U> {
        let base = <U as NumCast>::from(self.radix)?;
        self.digits.chars().try_fold(U::zero(), |acc, ch| {
            let digit = <U as NumCast>::from(ch.to_digit(self.radix)?)?;
            acc.checked_mul(&base)?.checked_add(&digit)
        })
    }
}

macro_rules! unsigned_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromArg for $ty {
                fn type_name() -> String {
                    stringify!($ty).to_string()
                }

                fn from_arg(text: &str) -> Result<Self, IncorrectType> {
                    let fail = || IncorrectType::new(text, stringify!($ty));
                    let literal = Literal::split(text).ok_or_else(fail)?;
                    let magnitude = literal.magnitude::<$ty>().ok_or_else(fail)?;
                    if literal.negative {
                        return Err(fail());
                    }
                    Ok(magnitude)
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! signed_arg {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl FromArg for $ty {
                fn type_name() -> String {
                    stringify!($ty).to_string()
                }

                fn from_arg(text: &str) -> Result<Self, IncorrectType> {
                    let fail = || IncorrectType::new(text, stringify!($ty));
                    let literal = Literal::split(text).ok_or_else(fail)?;
                    let magnitude = literal.magnitude::<$unsigned>().ok_or_else(fail)?;

                    let limit = if literal.negative {
                        <$ty>::MIN.unsigned_abs()
                    } else {
                        <$ty>::MAX as $unsigned
                    };
                    if magnitude > limit {
                        return Err(fail());
                    }

                    if !literal.negative {
                        Ok(magnitude as $ty)
                    } else if magnitude == 0 {
                        Ok(0)
                    } else {
                        // magnitude - 1 always fits, so MIN is reachable without overflow
                        Ok(-((magnitude - 1) as $ty) - 1)
                    }
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

unsigned_arg!(u8, u16, u32, u64, u128, usize);

signed_arg!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn fails<T: FromArg + std::fmt::Debug>(text: &str) {
        let err = parse::<T>(text).expect_err(text);
        assert_eq!(err.token, text);
        assert_eq!(err.type_name, T::type_name());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse::<i32>("0").unwrap(), 0);
        assert_eq!(parse::<i32>("-0").unwrap(), 0);
        assert_eq!(parse::<i32>("42").unwrap(), 42);
        assert_eq!(parse::<i32>("-42").unwrap(), -42);
        assert_eq!(parse::<u64>("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(parse::<u32>("0x1F").unwrap(), 31);
        assert_eq!(parse::<u32>("0Xff").unwrap(), 255);
        assert_eq!(parse::<u32>("0b101").unwrap(), 5);
        assert_eq!(parse::<u32>("017").unwrap(), 15);
        assert_eq!(parse::<u32>("00").unwrap(), 0);
        assert_eq!(parse::<i16>("-0x8000").unwrap(), i16::MIN);
        assert_eq!(parse::<i8>("-0b10000000").unwrap(), i8::MIN);
    }

    #[test]
    fn test_invalid_digits_for_base() {
        fails::<u32>("08");
        fails::<u32>("0b102");
        fails::<u32>("0x");
        fails::<u32>("0b");
        fails::<u32>("0xfg");
        fails::<u32>("12a");
        fails::<i32>("+1");
        fails::<i32>("");
        fails::<i32>("--1");
        fails::<i32>(" 1");
    }

    #[test]
    fn test_unsigned_rejects_sign() {
        fails::<u8>("-1");
        fails::<u8>("-0");
        fails::<usize>("-0x1");
    }

    #[test]
    fn test_limits_every_width() {
        macro_rules! check {
            ($($ty:ty),*) => {
                $(
                    assert_eq!(parse::<$ty>(&<$ty>::MAX.to_string()).unwrap(), <$ty>::MAX);
                    assert_eq!(parse::<$ty>(&<$ty>::MIN.to_string()).unwrap(), <$ty>::MIN);
                    let above = (<$ty>::MAX as u128 + 1).to_string();
                    fails::<$ty>(&above);
                )*
            };
        }
        check!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

        assert_eq!(parse::<u128>(&u128::MAX.to_string()).unwrap(), u128::MAX);
        assert_eq!(parse::<i128>(&i128::MIN.to_string()).unwrap(), i128::MIN);
        assert_eq!(parse::<i128>(&i128::MAX.to_string()).unwrap(), i128::MAX);
        fails::<u128>("340282366920938463463374607431768211456");
        fails::<i128>("170141183460469231731687303715884105728");
        fails::<i128>("-170141183460469231731687303715884105729");
    }

    #[test]
    fn test_below_minimum() {
        macro_rules! check {
            ($($ty:ty),*) => {
                $(
                    fails::<$ty>(&(<$ty>::MIN as i128 - 1).to_string());
                    fails::<$ty>(&format!("-{:#x}", <$ty>::MIN.unsigned_abs() as u128 + 1));
                )*
            };
        }
        check!(i8, i16, i32, i64, isize);

        fails::<i128>("-170141183460469231731687303715884105729");
        fails::<i128>("-0x80000000000000000000000000000001");
        fails::<i8>("-0x81");
    }

    #[test]
    fn test_overflow_does_not_wrap() {
        fails::<u8>("256");
        fails::<u8>("0x100");
        fails::<u8>("1000");
        fails::<u16>("0b10000000000000000");
        fails::<u32>("99999999999999999999");
    }

    /// Sign and magnitude of any integer, for building literals
    fn sign_and_magnitude<T: PrimInt>(x: T) -> (&'static str, u128) {
        match x.to_u128() {
            Some(m) => ("", m),
            None => ("-", x.to_i128().map(i128::unsigned_abs).unwrap_or_default()),
        }
    }

    fn round_trips<T: FromArg + PrimInt + std::fmt::Debug>(x: T) {
        let (sign, m) = sign_and_magnitude(x);
        for text in [
            format!("{sign}{m}"),
            format!("{sign}{m:#x}"),
            format!("{sign}0X{m:X}"),
            format!("{sign}0{m:o}"),
            format!("{sign}{m:#b}"),
        ] {
            assert_eq!(parse::<T>(&text).unwrap(), x, "{text}");
        }
    }

    #[test]
    fn test_round_trip_all_bases() {
        macro_rules! check {
            ($($ty:ty),*) => {
                $(
                    let step = <$ty>::MAX / 61;
                    let mut x = <$ty>::MIN;
                    loop {
                        round_trips(x);
                        match x.checked_add(step) {
                            Some(next) => x = next,
                            None => break,
                        }
                    }
                    round_trips(<$ty>::MAX);
                    round_trips(0 as $ty);
                )*
            };
        }
        check!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
    }

    #[test]
    fn test_every_i8() {
        for x in i8::MIN..=i8::MAX {
            assert_eq!(parse::<i8>(&x.to_string()).unwrap(), x);
        }
        for x in u8::MIN..=u8::MAX {
            assert_eq!(parse::<u8>(&format!("{x:#x}")).unwrap(), x);
        }
    }
}
