/*
    Rational integration tests
*/

use num_traits::ToPrimitive;

use exact_num::int128::Int128;
use exact_num::rational::Rational;
use exact_num::scaled::ScaledInt64;
use exact_num::NumericError;

fn rat(n: i64, d: i64) -> Rational {
    Rational::new(n, d).unwrap()
}

#[test]
fn normalization_reduces_and_rescales() {
    assert_eq!(rat(5000, 1250), rat(4, 1));
    assert_eq!(rat(5000, 1250).into_parts(), (4, 1, 0, false));
    assert_eq!(rat(2, 4).into_parts(), (1, 2, 0, false));
    assert_eq!(rat(5000, 1).into_parts(), (5, 1, 3, false));
    assert_eq!(rat(1, 200).into_parts(), (1, 2, -2, false));
    assert_eq!(rat(-6, 9).into_parts(), (2, 3, 0, true));
    assert_eq!(rat(3, -7).into_parts(), (3, 7, 0, true));
    assert_eq!(rat(-3, -7).into_parts(), (3, 7, 0, false));
    assert_eq!(rat(0, 5).into_parts(), (0, 1, 0, false));
    assert!(matches!(Rational::new(1, 0), Err(NumericError::Undefined(_))));
}

#[test]
fn exact_addition_and_subtraction() {
    assert_eq!(rat(1, 2) + rat(1, 3), rat(5, 6));
    assert_eq!(rat(1, 2) - rat(1, 3), rat(1, 6));
    assert_eq!(rat(1, 2) + rat(-1, 2), Rational::ZERO);
    assert_eq!(rat(7, 10) + rat(3, 10), Rational::ONE);

    // exponents align on the smaller scale
    let ten = Rational::new_scaled(1, 1, 1).unwrap();
    assert_eq!(ten + rat(5, 1), rat(15, 1));
    let tiny = Rational::new_scaled(1, 1, -3).unwrap();
    assert_eq!(ten + tiny, Rational::new_scaled(10001, 1, -3).unwrap());
}

#[test]
fn negligible_operands_are_dropped() {
    let huge = Rational::new_scaled(1, 1, 30).unwrap();
    assert_eq!(huge + Rational::ONE, huge);
    assert_eq!(Rational::ONE + huge, huge);
    // within 64-bit precision the small operand still counts
    let near = Rational::new_scaled(1, 1, 15).unwrap();
    assert_ne!(near + Rational::ONE, near);
    assert_eq!(
        (near + Rational::ONE).into_parts(),
        (1_000_000_000_000_001, 1, 0, false)
    );
}

#[test]
fn exact_multiplication_and_division() {
    assert_eq!(rat(2, 3) * rat(3, 4), rat(1, 2));
    assert_eq!(rat(2, 3) / rat(2, 3), Rational::ONE);
    assert_eq!(rat(-2, 3) * rat(3, 2), rat(-1, 1));
    assert_eq!(rat(5, 7) / rat(10, 7), rat(1, 2));
    assert!(matches!(
        rat(1, 2).checked_div(&Rational::ZERO),
        Err(NumericError::Undefined(_))
    ));

    // scales add under multiplication
    let a = Rational::new_scaled(3, 1, 5).unwrap();
    let b = Rational::new_scaled(7, 1, -2).unwrap();
    assert_eq!((a * b).into_parts(), (21, 1, 3, false));
}

#[test]
fn reciprocal_swaps_fields() {
    let r = Rational::new_scaled(3, 7, 4).unwrap();
    assert_eq!(r.recip().unwrap().into_parts(), (7, 3, -4, false));
    let n = Rational::new_scaled(-3, 7, 4).unwrap();
    assert_eq!(n.recip().unwrap().into_parts(), (7, 3, -4, true));
    assert!(matches!(
        Rational::ZERO.recip(),
        Err(NumericError::Undefined(_))
    ));
}

#[test]
fn powers() {
    assert_eq!(rat(2, 3).checked_pow(3).unwrap(), rat(8, 27));
    assert_eq!(rat(2, 3).checked_pow(-2).unwrap(), rat(9, 4));
    assert_eq!(rat(5, 8).checked_pow(0).unwrap(), Rational::ONE);
    assert_eq!(Rational::ZERO.checked_pow(0).unwrap(), Rational::ONE);
    assert_eq!(Rational::ZERO.checked_pow(3).unwrap(), Rational::ZERO);
    assert!(matches!(
        Rational::ZERO.checked_pow(-1),
        Err(NumericError::Undefined(_))
    ));
    assert_eq!(rat(-2, 1).checked_pow(3).unwrap(), rat(-8, 1));
    assert_eq!(rat(-2, 1).checked_pow(4).unwrap(), rat(16, 1));
    // exact squaring up to the 64-bit edge
    assert_eq!(rat(2, 1).checked_pow(62).unwrap(), rat(1i64 << 62, 1));
}

#[test]
fn power_escalates_to_widened_squaring() {
    // 3^50 = 717897987691852588770249 passes 64 bits; the widened path
    // keeps the 19 leading digits in the reduced form
    let v = rat(3, 1).checked_pow(50).unwrap();
    assert_eq!(v.into_parts(), (7_178_979_876_918_525_887, 1, 5, false));
}

#[test]
fn ordering_across_scales() {
    let ten = Rational::new_scaled(1, 1, 1).unwrap();
    assert!(ten > rat(9, 1));
    assert!(rat(-1, 2) < rat(1, 3));
    assert!(rat(1, 3) < rat(1, 2));
    assert!(rat(-1, 2) < rat(-1, 3));

    // equal values may normalize to different triples
    assert_eq!(rat(2, 5), Rational::new_scaled(4, 1, -1).unwrap());

    // a forced alignment overflow decides far-apart scales
    let far = Rational::new_scaled(3, 7, 60).unwrap();
    assert!(far > rat(123_456_789, 11));
    assert!(-far < rat(123_456_789, 11));

    let mut values = vec![rat(1, 2), rat(-3, 4), Rational::ZERO, ten, rat(2, 3)];
    values.sort();
    assert_eq!(
        values,
        vec![rat(-3, 4), Rational::ZERO, rat(1, 2), rat(2, 3), ten]
    );
}

#[test]
fn display_round_trips() {
    for text in ["5/6", "-7/2", "3", "157/50e-2", "-1", "9e4"] {
        let v: Rational = text.parse().unwrap();
        assert_eq!(
            v.to_string().parse::<Rational>().unwrap(),
            v,
            "round trip of {text}"
        );
    }
    assert_eq!(rat(5, 6).to_string(), "5/6");
    assert_eq!(
        Rational::new_scaled(-5, 6, -1).unwrap().to_string(),
        "-5/6e-1"
    );
    assert_eq!(rat(-4, 1).to_string(), "-4");
    assert_eq!(Rational::ZERO.to_string(), "0");
}

#[test]
fn parse_grammar() {
    assert_eq!(
        "3.14".parse::<Rational>().unwrap(),
        Rational::new_scaled(314, 1, -2).unwrap()
    );
    assert_eq!("(2/3)".parse::<Rational>().unwrap(), rat(2, 3));
    assert_eq!("-(2/3)".parse::<Rational>().unwrap(), rat(-2, 3));
    assert_eq!("(-2/3)".parse::<Rational>().unwrap(), rat(-2, 3));
    assert_eq!(
        "+1.5e3".parse::<Rational>().unwrap(),
        Rational::new_scaled(15, 1, 2).unwrap()
    );
    assert_eq!(
        "2/3e-2".parse::<Rational>().unwrap(),
        Rational::new_scaled(2, 3, -2).unwrap()
    );
    assert_eq!(".5".parse::<Rational>().unwrap(), rat(1, 2));
    assert_eq!("25.".parse::<Rational>().unwrap(), rat(25, 1));
}

#[test]
fn parse_failures() {
    let malformed = [
        "", "abc", "(2/3", "2/3)", "--3", "1/", "/3", "1.2.3", "1e", "1e+", "3x", "1e5/2",
    ];
    for text in malformed {
        assert!(
            matches!(text.parse::<Rational>(), Err(NumericError::Format(_))),
            "{text:?} should be malformed"
        );
    }
    assert!(matches!(
        "1/0".parse::<Rational>(),
        Err(NumericError::Undefined(_))
    ));
    assert!(matches!(
        "99999999999999999999".parse::<Rational>(),
        Err(NumericError::Overflow(_))
    ));
}

#[test]
fn truncation_toward_zero() {
    assert_eq!(rat(7, 2).trunc_i64().unwrap(), 3);
    assert_eq!(rat(-7, 2).trunc_i64().unwrap(), -3);
    assert_eq!(
        Rational::new_scaled(1, 3, 1).unwrap().trunc_i64().unwrap(),
        3
    );
    assert_eq!(Rational::ZERO.trunc_i64().unwrap(), 0);

    // the power-of-ten table ends at 10^18
    assert!(matches!(
        Rational::new_scaled(1, 1, 19).unwrap().trunc_i64(),
        Err(NumericError::Overflow(_))
    ));
    assert!(matches!(
        Rational::new_scaled(1, 1, -19).unwrap().trunc_i64(),
        Err(NumericError::Overflow(_))
    ));
    // 9.9e18 is in scale range but past i64
    assert!(matches!(
        Rational::new_scaled(99, 1, 17).unwrap().trunc_i64(),
        Err(NumericError::Overflow(_))
    ));
}

#[test]
fn int128_interop() {
    let r = Rational::new_scaled(1, 1, 20).unwrap();
    assert_eq!(r.to_int128().unwrap(), Int128::pow10(20).unwrap());
    assert_eq!(
        Int128::try_from(&rat(-22, 7)).unwrap(),
        Int128::from_i64(-3)
    );
    let back = Rational::try_from(&Int128::from_i64(250)).unwrap();
    assert_eq!(back.into_parts(), (25, 1, 1, false));
}

#[test]
fn native_conversions() {
    assert_eq!(Rational::from(12i32).into_parts(), (12, 1, 0, false));
    assert_eq!(Rational::from(-400i32).into_parts(), (4, 1, 2, true));
    assert_eq!(
        Rational::try_from(123_000i64).unwrap().into_parts(),
        (123, 1, 3, false)
    );
    assert!(matches!(
        Rational::try_from(i64::MIN),
        Err(NumericError::Overflow(_))
    ));
    assert_eq!(rat(1, 2).as_f64(), 0.5);
    assert_eq!(rat(-1, 4).to_f64(), Some(-0.25));
    assert_eq!(rat(7, 2).to_i64(), Some(3));
    assert_eq!(rat(-7, 2).to_u64(), None);
}

#[test]
fn from_parts_round_trip() {
    let r = Rational::from_parts(21, 14, 2, true).unwrap();
    assert_eq!(r.into_parts(), (3, 2, 2, true));
    assert!(matches!(
        Rational::from_parts(-3, 2, 0, false),
        Err(NumericError::Format(_))
    ));
    assert!(matches!(
        Rational::from_parts(3, 0, 0, false),
        Err(NumericError::Undefined(_))
    ));
}

#[test]
fn sign_predicates_and_absolute_value() {
    assert_eq!(rat(-3, 4).abs(), rat(3, 4));
    assert_eq!(rat(3, 4).abs(), rat(3, 4));
    assert_eq!(rat(-3, 4).signum(), -1);
    assert_eq!(rat(3, 4).signum(), 1);
    assert_eq!(Rational::ZERO.signum(), 0);
    assert!(!Rational::ZERO.is_negative());
    assert!(rat(-1, 9).is_negative());
    assert!(Rational::ONE.is_one());
    assert!(!Rational::new_scaled(1, 1, 1).unwrap().is_one());
    assert_eq!(-rat(2, 7), rat(-2, 7));
    assert_eq!(-Rational::ZERO, Rational::ZERO);
}

#[test]
fn scaled_reduction_truncates_toward_zero() {
    let exact = ScaledInt64::reduce(&Int128::from_i64(123), 0).unwrap();
    assert_eq!((exact.value, exact.scale), (123, 0));

    let wide = ScaledInt64::reduce(&Int128::pow10(25).unwrap(), 0).unwrap();
    assert_eq!((wide.value, wide.scale), (1_000_000_000_000_000_000, 7));

    // the 39-digit minimum keeps its 19 leading digits
    let negative = ScaledInt64::reduce(&Int128::MIN, 3).unwrap();
    assert_eq!(negative.value, -1_701_411_834_604_692_317);
    assert_eq!(negative.scale, 23);
}
