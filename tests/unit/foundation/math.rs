use super::*;

#[test]
fn halves_round_down() {
    assert_eq!(round_half_down(853.5), 853.0);
    assert_eq!(round_half_down(607.5), 607.0);
    assert_eq!(round_half_down(-0.5), -1.0);
}

#[test]
fn non_halves_round_to_nearest() {
    assert_eq!(round_half_down(2133.333), 2133.0);
    assert_eq!(round_half_down(2133.6), 2134.0);
    assert_eq!(round_half_down(12.0), 12.0);
    assert_eq!(round_half_down_u32(-3.2), 0);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(200, 0), 0);
}
