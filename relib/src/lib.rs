//! A minimal, low-level implementation of rerun's standard library.
//!
//! Built for `wasm32-unknown-unknown` this crate yields `relib.wasm`, whose
//! `exponentiate` export is linked as `stdlib.pow`. The host runtime links the
//! same function natively when no prebuilt module is configured.

/// Raise `base` to `exp`, wrapping on overflow like the other i32 operations.
#[unsafe(no_mangle)]
pub extern "C" fn exponentiate(base: u32, exp: u32) -> u32 {
    base.wrapping_pow(exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_powers() {
        assert_eq!(exponentiate(2, 10), 1024);
        assert_eq!(exponentiate(665, 1), 665);
        assert_eq!(exponentiate(7, 0), 1);
        assert_eq!(exponentiate(0, 0), 1);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(exponentiate(2, 32), 0);
        assert_eq!(exponentiate(2, 33), 0);
        assert_eq!(exponentiate(3, 21), 3u32.wrapping_pow(21));
    }
}
