use std::fmt::Debug;
use std::sync::Arc;

/// A token type usable as a pattern or haystack element.
///
/// Tokens must be cloneable, totally ordered, and debug-printable.
/// The automaton never interprets a token beyond comparing it for equality
/// and ordering. String-like tokens may report themselves as empty, which
/// [`Automaton::add`](crate::Automaton::add) rejects.
pub trait Token: Clone + Ord + Debug {
    /// Returns true if this token carries no content.
    #[inline]
    fn is_empty_token(&self) -> bool {
        false
    }
}

macro_rules! impl_atomic_token {
    ($($t:ty),* $(,)?) => {
        $(impl Token for $t {})*
    };
}

impl_atomic_token!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, bool);

impl Token for String {
    #[inline]
    fn is_empty_token(&self) -> bool {
        self.is_empty()
    }
}

impl Token for &str {
    #[inline]
    fn is_empty_token(&self) -> bool {
        self.is_empty()
    }
}

impl Token for Box<str> {
    #[inline]
    fn is_empty_token(&self) -> bool {
        self.is_empty()
    }
}

impl Token for Arc<str> {
    #[inline]
    fn is_empty_token(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_tokens_are_never_empty() {
        assert!(!0u8.is_empty_token());
        assert!(!'\0'.is_empty_token());
        assert!(!0i64.is_empty_token());
        assert!(!false.is_empty_token());
    }

    #[test]
    fn string_tokens_report_emptiness() {
        assert!(String::new().is_empty_token());
        assert!(!String::from("word").is_empty_token());
        assert!("".is_empty_token());
        assert!(!"a".is_empty_token());
        assert!(Box::<str>::from("").is_empty_token());
        assert!(Arc::<str>::from("").is_empty_token());
        assert!(!Arc::<str>::from("x").is_empty_token());
    }
}
