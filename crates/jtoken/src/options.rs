/// Configuration for a [`crate::Tokenizer`].
///
/// These are compile-time configuration *choices* expressed as a runtime
/// struct rather than build-time flags: the observable behavior they select
/// is what the tokenizer's contract specifies, not the mechanism used to
/// pick it.
///
/// # Examples
///
/// ```rust
/// use jtoken::{Options, Tokenizer};
///
/// let mut tokenizer = Tokenizer::<64>::new(Options {
///     strict: false,
///     ..Default::default()
/// });
/// let mut tokens = [jtoken::Token {
///     kind: jtoken::TokenKind::Primitive,
///     start: 0,
///     end: 0,
///     size: 0,
///     parent: None,
/// }; 4];
/// assert!(tokenizer.parse(b"01 ", &mut tokens).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Enforce strict JSON (RFC 8259): reject leading zeros in numbers (`01`)
    /// and reject more than one top-level value.
    ///
    /// When `false`, leading zeros are tolerated, and multiple top-level
    /// values are tolerated too: [`crate::Tokenizer::parse`] keeps tokenizing
    /// sibling root values for as long as the buffer has more to offer,
    /// rather than stopping after the first one completes.
    ///
    /// # Default
    ///
    /// `true`
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { strict: true }
    }
}
