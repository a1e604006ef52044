/// Escapes text for safe inclusion in HTML element content or quoted
/// attribute values.
///
/// Uses `ammonia::clean_text`, which entity-encodes every character that
/// could open markup, so model output and uploaded text are always shown as
/// plain text.
pub fn escape(input: &str) -> String {
    ammonia::clean_text(input)
}
