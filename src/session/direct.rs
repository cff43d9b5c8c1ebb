/// Prefix marking synthesized direct-conversation ids; such entries are
/// never listed in the public catalog.
pub const DIRECT_PREFIX: &str = "dm_";

/// Deterministic conversation id for a user pair: the lexicographically
/// sorted ids joined under the prefix, so both participants compute the
/// same id regardless of who initiates.
pub fn direct_conversation_id(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{DIRECT_PREFIX}{first}_{second}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_symmetric_in_its_arguments() {
        assert_eq!(
            direct_conversation_id("me", "u7"),
            direct_conversation_id("u7", "me")
        );
    }

    #[test]
    fn id_sorts_the_pair() {
        assert_eq!(direct_conversation_id("u7", "me"), "dm_me_u7");
    }
}
