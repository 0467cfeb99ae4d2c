use std::{
    fmt,
    fmt::{Debug, Display},
};

/// An API credential. The token is only reachable via [`Secret::reveal`]; both `Debug` and
/// `Display` render as `****` so configuration dumps and log lines cannot leak it.
#[derive(Clone, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

impl Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tokens_are_redacted_in_debug_and_display() {
        let secret = Secret::new("a1b2c3d4e5");
        assert_eq!(secret.reveal(), "a1b2c3d4e5");
        assert!(!secret.is_empty());
        assert_eq!(format!("{secret:?}"), "****");
        assert_eq!(format!("{secret}"), "****");
        assert_eq!(format!("{:?}", Secret::default()), "****");
        assert!(Secret::default().is_empty());
    }
}
