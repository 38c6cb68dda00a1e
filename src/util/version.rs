pub const APP_NAME: &str = "LoadLink";
pub const APP_TAGLINE: &str = "India's Freight Marketplace";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// The label shown in the header: the git tag when built from one,
/// otherwise the crate version.
pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_label_is_never_empty() {
        assert!(!version_label().is_empty());
    }
}
