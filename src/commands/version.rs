//! Command: print version information.

/// The version string embedded at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("IDP_CONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("idp-config {}", version());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
