/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub revision: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

impl BuildMetadata {
    /// One-line banner used by the report binary.
    pub fn banner(&self) -> String {
        format!(
            "installment_core {} ({} {}, {})",
            self.version, self.revision, self.profile, self.target
        )
    }
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        revision: option_env!("INSTALLMENT_CORE_BUILD_REVISION").unwrap_or("unknown"),
        timestamp: option_env!("INSTALLMENT_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("INSTALLMENT_CORE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("INSTALLMENT_CORE_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_includes_package_version() {
        let banner = current().banner();
        assert!(banner.contains(env!("CARGO_PKG_VERSION")));
    }
}
