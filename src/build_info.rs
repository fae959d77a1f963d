//! Build metadata
//!
//! `build.rs` stamps `FOODCALC_BUILD_NUMBER` and `FOODCALC_BUILD_TIMESTAMP`
//! into the binary. Builds that skip the script (e.g. some IDE checkers)
//! report build 0 and an unknown timestamp.

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

const RAW_BUILD_NUMBER: Option<&str> = option_env!("FOODCALC_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("FOODCALC_BUILD_TIMESTAMP");

/// Identity of the running binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamps(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP)
    }

    fn from_stamps(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }

    /// User-Agent sent to Open Food Facts, which asks clients to identify themselves
    pub fn user_agent(&self) -> String {
        format!("{}/{} (build {})", self.name, self.version, self.build_number)
    }

    /// Banner text shown on stderr at startup
    pub fn banner(&self, transport: &str) -> String {
        let rule = "=".repeat(47);
        format!(
            "{rule}\n  FoodCalc {} (build {}, {})\n  Open Food Facts nutrition calculator\n  Transport: {}\n{rule}",
            self.version, self.build_number, self.build_timestamp, transport
        )
    }
}

pub fn print_startup_banner(transport: &str) {
    eprintln!("{}", BuildInfo::current().banner(transport));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_garbled_stamps() {
        let info = BuildInfo::from_stamps(None, None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");

        assert_eq!(BuildInfo::from_stamps(Some("4x2"), None).build_number, 0);
        assert_eq!(BuildInfo::from_stamps(Some(" 42 "), None).build_number, 42);
    }

    #[test]
    fn test_user_agent_names_package() {
        let ua = BuildInfo::from_stamps(Some("7"), None).user_agent();
        assert_eq!(ua, format!("foodcalc/{} (build 7)", VERSION));
    }

    #[test]
    fn test_banner_mentions_transport() {
        let banner = BuildInfo::from_stamps(Some("3"), Some("2026-01-01T00:00:00Z")).banner("stdio");
        assert!(banner.contains("(build 3, 2026-01-01T00:00:00Z)"));
        assert!(banner.contains("Transport: stdio"));
        assert_eq!(banner.lines().count(), 5);
    }
}
