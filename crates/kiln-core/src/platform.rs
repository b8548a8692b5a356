use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Operating system families that descriptors publish native artifacts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Osx,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Osx, Platform::Linux];

    /// Classifies an operating system name. Anything that is neither Windows
    /// nor macOS is treated as Linux.
    pub fn classify(os_name: &str) -> Self {
        let os_name = os_name.to_lowercase();

        if os_name.contains("win") {
            Platform::Windows
        } else if os_name.contains("mac") {
            Platform::Osx
        } else {
            Platform::Linux
        }
    }

    pub fn current() -> Self {
        Self::classify(std::env::consts::OS)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Osx => "osx",
            Platform::Linux => "linux",
        }
    }

    /// Key of this platform's entry in a library's `classifiers` object.
    pub fn natives_classifier(self) -> String {
        format!("natives-{}", self.tag())
    }

    pub fn classpath_separator(self) -> &'static str {
        match self {
            Platform::Windows => ";",
            Platform::Osx | Platform::Linux => ":",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_test() {
        assert_eq!(Platform::classify("Windows 10"), Platform::Windows);
        assert_eq!(Platform::classify("windows"), Platform::Windows);
        assert_eq!(Platform::classify("Mac OS X"), Platform::Osx);
        assert_eq!(Platform::classify("macos"), Platform::Osx);
        assert_eq!(Platform::classify("linux"), Platform::Linux);
        assert_eq!(Platform::classify("FreeBSD"), Platform::Linux);
    }

    #[test]
    fn classifier_keys() {
        assert_eq!(Platform::Osx.natives_classifier(), "natives-osx");
        assert_eq!(Platform::Windows.classpath_separator(), ";");
        assert_eq!(Platform::Linux.classpath_separator(), ":");
    }
}
