use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::path_to_string;

/// Java executable used to start a release.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "snake_case")]
pub enum JavaRunner {
    /// Command looked up on `PATH`.
    Command(String),
    Path(PathBuf),
}

impl JavaRunner {
    pub fn get_string(&self) -> String {
        match self {
            JavaRunner::Command(s) => s.to_string(),
            JavaRunner::Path(p) => path_to_string(p),
        }
    }

    pub fn path(p: PathBuf) -> JavaRunner {
        JavaRunner::Path(p)
    }

    pub fn command(s: &str) -> JavaRunner {
        JavaRunner::Command(s.to_string())
    }
}

impl Default for JavaRunner {
    fn default() -> JavaRunner {
        JavaRunner::Command("java".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Wrap {
        java: JavaRunner,
    }

    #[test]
    fn toml_forms() {
        let command: Wrap = toml::from_str("[java]\ncommand = \"java17\"").unwrap();
        let path: Wrap = toml::from_str("[java]\npath = \"/opt/jdk/bin/java\"").unwrap();

        assert_eq!(command.java.get_string(), "java17");
        assert_eq!(path.java, JavaRunner::path(PathBuf::from("/opt/jdk/bin/java")));
        assert_eq!(JavaRunner::default().get_string(), "java");
    }
}
