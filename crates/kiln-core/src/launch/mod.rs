use std::{fmt::Display, path::PathBuf};

use typed_builder::TypedBuilder;

use crate::repository::display_name::DisplayName;

pub mod arguments;
pub mod classpath;
pub mod natives;
pub mod process;
pub mod rules;

pub use arguments::CommandSynthesizer;
pub use process::{spawn, LaunchedGame};

/// Inputs a caller provides to start a release.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct LaunchRequest {
    #[builder(setter(into))]
    pub release_id: String,
    #[builder(default)]
    pub display_name: DisplayName,
    #[builder(default = 2)]
    pub memory_budget_gib: u32,
    #[builder(setter(into))]
    pub natives_dir: PathBuf,
}

/// Program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand(Vec<String>);

impl LaunchCommand {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn program(&self) -> &str {
        self.0.first().map_or("", String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.0
    }
}

impl Display for LaunchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

pub(crate) mod macros {
    macro_rules! replace {
        (
            $initial:ident,
            $($name:literal => $value:expr),+
        ) => {
            $initial
            $(
               .replace($name, $value)
            )+
        };
    }
    pub(crate) use replace;
}
