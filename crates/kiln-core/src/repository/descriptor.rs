use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Everything a launch needs from a release descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDescriptor {
    pub primary_artifact_url: String,
    pub main_class: String,
    pub asset_index_id: String,
    pub dependencies: Vec<DependencySpec>,
    pub jvm_template: Vec<Argument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: Option<String>,
    pub generic: Option<ArtifactLocation>,
    pub natives: BTreeMap<Platform, ArtifactLocation>,
}

impl DependencySpec {
    pub fn native_for(&self, platform: Platform) -> Option<&ArtifactLocation> {
        self.natives.get(&platform)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Argument {
    Struct { rules: Vec<Rule>, value: Value },
    String(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Array(Vec<String>),
}

impl Value {
    pub fn values(&self) -> &[String] {
        match self {
            Value::String(value) => std::slice::from_ref(value),
            Value::Array(values) => values,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Rule {
    pub action: Action,
    pub os: Option<Os>,
    pub features: Option<HashMap<String, bool>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Allow,
    Disallow,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Os {
    pub name: Option<String>,
    pub arch: Option<String>,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_deserialize_test() {
        let template = r#"[
            {"rules": [{"action": "allow", "os": {"name": "osx"}}], "value": ["-XstartOnFirstThread"]},
            {"rules": [{"action": "allow", "os": {"arch": "x86"}}], "value": "-Xss1M"},
            "-Djava.library.path=${natives_directory}",
            "-cp",
            "${classpath}"
        ]"#;

        let arguments: Vec<Argument> = serde_json::from_str(template).unwrap();

        assert_eq!(arguments.len(), 5);
        assert!(matches!(
            &arguments[0],
            Argument::Struct { rules, value: Value::Array(values) }
                if rules[0].action == Action::Allow && values == &["-XstartOnFirstThread"]
        ));
        assert!(matches!(&arguments[1], Argument::Struct { value: Value::String(v), .. } if v == "-Xss1M"));
        assert_eq!(arguments[3], Argument::String("-cp".into()));
    }
}
