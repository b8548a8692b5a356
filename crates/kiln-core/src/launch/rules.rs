use crate::{
    platform::Platform,
    repository::descriptor::{Action, Argument, Rule},
};

/// Whether `rule` applies on `platform`. Rules that require a feature
/// never apply.
pub fn is_rule_satisfied(rule: &Rule, platform: Platform) -> bool {
    if let Some(os) = rule.os.as_ref() {
        if os.name.as_deref().is_some_and(|name| name != platform.tag()) {
            return false;
        }

        if os.arch.as_deref().is_some_and(|arch| arch != std::env::consts::ARCH) {
            return false;
        }
    }

    if let Some(ref features) = rule.features {
        if features.values().any(|enabled| *enabled) {
            return false;
        }
    }

    true
}

pub fn is_all_rules_satisfied(rules: &[Rule], platform: Platform) -> bool {
    rules.iter().all(|rule| {
        let satisfied = is_rule_satisfied(rule, platform);
        let allow = rule.action == Action::Allow;

        satisfied == allow
    })
}

/// Template values that pass their rules on `platform`.
pub fn applicable_values(template: &[Argument], platform: Platform) -> impl Iterator<Item = &str> {
    template
        .iter()
        .flat_map(move |argument| {
            let values: &[String] = match argument {
                Argument::Struct { rules, value } if is_all_rules_satisfied(rules, platform) => value.values(),
                Argument::Struct { .. } => &[],
                Argument::String(value) => std::slice::from_ref(value),
            };
            values
        })
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::repository::descriptor::{Os, Value};

    use super::*;

    fn os_rule(action: Action, name: &str) -> Rule {
        Rule {
            action,
            os: Some(Os {
                name: Some(name.into()),
                arch: None,
                version: None,
            }),
            features: None,
        }
    }

    #[test]
    fn os_rules() {
        let allow_osx = [os_rule(Action::Allow, "osx")];
        let disallow_osx = [os_rule(Action::Disallow, "osx")];

        assert!(is_all_rules_satisfied(&allow_osx, Platform::Osx));
        assert!(!is_all_rules_satisfied(&allow_osx, Platform::Linux));
        assert!(!is_all_rules_satisfied(&disallow_osx, Platform::Osx));
        assert!(is_all_rules_satisfied(&disallow_osx, Platform::Windows));
        assert!(is_all_rules_satisfied(&[], Platform::Linux));
    }

    #[test]
    fn feature_rules_never_apply() {
        let rule = Rule {
            action: Action::Allow,
            os: None,
            features: Some(HashMap::from([("is_demo_user".to_owned(), true)])),
        };

        assert!(!is_all_rules_satisfied(&[rule], Platform::Linux));
    }

    #[test]
    fn applicable_values_test() {
        let template = vec![
            Argument::Struct {
                rules: vec![os_rule(Action::Allow, "windows")],
                value: Value::String("-XX:HeapDumpPath=x".into()),
            },
            Argument::Struct {
                rules: vec![os_rule(Action::Allow, "linux")],
                value: Value::Array(vec!["-Da".into(), "-Db".into()]),
            },
            Argument::String("-cp".into()),
        ];

        assert_eq!(
            applicable_values(&template, Platform::Linux).collect::<Vec<_>>(),
            ["-Da", "-Db", "-cp"]
        );
        assert_eq!(
            applicable_values(&template, Platform::Windows).collect::<Vec<_>>(),
            ["-XX:HeapDumpPath=x", "-cp"]
        );
    }
}
