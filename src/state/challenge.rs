use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A static challenge the player recreates in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Unique identifier, also the value persisted as the selection.
    pub name: String,
    /// Human readable title shown when choosing a challenge.
    pub title: String,
    /// Location of the target rendering the player tries to reproduce.
    pub target_url: String,
    /// Optional short brief.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ordered, name-indexed collection of challenges.
///
/// The first entry is the default selection. Duplicate names keep the first
/// occurrence's position and the last occurrence's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCatalog {
    entries: IndexMap<String, ChallengeConfig>,
}

impl ChallengeCatalog {
    /// Build a catalog from configs, falling back to the built-in catalog when
    /// `configs` is empty so there is always a default challenge.
    pub fn new(configs: impl IntoIterator<Item = ChallengeConfig>) -> Self {
        let entries: IndexMap<String, ChallengeConfig> = configs
            .into_iter()
            .map(|config| (config.name.clone(), config))
            .collect();

        if entries.is_empty() {
            return Self::default();
        }
        Self { entries }
    }

    /// Look up a challenge by its name.
    pub fn find(&self, name: &str) -> Option<&ChallengeConfig> {
        self.entries.get(name)
    }

    /// Default challenge: the first entry of the catalog.
    pub fn first(&self) -> &ChallengeConfig {
        // `new` and `default` never build an empty catalog.
        match self.entries.first() {
            Some((_, config)) => config,
            None => unreachable!("challenge catalog is never empty"),
        }
    }

    /// Iterate challenges in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ChallengeConfig> {
        self.entries.values()
    }

    /// Number of challenges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no challenges.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ChallengeCatalog {
    fn default() -> Self {
        Self {
            entries: default_challenges()
                .into_iter()
                .map(|config| (config.name.clone(), config))
                .collect(),
        }
    }
}

/// Built-in challenges shipped with the binary.
fn default_challenges() -> Vec<ChallengeConfig> {
    vec![
        ChallengeConfig {
            name: "landing".into(),
            title: "Landing page".into(),
            target_url: "/challenges/landing.png".into(),
            description: Some("Hero banner, three feature cards and a footer.".into()),
        },
        ChallengeConfig {
            name: "profile-card".into(),
            title: "Profile card".into(),
            target_url: "/challenges/profile-card.png".into(),
            description: Some("Centered card with avatar, name and social links.".into()),
        },
        ChallengeConfig {
            name: "pricing".into(),
            title: "Pricing table".into(),
            target_url: "/challenges/pricing.png".into(),
            description: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(name: &str) -> ChallengeConfig {
        ChallengeConfig {
            name: name.into(),
            title: name.to_uppercase(),
            target_url: format!("/{name}.png"),
            description: None,
        }
    }

    #[test]
    fn empty_input_uses_builtin_catalog() {
        let catalog = ChallengeCatalog::new(Vec::new());
        assert_eq!(catalog, ChallengeCatalog::default());
        assert_eq!(catalog.first().name, "landing");
    }

    #[test]
    fn lookup_preserves_order_and_names() {
        let catalog = ChallengeCatalog::new(vec![challenge("b"), challenge("a")]);
        assert_eq!(catalog.first().name, "b");
        assert_eq!(catalog.find("a").map(|c| c.title.as_str()), Some("A"));
        assert!(catalog.find("missing").is_none());
        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
