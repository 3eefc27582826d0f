use serde::{Deserialize, Serialize};

/// A stock background image addressed by a short key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub key: String,
    pub label: String,
    pub url: String,
}

impl Template {
    pub fn new(key: &str, label: &str, url: &str) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            url: url.to_owned(),
        }
    }
}

pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new("drake", "Drake", "https://i.imgflip.com/30b1gx.jpg"),
        Template::new("distracted", "Distracted Boyfriend", "https://i.imgflip.com/1ur9b0.jpg"),
        Template::new("buttons", "Two Buttons", "https://i.imgflip.com/1g8my4.jpg"),
    ]
}

/// Fixed, ordered mapping from template key to image URL
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(default_templates())
    }
}

impl TemplateRegistry {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn url(&self, key: &str) -> Option<&str> {
        self.get(key).map(|t| t.url.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_resolve() {
        let registry = TemplateRegistry::default();
        assert_eq!(registry.url("drake"), Some("https://i.imgflip.com/30b1gx.jpg"));
        assert_eq!(registry.url("distracted"), Some("https://i.imgflip.com/1ur9b0.jpg"));
        assert_eq!(registry.url("buttons"), Some("https://i.imgflip.com/1g8my4.jpg"));
    }

    #[test]
    fn test_unknown_key_is_none() {
        let registry = TemplateRegistry::default();
        assert!(registry.get("").is_none());
        assert!(registry.get("doge").is_none());
    }

    #[test]
    fn test_order_is_kept() {
        let keys: Vec<_> = TemplateRegistry::default().iter().map(|t| t.key.clone()).collect();
        assert_eq!(keys, ["drake", "distracted", "buttons"]);
    }
}
