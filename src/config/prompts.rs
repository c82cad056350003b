//! Prompt templates for Prat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. Templates use {{variable}} placeholders; `topic` and `context`
//! are filled by the composers, anything else comes from config variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub dialogue: DialoguePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for two-speaker dialogue generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialoguePrompts {
    /// System prompt for context-grounded generation ({{topic}}, {{context}}).
    pub grounded_system: String,
    /// Prompt for topic-only generation ({{topic}}).
    pub topic_only: String,
}

impl Default for DialoguePrompts {
    fn default() -> Self {
        Self {
            grounded_system: r#"Create an engaging conversation between two speakers discussing the topic: {{topic}}, based on the provided context.

Requirements:
- Generate exactly 5 back-and-forth exchanges
- Make it natural and conversational
- Include specific details about the {{topic}} based on the provided context.
- Each line should start with either "Speaker 1:" or "Speaker 2:"

Here's an example of the format (but create NEW content about {{topic}} based on the given context, don't copy this example):
Speaker 1: [First speaker's line]
Speaker 2: [Second speaker's line]

The response of the each speaker should be at most 20 words. The conversation has to be insightful, engaging, explanatory, deep diving and educational.

It should be in the style of a podcast where one speaker is slightly more knowledgeable than the other.

You are allowed to write only in the below format. Just give the output in the below format in a single string. No additional delimiters.

Speaker 1: Hey, did you catch the game last night?
Speaker 2: Of course! What a match, it had me on the edge of my seat.
Speaker 1: Same here! That last-minute goal was unreal. Who's your MVP?
Speaker 2: Gotta be the goalie. Those saves were unbelievable.

Remember: Create completely new dialogue about {{topic}} based on the given context, don't use the above example.

Context:
{{context}}"#
                .to_string(),

            topic_only: r#"Create an engaging conversation between two speakers discussing the topic: {{topic}}.

Requirements:
- Generate exactly 5 back-and-forth exchanges
- Make it natural and conversational
- Include specific details about the {{topic}}.
- Each line should start with either "Speaker 1:" or "Speaker 2:"

Here's an example of the format (but create NEW content about {{topic}}, don't copy this example):
Speaker 1: [First speaker's line]
Speaker 2: [Second speaker's line]

The response of the each speaker should be at most 20 words. The conversation has to be insightful, engaging, explanatory, deep diving and educational.

It should be in the style of a podcast where one speaker is slightly more knowledgeable than the other.

You are allowed to write only in the below format. Just give the output in the below format in a single string. No additional delimiters.

Speaker 1: Hey, did you catch the game last night?
Speaker 2: Of course! What a match, it had me on the edge of my seat.
Speaker 1: Same here! That last-minute goal was unreal. Who's your MVP?
Speaker 2: Gotta be the goalie. Those saves were unbelievable.

Remember: Create completely new dialogue about {{topic}}, don't use the above example."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let dialogue_path = custom_path.join("dialogue.toml");
            if dialogue_path.exists() {
                let content = std::fs::read_to_string(&dialogue_path)?;
                prompts.dialogue = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config
    /// variables. Provided variables take precedence.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.dialogue.grounded_system.contains("{{context}}"));
        assert!(prompts.dialogue.grounded_system.contains("{{topic}}"));
        assert!(prompts.dialogue.topic_only.contains("{{topic}}"));
        assert!(!prompts.dialogue.topic_only.contains("{{context}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "A podcast about {{topic}} with {{count}} exchanges.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("topic".to_string(), "black holes".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "A podcast about black holes with 5 exchanges.");
    }

    #[test]
    fn test_custom_variables_lose_to_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("topic".to_string(), "from-config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("topic".to_string(), "from-call".to_string());

        let result = prompts.render_with_custom("{{topic}}", &vars);
        assert_eq!(result, "from-call");
    }

    #[test]
    fn test_custom_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dialogue.toml"),
            r#"grounded_system = "custom {{topic}} {{context}}""#,
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.dialogue.grounded_system, "custom {{topic}} {{context}}");
        // Unspecified fields fall back to defaults.
        assert!(prompts.dialogue.topic_only.contains("5 back-and-forth"));
    }
}
