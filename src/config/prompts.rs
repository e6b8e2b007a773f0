//! Prompt templates for yt-cheatsheet.
//!
//! Prompts can be customized by placing an `instructions.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub instructions: InstructionPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// System instructions sent with every transcript chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionPrompts {
    pub takeaways: String,
    pub summary: String,
}

impl Default for InstructionPrompts {
    fn default() -> Self {
        Self {
            takeaways: "The user will provide a transcript. From the transcript, you will provide a bulleted list of key takeaways. At the top of the list, add a title: '## Key Takeaways — {{title}}'".to_string(),

            summary: "The user will provide a transcript. Reformat the transcript into an in-depth markdown blog post using sections and section headers. Add a section title: '## Summary — {{title}}'".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let instructions_path = custom_path.join("instructions.toml");
            if instructions_path.exists() {
                let content = std::fs::read_to_string(&instructions_path)?;
                prompts.instructions = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Instruction asking for a bulleted key-takeaways list headed by the video title.
    pub fn takeaways_instruction(&self, title: &str) -> String {
        self.render_with_custom(&self.instructions.takeaways, &title_vars(title))
    }

    /// Instruction asking for a markdown blog post headed by the video title.
    pub fn summary_instruction(&self, title: &str) -> String {
        self.render_with_custom(&self.instructions.summary, &title_vars(title))
    }
}

fn title_vars(title: &str) -> HashMap<String, String> {
    HashMap::from([("title".to_string(), title.to_string())])
}
