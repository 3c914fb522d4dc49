use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Pick one item; `None` when the user backs out with Esc or q
pub fn prompt_select(prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len() - 1))
        .interact_opt()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}
