use color_eyre::Result;
use dialoguer::{Confirm, Input, Password};
use popcorn_models::{MAX_USER_RATING, MIN_USER_RATING};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Prompt for a star rating until a value in range is entered
pub fn prompt_rating(default: Option<u8>) -> Result<u8> {
    let mut input_builder = Input::<u8>::new()
        .with_prompt(format!("Your rating ({}-{})", MIN_USER_RATING, MAX_USER_RATING))
        .validate_with(|value: &u8| -> std::result::Result<(), String> {
            if (MIN_USER_RATING..=MAX_USER_RATING).contains(value) {
                Ok(())
            } else {
                Err(format!("Enter a number from {} to {}", MIN_USER_RATING, MAX_USER_RATING))
            }
        });

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value);
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read rating: {}", e))
}
