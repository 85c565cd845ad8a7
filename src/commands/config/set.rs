use std::path::PathBuf;

use anyhow::Result;

use super::model::{validate_api_url, validate_page_size, SetCommand};
use crate::integrations::config::{LinkrsConfig, DEFAULT_API_URL, DEFAULT_PAGE_SIZE};

impl SetCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.file.as_ref().map(PathBuf::from);
        let mut config = LinkrsConfig::from_file(path.as_ref())?;

        let current_url = config.api_url.clone().unwrap_or(DEFAULT_API_URL.to_string());
        let api_url = inquire::Text::new("API base URL")
            .with_initial_value(&current_url)
            .with_help_message("Environment variables like ${LINKRS_URL} are expanded at runtime")
            .with_validator(validate_api_url)
            .prompt()?;

        let current_page_size = config.page_size().to_string();
        let page_size = inquire::Text::new("connections per page")
            .with_initial_value(&current_page_size)
            .with_validator(validate_page_size)
            .prompt()?;

        config.api_url = Some(api_url.trim().to_string());
        config.page_size = match page_size.trim().parse::<usize>()? {
            DEFAULT_PAGE_SIZE => None,
            size => Some(size),
        };
        config.write_to_file()?;

        println!("✅ Config written to {}", config.path.unwrap_or_default().display());
        Ok(())
    }
}
