use std::path::PathBuf;

use anyhow::Result;

use super::model::ShowCommand;
use crate::integrations::config::LinkrsConfig;

impl ShowCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.file.as_ref().map(PathBuf::from);
        let config = LinkrsConfig::from_file(path.as_ref())?;

        println!("# {}", config.path.clone().unwrap_or_default().display());
        println!("api_url = {}", config.resolve_api_url(None)?);
        println!("page_size = {}", config.page_size());
        println!("timeout_secs = {}", config.timeout().as_secs());
        if let Some(proxy) = &config.proxy {
            println!("proxy = {proxy}");
        }
        Ok(())
    }
}
