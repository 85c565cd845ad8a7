use anyhow::Result;
use clap::Parser;
use inquire::validator::Validation;
use url::Url;

#[derive(Parser, Debug)]
pub enum ConfigCommand {
    /// Interactively set the API URL and page size
    Set(SetCommand),
    /// Print the configuration file
    #[clap(alias = "ls")]
    Show(ShowCommand),
}

impl ConfigCommand {
    pub fn run(&self) -> Result<()> {
        match self {
            ConfigCommand::Set(cmd) => cmd.run(),
            ConfigCommand::Show(cmd) => cmd.run(),
        }
    }
}

#[derive(Parser, Debug)]
pub struct SetCommand {
    #[clap(short, long)]
    pub file: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ShowCommand {
    #[clap(short, long)]
    pub file: Option<String>,
}

#[allow(clippy::unnecessary_wraps)]
pub fn validate_api_url(
    api_url: &str,
) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
    // Leave env references to be expanded at runtime
    if api_url.starts_with('$') {
        return Ok(Validation::Valid);
    }
    match Url::parse(api_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Validation::Valid),
        Ok(url) => Ok(Validation::Invalid(
            format!("Unsupported scheme '{}', use http or https", url.scheme()).into(),
        )),
        Err(error) => Ok(Validation::Invalid(error.into())),
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn validate_page_size(
    page_size: &str,
) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
    match page_size.trim().parse::<usize>() {
        Ok(0) => Ok(Validation::Invalid("Page size must be greater than 0".into())),
        Ok(_) => Ok(Validation::Valid),
        Err(error) => Ok(Validation::Invalid(error.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:4000", true)]
    #[case("https://api.example.com/v1/", true)]
    #[case("${LINKRS_API_URL}", true)]
    #[case("ftp://example.com", false)]
    #[case("localhost:4000", false)]
    #[case("not a url", false)]
    fn test_validate_api_url(#[case] input: &str, #[case] valid: bool) {
        let result = validate_api_url(input).unwrap();
        assert_eq!(matches!(result, Validation::Valid), valid);
    }

    #[rstest]
    #[case("10", true)]
    #[case(" 25 ", true)]
    #[case("0", false)]
    #[case("ten", false)]
    fn test_validate_page_size(#[case] input: &str, #[case] valid: bool) {
        let result = validate_page_size(input).unwrap();
        assert_eq!(matches!(result, Validation::Valid), valid);
    }
}
