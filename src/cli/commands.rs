use std::io::Write;

use secrecy::SecretString;
use url::Url;

use crate::app::{AppContext, BriefError, Result};
use crate::cli::ConfigureArgs;
use crate::config::Settings;
use crate::store::CredentialsUpdate;

pub fn configure(ctx: &mut AppContext, args: ConfigureArgs, out: &mut impl Write) -> Result<()> {
    let rss_feed = validate_url(&args.rss_feed)?;
    let content_url = validate_url(&args.content_url)?;
    let api_campaign_url = validate_url(&args.api_campaign_url)?;

    ctx.credentials.save(&CredentialsUpdate {
        api_key: args.sendy_api.map(SecretString::from),
        shared_secret: Some(SecretString::from(args.secret)),
        production_list_id: args.production_list_id,
        test_list_id: args.test_list_id,
    })?;

    let settings = Settings {
        rss_feed_url: Some(rss_feed.into()),
        content_url: Some(content_url.into()),
        campaign_endpoint_url: Some(api_campaign_url.into()),
        ..ctx.settings.clone()
    };
    settings.save_to(&ctx.settings_path)?;
    ctx.settings = settings;

    tracing::info!(path = %ctx.settings_path.display(), "Settings written");
    writeln!(out, "Config stored.")?;
    Ok(())
}

/// Print the unique ID of the item `send` would publish.
pub async fn show_current(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let rss_url = ctx.settings.rss_feed()?;
    let item = ctx.loader.load_rss(&rss_url).await?;

    writeln!(out, "{}", item.unique_id)?;
    Ok(())
}

/// Write the content `send` would publish, byte for byte.
pub async fn load_current(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let content_url = ctx.settings.content()?;
    let content = ctx.loader.load_newsletter_content(&content_url).await?;

    out.write_all(content.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Fetch the current item and content concurrently, then publish them.
///
/// The campaign is only submitted once both fetches succeed. The first
/// failure aborts the other fetch and is returned.
pub async fn send(ctx: &AppContext, for_real: bool, out: &mut impl Write) -> Result<()> {
    let rss_url = ctx.settings.rss_feed()?;
    let content_url = ctx.settings.content()?;
    let endpoint = ctx.settings.campaign_endpoint()?;
    let credentials = ctx.credentials.load()?;
    if !credentials.can_authorize() {
        tracing::warn!("No API key or shared secret stored; the campaign endpoint will likely reject the request");
    }

    let (item, content) = tokio::try_join!(
        ctx.loader.load_rss(&rss_url),
        ctx.loader.load_newsletter_content(&content_url),
    )?;

    let result = ctx
        .publisher
        .publish(
            &endpoint,
            Some(&item),
            Some(&content),
            for_real,
            &credentials,
            &ctx.settings.sender,
        )
        .await?;

    writeln!(out, "{}", result)?;
    Ok(())
}

fn validate_url(value: &str) -> Result<Url> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BriefError::Config(format!(
            "Unsupported URL scheme '{}' in {}",
            other, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/feed.xml").is_ok());
        assert!(matches!(
            validate_url("example.com/feed.xml"),
            Err(BriefError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("ftp://example.com/feed.xml"),
            Err(BriefError::Config(_))
        ));
    }
}
