//! Command dispatch for the `retag` binary.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};

use super::output;
use crate::application::{
    HandoffLinkUseCase, MediaService, PersistenceEvent, SessionUseCase, WishlistStore,
};
use crate::domain::entities::{AssetId, Identity, ImageOptions, UploadOptions, WishlistItem};
use crate::domain::errors::MediaError;
use crate::infrastructure::cloudinary::{
    CloudinaryClient, CloudinaryConfig, DeliveryUrlBuilder, ImagePreset, extract_asset_id,
};
use crate::infrastructure::config::{
    AppConfig, Command, HandoffArgs, SessionAction, UploadArgs, UrlArgs, WishlistAction,
    WishlistArgs,
};
use crate::infrastructure::handoff::HandoffClient;
use crate::infrastructure::storage::{FileWishlistStorage, KeyringSessionStorage};

const CREDENTIALS_HINT: &str =
    "set CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET";

/// Runs one command against the configured collaborators.
pub struct App {
    config: AppConfig,
}

impl App {
    #[must_use]
    pub const fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Executes `command` and prints its result to stdout.
    ///
    /// # Errors
    /// Returns error if the command fails.
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Url(args) => {
                println!("{}", self.url(&args)?);
            }
            Command::Responsive { asset_id } => {
                let urls = self.delivery().responsive_urls(&asset_id);
                print!("{}", output::render_responsive(&urls));
            }
            Command::Extract { url } => {
                let asset_id = extract_asset_id(&url);
                if asset_id.is_empty() {
                    return Err(eyre!("no versioned asset id found in {url}"));
                }
                println!("{asset_id}");
            }
            Command::Upload(args) => self.upload(args).await?,
            Command::Delete { ids } => self.delete(ids).await?,
            Command::Wishlist(args) => self.wishlist(args).await?,
            Command::Handoff(args) => self.handoff(args).await?,
            Command::Session { action } => self.session(action).await?,
        }
        Ok(())
    }

    fn cloudinary_config(&self) -> CloudinaryConfig {
        let settings = &self.config.cloudinary;
        CloudinaryConfig::from_env()
            .with_fallback_cloud_name(settings.cloud_name.as_deref())
            .with_api_base(settings.api_base.clone())
            .with_cdn_host(settings.cdn_host.clone())
            .with_signature_algorithm(settings.signature_algorithm)
    }

    fn delivery(&self) -> DeliveryUrlBuilder {
        let config = self.cloudinary_config();
        DeliveryUrlBuilder::new(config.cloud_name).with_cdn_host(config.cdn_host)
    }

    fn media_service(&self) -> Result<MediaService> {
        let config = self.cloudinary_config();
        if !config.is_configured() {
            return Err(MediaError::NotConfigured).wrap_err(CREDENTIALS_HINT);
        }
        let client = CloudinaryClient::new(&config).wrap_err(CREDENTIALS_HINT)?;
        Ok(MediaService::new(Arc::new(client)))
    }

    fn url(&self, args: &UrlArgs) -> Result<String> {
        let delivery = self.delivery();
        if let Some(name) = &args.seo_name {
            return Ok(delivery.seo_friendly_url(&args.asset_id, name, args.width, args.height));
        }

        let options = url_options(args)?;
        if args.optimized {
            Ok(delivery.optimized_url(&args.asset_id, &options))
        } else {
            Ok(delivery.build(&args.asset_id, &options))
        }
    }

    async fn upload(&self, args: UploadArgs) -> Result<()> {
        let service = self.media_service()?;
        let options = upload_options(&args, &self.config.cloudinary.upload_folder);

        let mut files = Vec::with_capacity(args.files.len());
        for path in &args.files {
            let bytes = tokio::fs::read(path)
                .await
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "Read upload file");
            files.push(bytes);
        }

        let assets = if files.len() == 1 {
            let bytes = files.pop().unwrap_or_default();
            vec![service.upload_asset(bytes, options).await?]
        } else {
            service.upload_many(files, options).await?
        };

        print!("{}", output::render_uploads(&assets));
        Ok(())
    }

    async fn delete(&self, ids: Vec<String>) -> Result<()> {
        let service = self.media_service()?;
        let ids: Vec<AssetId> = ids.into_iter().filter_map(AssetId::new).collect();

        match ids.as_slice() {
            [] => return Err(eyre!("no asset ids given")),
            [id] => {
                let outcome = service.delete_asset(id).await?;
                println!("{id}: {outcome}");
            }
            _ => {
                let outcome = service.delete_many(&ids).await?;
                print!("{}", output::render_deletes(&outcome));
            }
        }
        Ok(())
    }

    fn data_dir(&self) -> Result<PathBuf> {
        self.config
            .effective_data_dir()
            .ok_or_else(|| eyre!("could not determine a data directory; pass --data-dir"))
    }

    async fn wishlist(&self, args: WishlistArgs) -> Result<()> {
        let storage = Arc::new(FileWishlistStorage::new(self.data_dir()?));
        let identity = Identity::new(args.user_id, args.user_email);
        let mut store = WishlistStore::open(storage, identity).await;
        let mut events = store.subscribe();

        match args.action {
            WishlistAction::List => {}
            WishlistAction::Add {
                id,
                name,
                price,
                image,
                brand,
            } => {
                let mut item = WishlistItem::new(id, name);
                if let Some(price) = price {
                    item = item.with_price(price);
                }
                if let Some(image) = image {
                    item = item.with_image(image);
                }
                if let Some(brand) = brand {
                    item = item.with_brand(brand);
                }
                store.add(item);
            }
            WishlistAction::Remove { id } => {
                store.remove(&id);
            }
            WishlistAction::Clear => {
                store.clear();
            }
            WishlistAction::Logout => {
                info!(identity = %store.identity(), "Logging out of wishlist");
                store.logout();
            }
        }

        store.flush().await;
        report_persistence(&mut events);

        print!(
            "{}",
            output::render_wishlist(&store.identity().to_string(), store.state())
        );
        store.shutdown().await;
        Ok(())
    }

    async fn handoff(&self, args: HandoffArgs) -> Result<()> {
        let base_url = args
            .base_url
            .or_else(|| self.config.storefront.base_url.clone())
            .ok_or_else(|| eyre!("no storefront URL given and none configured"))?;

        let sessions = SessionUseCase::new(Arc::new(KeyringSessionStorage::new()));
        let session = sessions.active(args.session_token.as_deref()).await?;
        if let Some(session) = &session {
            debug!(source = %session.source, "Using session for handoff");
        }

        let client = HandoffClient::with_base_url(self.config.storefront.api_url.clone())?;
        let use_case = HandoffLinkUseCase::new(Arc::new(client));
        let link = use_case
            .execute(&base_url, session.as_ref().map(|s| &s.token))
            .await?;

        print!("{}", output::render_handoff(&link));
        Ok(())
    }

    async fn session(&self, action: SessionAction) -> Result<()> {
        let sessions = SessionUseCase::new(Arc::new(KeyringSessionStorage::new()));

        match action {
            SessionAction::Login { token } => {
                let token = sessions.login(&token).await?;
                println!("Signed in as {token}");
            }
            SessionAction::Logout => {
                let had_session = sessions.logout().await?;
                println!("{}", output::render_logout(had_session));
            }
            SessionAction::Status => {
                let saved = sessions.saved().await?;
                println!("{}", output::render_session_status(saved.as_ref()));
            }
        }
        Ok(())
    }
}

fn report_persistence(events: &mut tokio::sync::broadcast::Receiver<PersistenceEvent>) {
    loop {
        match events.try_recv() {
            Ok(PersistenceEvent::SaveFailed { key, error }) => {
                warn!(key = %key, error = %error, "Wishlist change was not saved");
                eprintln!("warning: wishlist change was not saved: {error}");
            }
            Ok(PersistenceEvent::RemoveFailed { key, error }) => {
                warn!(key = %key, error = %error, "Wishlist slot was not removed");
                eprintln!("warning: saved wishlist was not removed: {error}");
            }
            Ok(event) => debug!(?event, "Wishlist persisted"),
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "Missed persistence events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

/// Builds delivery options from command-line flags.
///
/// # Errors
/// Returns error for an unknown preset name.
pub fn url_options(args: &UrlArgs) -> Result<ImageOptions> {
    if let Some(name) = &args.preset {
        let size = args.width.or(args.height);
        let preset = ImagePreset::parse(name, size)
            .ok_or_else(|| eyre!("unknown preset '{name}'"))?;
        return Ok(preset.options());
    }

    let mut options = ImageOptions::new()
        .width(args.width.unwrap_or(0))
        .height(args.height.unwrap_or(0));
    options.crop = args.crop;
    options.quality = args.quality;
    options.format = args.format;
    options.gravity = args.gravity;
    Ok(options)
}

/// Builds upload options from command-line flags.
#[must_use]
pub fn upload_options(args: &UploadArgs, default_folder: &str) -> UploadOptions {
    let mut options = UploadOptions::new().folder(
        args.folder
            .clone()
            .unwrap_or_else(|| default_folder.to_string()),
    );
    if let Some(quality) = args.quality {
        options = options.quality(quality);
    }
    if let Some(format) = args.format {
        options = options.format(format);
    }
    options.resize(
        ImageOptions::new()
            .width(args.width.unwrap_or(0))
            .height(args.height.unwrap_or(0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Crop, Quality};
    use crate::infrastructure::config::CliArgs;
    use clap::Parser;

    fn url_args(argv: &[&str]) -> UrlArgs {
        let mut full = vec!["retag", "url"];
        full.extend_from_slice(argv);
        match CliArgs::parse_from(full).command {
            Command::Url(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_url_options_from_flags() {
        let options = url_options(&url_args(&[
            "abc123", "--width", "400", "--height", "400", "--crop", "fill", "--quality",
            "auto:good", "--format", "auto",
        ]))
        .unwrap();

        assert_eq!(options.transformation(), "q_auto:good,f_auto,w_400,h_400,c_fill");
    }

    #[test]
    fn test_url_options_from_preset() {
        let options = url_options(&url_args(&["abc", "--preset", "thumbnail", "--width", "120"]))
            .unwrap();
        assert_eq!(options, ImagePreset::Thumbnail(120).options());

        assert!(url_options(&url_args(&["abc", "--preset", "poster"])).is_err());
    }

    #[test]
    fn test_url_without_cloud_name_echoes_asset() {
        let mut config = AppConfig::default();
        config.cloudinary.cloud_name = None;
        let app = App::new(config);

        if std::env::var("CLOUDINARY_CLOUD_NAME").is_err() {
            let url = app.url(&url_args(&["abc", "--width", "10"])).unwrap();
            assert_eq!(url, "abc");
        }
    }

    #[test]
    fn test_url_with_seo_name() {
        if std::env::var("CLOUDINARY_CLOUD_NAME").is_ok() {
            return;
        }
        let mut config = AppConfig::default();
        config.cloudinary.cloud_name = Some("acct".to_string());
        let app = App::new(config);

        let url = app
            .url(&url_args(&["p1", "--seo-name", "Denim Jacket", "--width", "300", "--height", "300"]))
            .unwrap();
        assert_eq!(
            url,
            "https://res.cloudinary.com/acct/image/upload/q_auto:good,f_auto,w_300,h_300,c_fill/p1/denim-jacket"
        );
    }

    #[test]
    fn test_media_commands_need_credentials() {
        if std::env::var("CLOUDINARY_API_SECRET").is_ok() {
            return;
        }
        let mut config = AppConfig::default();
        config.cloudinary.cloud_name = Some("demo".to_string());
        let app = App::new(config);

        let error = app.media_service().err().unwrap();
        assert!(matches!(
            error.downcast_ref::<MediaError>(),
            Some(MediaError::NotConfigured)
        ));
        assert!(error.to_string().contains("CLOUDINARY_API_SECRET"));
    }

    #[test]
    fn test_upload_options_use_configured_folder() {
        let args = UploadArgs {
            files: vec![PathBuf::from("a.jpg")],
            folder: None,
            quality: Some(Quality::Level(80)),
            format: None,
            width: Some(1000),
            height: None,
        };

        let options = upload_options(&args, "retag/drafts");
        assert_eq!(options.folder.as_deref(), Some("retag/drafts"));
        assert_eq!(options.quality, Some(Quality::Level(80)));
        assert_eq!(options.resize.transformation(), "w_1000");
        assert_eq!(options.resize.crop, None::<Crop>);
    }

    #[tokio::test]
    async fn test_wishlist_commands_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.data_dir = Some(dir.path().to_path_buf());
        let app = App::new(config);

        let add = CliArgs::parse_from([
            "retag", "wishlist", "--user-email", "a@example.com", "add", "p1", "Jacket",
        ]);
        app.run(add.command).await.unwrap();

        let storage = Arc::new(FileWishlistStorage::new(dir.path()));
        let store = WishlistStore::open(storage, Identity::from_email("a@example.com")).await;
        assert!(store.contains("p1"));
        store.shutdown().await;
    }
}
