use rcomposer::{
    logger, AspectRatio, ComposerConfig, CreationState, EncodedImage, GenerationClient, ImageRole,
    Studio, Style, TerminalShare,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(logger::LoggerConfig::development())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = ComposerConfig::from_env();
    logger::log_config_info(&config);

    log::info!("🔄 Creating generation client...");
    let client = match GenerationClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize generation client: {}", e);
            return Err(e.into());
        }
    };

    let mut studio = Studio::new(client);

    log::info!("🎨 Available styles:");
    for option in Style::catalog() {
        log::info!("  {} ({})", option.name, option.preview);
    }

    // Slot images come from COMPOSER_<ROLE>_IMAGE, e.g. COMPOSER_PERSON_IMAGE=me.jpg
    for role in ImageRole::ALL {
        let var = format!("COMPOSER_{}_IMAGE", role.as_str().to_uppercase());
        let Ok(path) = env::var(&var) else {
            continue;
        };
        match EncodedImage::from_path(&path).await {
            Ok(image) => {
                log::info!("🖼️  {} slot: {} ({})", role.label(), path, image.media_type);
                studio.set_slot(role, Some(image));
            }
            Err(e) => log::warn!("⚠️  Skipping {} slot: {}", role.label(), e),
        }
    }

    if let Ok(prompt) = env::var("COMPOSER_PROMPT") {
        studio.set_prompt(prompt);
    }
    if let Some(style) = env::var("COMPOSER_STYLE").ok().and_then(|s| Style::from_name(&s)) {
        studio.select_style(style);
    }
    if let Some(ratio) = env::var("COMPOSER_ASPECT_RATIO")
        .ok()
        .and_then(|r| AspectRatio::parse(&r))
    {
        studio.select_aspect_ratio(ratio);
    }

    if !studio.state().can_generate() {
        log::warn!("⚠️  Nothing to generate: set COMPOSER_PROMPT or a slot image");
        return Ok(());
    }

    log::info!(
        "🧪 Generating \"{}\" ({} style, {})",
        studio.state().prompt(),
        studio.state().style(),
        studio.state().aspect_ratio().label()
    );

    {
        let _timer = logger::timer("Image generation");
        studio
            .generate_with_progress(|message| log::info!("⏳ {}", message))
            .await;
    }

    match studio.state().creation_state() {
        CreationState::Ready(creation) => {
            log::info!("✅ Creation {} ready", creation.id);
            log::info!("🔗 Share URL: {}", creation.share_url);
        }
        CreationState::Failed(message) => {
            log::error!("❌ {}", message);
            return Ok(());
        }
        _ => return Ok(()),
    }

    let output_dir = env::var("COMPOSER_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
    match studio.download(&output_dir).await {
        Ok(path) => log::info!("💾 Image saved to: {}", path.display()),
        Err(e) => log::error!("❌ Failed to save image: {}", e),
    }

    match studio.share(&TerminalShare).await {
        Ok(outcome) => {
            if let Some(message) = outcome.message() {
                log::info!("📋 {}", message);
            }
        }
        Err(e) => log::warn!("⚠️  {}", e),
    }

    if env::var("COMPOSER_KEEP").is_err() {
        studio.delete().await;
        if let Some(notice) = studio.state().notice() {
            log::warn!("⚠️  {}", notice);
        }
    }

    log::info!("🎉 Done!");
    Ok(())
}
