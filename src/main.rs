use nogashio::{app::App, logging, settings::Settings};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings, using defaults: {e}");
            Settings::default().with_env_overrides()
        }
    };

    // Logging is optional, the game runs without it.
    match logging::init(settings.debug_mode) {
        Ok(log_file) => log::info!(
            "Nogashio start: {} (log at {})",
            chrono::Local::now(),
            log_file.display()
        ),
        Err(e) => eprintln!("Failed to initialize logger: {e}"),
    }
    log::debug!("Settings: {settings:#?}");

    let mut app = App::new(settings);
    let result = app.run().await;
    if let Err(e) = &result {
        log::error!("App exited with error: {e:#?}");
    }
    result
}
