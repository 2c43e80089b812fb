use anyhow::{Context, Result};
use meedu_notify::{
    Command, Config, FixtureStore, MentionContext, MentionExtractor, NotificationRenderer,
    RecordingSink, RouteTable, markdown_clean,
};
use std::fs;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config);

    config.validate()?;

    match &config.command {
        Command::Mentions {
            from_user,
            from_id,
            from_type,
            text,
        } => {
            let context = MentionContext {
                from_user: *from_user,
                from_id: *from_id,
                from_type: *from_type,
            };
            run_mentions(&config, text, &context)
        }
        Command::Render { recipient } => run_render(&config, *recipient),
        Command::Clean { file } => run_clean(file),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence unless `--verbose` is given.
fn init_tracing(config: &Config) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !config.verbose => filter,
        _ => EnvFilter::new(config.log_filter()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints one JSON line per published mention event.
fn run_mentions(config: &Config, text: &str, context: &MentionContext) -> Result<()> {
    let store = Arc::new(FixtureStore::load(&config.fixtures)?);
    let sink = Arc::new(RecordingSink::new());
    let extractor = MentionExtractor::new(store, sink.clone());

    let resolved = extractor.extract(text, context);
    tracing::info!(count = resolved.len(), "Mentions resolved");

    for event in sink.drain() {
        let line = serde_json::to_string(&event).context("Failed to serialize mention event")?;
        println!("{}", line);
    }

    Ok(())
}

/// Prints one rendered fragment per line, skipping corrupt notifications.
fn run_render(config: &Config, recipient: Option<u64>) -> Result<()> {
    let store = Arc::new(FixtureStore::load(&config.fixtures)?);
    let records = match recipient {
        Some(id) => store.notifications_for(id),
        None => store.notifications.clone(),
    };

    let routes = Arc::new(RouteTable::with_defaults(config.base_url.as_str()));
    let renderer = NotificationRenderer::new(store.clone(), store, routes);

    let rendered = renderer.render_feed(&records);
    tracing::info!(
        total = records.len(),
        rendered = rendered.len(),
        "Notifications rendered"
    );

    for notification in rendered {
        println!("{}", notification);
    }

    Ok(())
}

fn run_clean(file: &std::path::Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read markdown: {}", file.display()))?;

    print!("{}", markdown_clean(&content)?);

    Ok(())
}
