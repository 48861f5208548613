use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use forms::config::Config;
use forms::{
    EmployerProfile, Entity, EntityEditor, EntityId, EntityStore, HttpEntityApi, Resume,
    TracingSink,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting forms preview v{}", env!("CARGO_PKG_VERSION"));
    info!("API base URL: {}", config.api_base_url);

    let api = Arc::new(HttpEntityApi::from_config(&config)?);

    if config.resume_id.is_none() && config.employer_id.is_none() {
        warn!("Neither RESUME_ID nor EMPLOYER_ID is set; nothing to preview");
        return Ok(());
    }

    if let Some(id) = &config.resume_id {
        preview::<Resume>(&api, EntityId::new(id.as_str())).await?;
    }
    if let Some(id) = &config.employer_id {
        preview::<EmployerProfile>(&api, EntityId::new(id.as_str())).await?;
    }

    Ok(())
}

/// Loads one entity, mounts its form, and logs what the form would show.
async fn preview<E: Entity>(api: &Arc<HttpEntityApi>, id: EntityId) -> Result<()> {
    let entity: E = api.fetch(&id).await?;
    let store = EntityStore::with_entity(entity);
    let editor = EntityEditor::mount(store, api.clone(), Arc::new(TracingSink));

    info!(
        "{} {id}, last updated: {}",
        E::NOTIFICATION_TITLE,
        editor.last_updated().unwrap_or_default()
    );

    let errors = editor.form().validate();
    for props in editor.form().all_field_props() {
        let flag = if props.read_only { " (read-only)" } else { "" };
        info!("  {}{flag}: {}", props.label, props.value.display());
    }

    if errors.is_valid() {
        info!("  draft is valid and can be submitted");
    } else {
        for (field, message) in &errors {
            warn!("  {field}: {message}");
        }
    }

    Ok(())
}
