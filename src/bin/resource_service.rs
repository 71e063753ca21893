use authgate::app::{build_resource_app, init_tracing, serve};
use authgate::config::ResourceServiceConfig;
use authgate::state::ResourceState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ResourceServiceConfig::from_env()?;
    let state = ResourceState::init(&config)?;
    serve(build_resource_app(state), "8080").await
}
