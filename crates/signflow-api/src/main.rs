use signflow_core::Config;

// Use mimalloc as the global allocator for lower fragmentation under
// large multipart bodies, especially in musl-based containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (state, router) = signflow_api::setup::initialize_app(config.clone()).await?;

    signflow_api::setup::server::start_server(&config, router, state.shutdown.clone()).await?;

    Ok(())
}
