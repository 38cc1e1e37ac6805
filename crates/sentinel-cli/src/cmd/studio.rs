use anyhow::Context;
use sentinel_server::routes::bridge::{EXECUTE_PATH, STATUS_PATH};
use sentinel_server::state::BridgeConfig;

pub fn run(
    host: &str,
    port: u16,
    enable_openclaw: bool,
    openclaw_key: Option<String>,
) -> anyhow::Result<()> {
    let bridge = bridge_config(enable_openclaw, openclaw_key);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local = listener.local_addr()?;

        println!("Vibe Sentinel Studio running at http://{local}");
        if bridge.enabled {
            println!("OpenClaw bridge: enabled");
            println!("OpenClaw status endpoint: http://{local}{STATUS_PATH}");
            println!("OpenClaw execute endpoint: http://{local}{EXECUTE_PATH}");
            if bridge.requires_key() {
                println!("OpenClaw key auth: required (send header X-OpenClaw-Key)");
            } else {
                println!("OpenClaw key auth: not required");
            }
        }

        tokio::select! {
            res = sentinel_server::serve_on(listener, bridge) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}

/// A non-blank key turns the bridge on even without `--enable-openclaw`.
fn bridge_config(enable: bool, key: Option<String>) -> BridgeConfig {
    let has_key = key.as_deref().is_some_and(|k| !k.trim().is_empty());
    if enable || has_key {
        BridgeConfig::enabled(key)
    } else {
        BridgeConfig::disabled()
    }
}
