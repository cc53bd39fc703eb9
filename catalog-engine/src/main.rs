use std::sync::Arc;

use catalog_engine::{AdminService, MemoryStore, StoreSession, setup_environment};
use shared::models::StoreContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment()?;

    tracing::info!("Catalog engine starting (in-memory store)...");

    // 2. 初始化存储与种子分类
    let store = Arc::new(MemoryStore::new());
    let admin = AdminService::new(store.clone(), &config);
    for ctx in StoreContext::ALL {
        admin.install_seed_categories(ctx).await?;
    }

    // 3. 激活主门店会话
    let session = StoreSession::activate(store, StoreContext::Primary, config).await?;
    let view = session.view();
    tracing::info!(
        store = %view.store,
        categories = view.categories.len(),
        brands = view.brands.len(),
        "Store session ready"
    );
    println!("{}", serde_json::to_string_pretty(view.as_ref())?);

    // 4. 等待退出信号
    tokio::signal::ctrl_c().await?;
    session.teardown().await;
    tracing::info!("Catalog engine stopped");

    Ok(())
}
