//! StoreSession - 门店上下文会话
//!
//! 激活时订阅该门店的商品快照，首个视图同步计算；之后由后台 worker
//! 在每个快照到达时全量重算 [`CatalogView`] 并通过 watch 发布。
//! 切换门店或 teardown 时取消订阅。

use std::sync::Arc;

use shared::models::{Product, StoreContext};
use shared::{AppError, AppResult, ErrorCode};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

use super::Config;
use crate::db::{CatalogStore, Subscription};
use crate::services::CatalogView;

/// Active view of one store context
pub struct StoreSession {
    id: Uuid,
    store: StoreContext,
    catalog: Arc<dyn CatalogStore>,
    config: Config,
    view_tx: Arc<watch::Sender<Arc<CatalogView>>>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for StoreSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSession")
            .field("id", &self.id)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl StoreSession {
    /// 激活门店上下文
    ///
    /// 返回时首个视图已就绪
    pub async fn activate(
        catalog: Arc<dyn CatalogStore>,
        store: StoreContext,
        config: Config,
    ) -> AppResult<Self> {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("store_session", session_id = %id, store = %store);

        let mut subscription = catalog.subscribe_products(store);
        let products = subscription.next().await.ok_or_else(|| {
            AppError::with_message(ErrorCode::SessionClosed, "Product feed closed")
        })?;
        let view = CatalogView::load(catalog.as_ref(), store, &products)
            .instrument(span.clone())
            .await?;

        let (view_tx, _) = watch::channel(Arc::new(view));
        let view_tx = Arc::new(view_tx);
        let shutdown = CancellationToken::new();

        let worker = SessionWorker {
            store,
            catalog: catalog.clone(),
            subscription,
            view_tx: view_tx.clone(),
            debounce: Duration::from_millis(config.snapshot_debounce_ms),
            shutdown: shutdown.clone(),
        };
        let handle = tokio::spawn(worker.run().instrument(span));

        tracing::info!(session_id = %id, store = %store, "Store session activated");
        Ok(Self {
            id,
            store,
            catalog,
            config,
            view_tx,
            shutdown,
            worker: Some(handle),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> StoreContext {
        self.store
    }

    /// 当前视图
    pub fn view(&self) -> Arc<CatalogView> {
        self.view_tx.borrow().clone()
    }

    /// 订阅视图更新
    pub fn watch_view(&self) -> watch::Receiver<Arc<CatalogView>> {
        self.view_tx.subscribe()
    }

    /// 立即按当前快照重算并发布
    pub async fn refresh(&self) -> AppResult<Arc<CatalogView>> {
        let products = self.catalog.subscribe_products(self.store).latest();
        let view = Arc::new(CatalogView::load(self.catalog.as_ref(), self.store, &products).await?);
        self.view_tx.send_replace(view.clone());
        Ok(view)
    }

    /// 切换到另一个门店上下文
    pub async fn switch_to(self, other: StoreContext) -> AppResult<Self> {
        let catalog = self.catalog.clone();
        let config = self.config.clone();
        self.teardown().await;
        Self::activate(catalog, other, config).await
    }

    /// 取消订阅并等待 worker 退出
    pub async fn teardown(mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.worker.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(session_id = %self.id, "Session worker ended abnormally: {e}");
        }
        tracing::info!(session_id = %self.id, store = %self.store, "Store session torn down");
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// 后台重算任务
struct SessionWorker {
    store: StoreContext,
    catalog: Arc<dyn CatalogStore>,
    subscription: Subscription<Product>,
    view_tx: Arc<watch::Sender<Arc<CatalogView>>>,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl SessionWorker {
    async fn run(mut self) {
        tracing::debug!("Session worker started");

        // 合并窗口内只保留最新快照
        let mut pending: Option<Arc<Vec<Product>>> = None;
        let mut deadline: Option<Instant> = None;

        loop {
            let sleep_until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("Session worker shutting down");
                    break;
                }

                _ = tokio::time::sleep_until(sleep_until), if deadline.is_some() => {
                    deadline = None;
                    if let Some(products) = pending.take() {
                        self.recompute(&products).await;
                    }
                }

                snapshot = self.subscription.next() => {
                    let Some(products) = snapshot else {
                        tracing::info!("Product feed closed, session worker stopping");
                        break;
                    };
                    if self.debounce.is_zero() {
                        self.recompute(&products).await;
                    } else {
                        pending = Some(products);
                        deadline = Some(Instant::now() + self.debounce);
                    }
                }
            }
        }
    }

    /// 重算失败时保留上一个视图
    async fn recompute(&self, products: &[Product]) {
        match CatalogView::load(self.catalog.as_ref(), self.store, products).await {
            Ok(view) => {
                self.view_tx.send_replace(Arc::new(view));
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog view recompute failed, keeping previous view");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use rust_decimal::Decimal;
    use shared::models::ProductCreate;

    fn gummies() -> ProductCreate {
        ProductCreate {
            brand_id: Some("wyld".into()),
            category: Some("edibles".into()),
            name: "Wyld Raspberry".into(),
            price: Decimal::new(1800, 2),
            stock_quantity: 8,
            in_stock: true,
            images: vec![],
            description: None,
            details: None,
        }
    }

    async fn next_view(rx: &mut watch::Receiver<Arc<CatalogView>>) -> Arc<CatalogView> {
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("view update timed out")
            .expect("view channel closed");
        rx.borrow_and_update().clone()
    }

    #[tokio::test]
    async fn test_activate_computes_first_view() {
        let store = Arc::new(MemoryStore::new());
        store.create_product(StoreContext::Primary, gummies()).await.unwrap();

        let session = StoreSession::activate(store, StoreContext::Primary, Config::for_tests())
            .await
            .unwrap();
        assert_eq!(session.view().products.len(), 1);
        assert_eq!(session.view().store, StoreContext::Primary);
        session.teardown().await;
    }

    #[tokio::test]
    async fn test_snapshot_triggers_recompute() {
        let store = Arc::new(MemoryStore::new());
        let session =
            StoreSession::activate(store.clone(), StoreContext::Primary, Config::for_tests())
                .await
                .unwrap();
        let mut rx = session.watch_view();
        assert!(rx.borrow_and_update().products.is_empty());

        store.create_product(StoreContext::Primary, gummies()).await.unwrap();
        let view = next_view(&mut rx).await;
        assert_eq!(view.products.len(), 1);
        session.teardown().await;
    }

    #[tokio::test]
    async fn test_failed_recompute_keeps_previous_view() {
        let store = Arc::new(MemoryStore::new());
        let session =
            StoreSession::activate(store.clone(), StoreContext::Primary, Config::for_tests())
                .await
                .unwrap();
        let before = session.view();

        store.fail_reads();
        store.create_product(StoreContext::Primary, gummies()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(Arc::ptr_eq(&before, &session.view()));
        assert!(session.refresh().await.is_err());

        store.heal();
        let view = session.refresh().await.unwrap();
        assert_eq!(view.products.len(), 1);
        session.teardown().await;
    }

    #[tokio::test]
    async fn test_switch_to_sibling() {
        let store = Arc::new(MemoryStore::new());
        store.create_product(StoreContext::Secondary, gummies()).await.unwrap();

        let session =
            StoreSession::activate(store.clone(), StoreContext::Primary, Config::for_tests())
                .await
                .unwrap();
        assert!(session.view().products.is_empty());

        let session = session.switch_to(StoreContext::Secondary).await.unwrap();
        assert_eq!(session.store(), StoreContext::Secondary);
        assert_eq!(session.view().products.len(), 1);
        session.teardown().await;
    }

    #[tokio::test]
    async fn test_refresh_picks_up_order_list() {
        let store = Arc::new(MemoryStore::new());
        let session =
            StoreSession::activate(store.clone(), StoreContext::Primary, Config::for_tests())
                .await
                .unwrap();
        store
            .set_order_list(
                shared::models::OrderScope::brands(StoreContext::Primary),
                vec!["marlboro".into()],
            )
            .await
            .unwrap();
        let view = session.refresh().await.unwrap();
        assert_eq!(view.brand_ids()[0], "marlboro");
        assert_eq!(session.view().brand_ids()[0], "marlboro");
        session.teardown().await;
    }
}
