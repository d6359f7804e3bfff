use async_trait::async_trait;

/// Readiness probe for the service's backing stores.
#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    /// Succeeds when the database answers a trivial query.
    async fn check_database(&self) -> anyhow::Result<()>;
}
