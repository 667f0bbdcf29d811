use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Engine response for a food name scored on a feature list
    Recommendations {
        food_name: String,
        features: Vec<String>,
    },
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Recommendations {
                food_name,
                features,
            } => write!(
                f,
                "recs:{}:{}",
                food_name.to_lowercase(),
                features.join(",")
            ),
        }
    }
}

/// Opens a Redis client for the response cache
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// A pending write handed to the writer task
struct PendingWrite {
    key: String,
    value: String,
    ttl: u64,
}

/// JSON cache in Redis with writes offloaded to a background task
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    write_tx: mpsc::UnboundedSender<PendingWrite>,
}

/// Stops the writer task once queued writes are flushed
pub struct CacheWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl CacheWriterHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Cache writer shutdown requested");
    }
}

impl Cache {
    /// Builds the cache and spawns its writer task
    pub async fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let client = redis_client.clone();
        tokio::spawn(async move {
            Self::run_writer(client, write_rx, shutdown_rx).await;
        });

        (
            Self {
                redis_client,
                write_tx,
            },
            CacheWriterHandle { shutdown_tx },
        )
    }

    async fn run_writer(
        client: Client,
        mut write_rx: mpsc::UnboundedReceiver<PendingWrite>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("Cache writer started");
        let mut failed_writes = 0usize;

        loop {
            tokio::select! {
                Some(write) = write_rx.recv() => {
                    if let Err(e) = Self::store(&client, write).await {
                        failed_writes += 1;
                        tracing::error!(error = %e, failed_writes, "Cache write failed");
                    }
                }
                _ = shutdown_rx.recv() => {
                    // Drain whatever is still queued before exiting
                    write_rx.close();
                    while let Some(write) = write_rx.recv().await {
                        if let Err(e) = Self::store(&client, write).await {
                            tracing::error!(error = %e, "Cache write failed during shutdown");
                        }
                    }

                    tracing::info!(failed_writes, "Cache writer stopped");
                    break;
                }
            }
        }
    }

    async fn store(client: &Client, write: PendingWrite) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(write.key, write.value, write.ttl).await?;
        Ok(())
    }

    /// Reads and decodes a cached value; `None` on a miss
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        cached
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| AppError::Internal(format!("Cache deserialization error: {}", e)))
            })
            .transpose()
    }

    /// Queues a value for writing and returns immediately
    ///
    /// Serialization or queueing failures are logged and otherwise ignored:
    /// a lost cache write only costs a later miss.
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let value = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Cache serialization error");
                return;
            }
        };

        let write = PendingWrite {
            key: key.to_string(),
            value,
            ttl,
        };

        if let Err(e) = self.write_tx.send(write) {
            tracing::error!(error = %e, "Cache writer is gone, dropping write");
        }
    }
}
