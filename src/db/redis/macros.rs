/// Returns the cached value for `$key`, or awaits `$block`, queues the result
/// for caching with `$ttl` seconds, and returns it.
///
/// Expands to a `Result` expression. A failed cache read is logged and
/// treated as a miss. Errors from `$block` are propagated with `?`.
///
/// ```ignore
/// let response: EngineResponse = cached!(cache, key, 3600, engine.recommend(name, &features))?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(hit)) => {
                tracing::debug!(key = %$key, "Cache hit");
                Ok(hit)
            }
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %$key, error = %e, "Cache read failed, bypassing cache");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
