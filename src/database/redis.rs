use log::info;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

/// Read-only view of the session store the account service writes to.
#[derive(Clone)]
pub struct RedisService {
    connection: MultiplexedConnection,
}

impl RedisService {
    pub async fn connect(redis_url: &str) -> Result<Self, String> {
        let client = Client::open(redis_url)
            .map_err(|e| format!("Failed to create Redis client: {}", e))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Failed to connect to Redis: {}", e))?;

        info!("Connected successfully to Redis");

        Ok(Self { connection })
    }

    /// Identity bound to a live session token, if the session still exists.
    pub async fn validate_session(&self, token: &str) -> Result<Option<String>, String> {
        let mut conn = self.connection.clone();
        let token_key = format!("token:{}", token);

        let email: Option<String> = conn
            .get(&token_key)
            .await
            .map_err(|e| format!("Failed to validate session: {}", e))?;

        Ok(email)
    }
}
