mod db;
mod redis;

pub use self::db::connect_to_mongo;
pub use self::redis::RedisService;
