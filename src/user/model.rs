use serde::{Deserialize, Serialize};

/// Only the fields needed to put a name on an author identity; the user
/// documents themselves are owned by the account service.
#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}
