//! User endpoints.

use super::BerayClient;
use crate::error::BerayResult;
use crate::models::User;
use crate::traits::Method;

impl BerayClient {
    /// Profile of the signed-in user.
    pub async fn get_current_user(&self) -> BerayResult<User> {
        self.execute_as(self.request(Method::Get, "/users/me")).await
    }
}
