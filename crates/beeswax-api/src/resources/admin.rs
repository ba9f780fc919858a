// Administrative resources: login, password reset, roles and users
//
// `authenticate` and `change_password` don't follow the usual CRUD shapes,
// so their accessors carry named operations instead of the capability traits.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Accessor, Create, Delete, Resource, resource};
use crate::error::Error;
use crate::params::Params;
use crate::session::{AUTHENTICATE_PATH, RequestOptions};

/// `authenticate`: explicit login, credential change and logout.
pub enum Authentication {}

impl Resource for Authentication {
    const PATH: &'static str = AUTHENTICATE_PATH;
}

impl Accessor<Authentication> {
    /// Log in with `password` plus identifying `fields`
    /// (`email`, `user_id`, `account_id`, `keep_logged_in`), sent as a JSON body.
    pub async fn login<T: DeserializeOwned>(
        &self,
        password: &SecretString,
        fields: Params,
    ) -> Result<T, Error> {
        let body = Params::new()
            .with("password", password.expose_secret())
            .merge_under(fields);
        self.request(Method::POST, &[AUTHENTICATE_PATH], RequestOptions::body(body))
            .await
    }

    /// Replace the password of `user_id`.
    pub async fn change_password<T: DeserializeOwned>(
        &self,
        user_id: impl Into<Value>,
        password: &SecretString,
        new_password: &SecretString,
    ) -> Result<T, Error> {
        let query = Params::new()
            .with("user_id", user_id)
            .with("password", password.expose_secret())
            .with("new_password", new_password.expose_secret());
        self.request(Method::PUT, &[AUTHENTICATE_PATH], RequestOptions::query(query))
            .await
    }

    /// End the current session.
    pub async fn logout<T: DeserializeOwned>(&self) -> Result<T, Error> {
        self.request(Method::DELETE, &[AUTHENTICATE_PATH], RequestOptions::default())
            .await
    }
}

/// `change_password`: the emailed password-reset flow.
pub enum Password {}

impl Resource for Password {
    const PATH: &'static str = "change_password";
}

impl Accessor<Password> {
    /// Ask for a reset token to be emailed to `email`.
    pub async fn request_reset<T: DeserializeOwned>(
        &self,
        user_id: impl Into<Value>,
        email: &str,
    ) -> Result<T, Error> {
        let body = Params::new().with("user_id", user_id).with("email", email);
        self.request(Method::POST, &[Password::PATH], RequestOptions::body(body))
            .await
    }

    /// Set a new password using the emailed `login_token`.
    pub async fn reset<T: DeserializeOwned>(
        &self,
        login_token: &str,
        new_password: &SecretString,
        fields: Params,
    ) -> Result<T, Error> {
        let query = Params::new()
            .with("login_token", login_token)
            .with("new_password", new_password.expose_secret())
            .merge_under(fields);
        self.request(Method::PUT, &[Password::PATH], RequestOptions::query(query))
            .await
    }
}

resource!(
    /// `role`: permission bundles assigned to users.
    Role => "role", id: "role_id"; Retrieve, List, Update
);

impl Create for Role {
    const REQUIRED: &'static [&'static str] = &["role_name", "parent_role_id", "permissions"];
}

impl Delete for Role {}

resource!(
    /// `user`
    User => "user", id: "user_id"; Retrieve, List, Update
);

impl Create for User {
    const REQUIRED: &'static [&'static str] = &["email", "role_id"];
}

impl Delete for User {}
