// Resource accessors
//
// Each Beeswax resource is a zero-sized marker type naming its URL path and
// identifying field. Capability traits (Retrieve, List, Create, Update,
// Delete, Upload) decide which operations `Accessor<R>` exposes for it, so
// calling e.g. `delete` on a read-only resource does not compile.
//
// All operations go through `Accessor::request`, the single place where
// results are decoded and local failures are folded into the protocol kind.

pub mod account;
pub mod admin;
pub mod creative;
pub mod extension;
pub mod monitoring;
pub mod operations;
pub mod segment;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::params::Params;
use crate::session::{RequestOptions, Session, UploadFile};

/// Path segment appended to the endpoint for two-step uploads.
pub const UPLOAD_SEGMENT: &str = "upload";

// ── Capability traits ────────────────────────────────────────────────

/// A Beeswax resource bound to a fixed URL path.
pub trait Resource {
    const PATH: &'static str;
}

/// A resource whose records are addressed by one identifying field.
pub trait Keyed: Resource {
    const ID: &'static str;
}

/// `GET` one record by id.
pub trait Retrieve: Keyed {
    /// Filters that must accompany the id.
    const REQUIRED: &'static [&'static str] = &[];
}

/// `GET` many records by filter.
pub trait List: Resource {}

/// `POST` a new record as a JSON body.
pub trait Create: Resource {
    /// Fields that must be present in the body.
    const REQUIRED: &'static [&'static str] = &[];
    /// `(caller name, wire name)` pairs applied after validation.
    const RENAMES: &'static [(&'static str, &'static str)] = &[];
}

/// `PUT` changes to a record, sent as query parameters.
pub trait Update: Keyed {
    /// Fields that must accompany the id.
    const REQUIRED: &'static [&'static str] = &[];
}

/// `DELETE` a record by id.
pub trait Delete: Keyed {
    /// Query field carrying the id, when it differs from [`Keyed::ID`].
    const KEY: Option<&'static str> = None;
}

/// Create an upload request, then `POST` the file to `{path}/upload/{id}`.
pub trait Upload: Create {}

/// Declare a resource marker type.
///
/// ```ignore
/// resource!(Campaign => "campaign", id: "campaign_id"; Retrieve, List, Update, Delete);
/// ```
macro_rules! resource {
    ($(#[$meta:meta])* $name:ident => $path:literal $(; $($cap:ident),+)?) => {
        $(#[$meta])*
        pub enum $name {}

        impl $crate::resources::Resource for $name {
            const PATH: &'static str = $path;
        }

        $($(impl $crate::resources::$cap for $name {})+)?
    };
    ($(#[$meta:meta])* $name:ident => $path:literal, id: $id:literal $(; $($cap:ident),+)?) => {
        $crate::resources::resource!($(#[$meta])* $name => $path $(; $($cap),+)?);

        impl $crate::resources::Keyed for $name {
            const ID: &'static str = $id;
        }
    };
}
pub(crate) use resource;

// ── Accessor ─────────────────────────────────────────────────────────

/// Handle on one resource, sharing the session with every other accessor.
pub struct Accessor<R> {
    session: Arc<Session>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("path", &R::PATH).finish()
    }
}

impl<R: Resource> Accessor<R> {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            _resource: PhantomData,
        }
    }

    /// The fixed URL path segment of this resource.
    pub fn path(&self) -> &'static str {
        R::PATH
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Run a request against `segments` and decode the payload.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<T, Error> {
        let payload = self.call(method, segments, options).await?;
        decode(payload)
    }

    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<Value, Error> {
        self.session
            .call(method, segments, &options)
            .await
            .map_err(Error::normalize)
    }
}

impl<R: Retrieve> Accessor<R> {
    /// Fetch the single record whose id field equals `id`.
    ///
    /// `filters` are sent alongside the id. The list-shaped payload is
    /// narrowed to its first element; an empty list is [`Error::NotFound`].
    pub async fn retrieve<T: DeserializeOwned>(
        &self,
        id: impl Into<Value>,
        filters: Params,
    ) -> Result<T, Error> {
        require(R::PATH, <R as Retrieve>::REQUIRED, &filters).map_err(Error::normalize)?;
        let id = id.into();
        let query = Params::new().with(R::ID, id.clone()).merge_under(filters);
        let payload = self
            .call(Method::GET, &[R::PATH], RequestOptions::query(query))
            .await?;
        let record = first_record(R::PATH, R::ID, &id, payload)?;
        decode(record)
    }
}

impl<R: List> Accessor<R> {
    /// Fetch every record matching `filters`.
    pub async fn list<T: DeserializeOwned>(&self, filters: Params) -> Result<T, Error> {
        self.request(Method::GET, &[R::PATH], RequestOptions::query(filters))
            .await
    }
}

impl<R: Create> Accessor<R> {
    /// Create a record from `fields`, sent as a JSON body.
    pub async fn create<T: DeserializeOwned>(&self, fields: Params) -> Result<T, Error> {
        let body = prepare_create::<R>(fields).map_err(Error::normalize)?;
        self.request(Method::POST, &[R::PATH], RequestOptions::body(body))
            .await
    }
}

impl<R: Update> Accessor<R> {
    /// Update the record identified by `id` with `fields`.
    pub async fn update<T: DeserializeOwned>(
        &self,
        id: impl Into<Value>,
        fields: Params,
    ) -> Result<T, Error> {
        require(R::PATH, <R as Update>::REQUIRED, &fields).map_err(Error::normalize)?;
        let query = Params::new().with(R::ID, id).merge_under(fields);
        self.request(Method::PUT, &[R::PATH], RequestOptions::query(query))
            .await
    }
}

impl<R: Delete> Accessor<R> {
    /// Delete the record identified by `id`.
    pub async fn delete<T: DeserializeOwned>(&self, id: impl Into<Value>) -> Result<T, Error> {
        let key = R::KEY.unwrap_or(R::ID);
        let query = Params::new().with(key, id);
        self.request(Method::DELETE, &[R::PATH], RequestOptions::query(query))
            .await
    }
}

impl<R: Upload> Accessor<R> {
    /// Two-step upload: create the upload request from `fields`, then post
    /// `file` to `{path}/upload/{id}` using the id the first step returned.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        fields: Params,
        file: UploadFile,
    ) -> Result<T, Error> {
        let request: Value = self.create(fields).await?;
        let id = upload_id(&request).map_err(Error::normalize)?;
        debug!(path = R::PATH, %id, file = %file.file_name, "uploading file");
        self.request(
            Method::POST,
            &[R::PATH, UPLOAD_SEGMENT, &id],
            RequestOptions::upload(file),
        )
        .await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, Error> {
    serde_json::from_value(payload)
        .map_err(|e| Error::protocol(format!("unexpected payload shape: {e}")))
}

/// Narrow a retrieve payload to one record.
///
/// Arrays yield their first element; a non-array payload is already a
/// single record.
fn first_record(path: &str, key: &str, id: &Value, payload: Value) -> Result<Value, Error> {
    let not_found = || Error::NotFound {
        path: path.to_owned(),
        key: key.to_owned(),
        value: match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    };
    match payload {
        Value::Array(items) => items.into_iter().next().ok_or_else(not_found),
        Value::Null => Err(not_found()),
        record => Ok(record),
    }
}

/// First field of `required` absent from `fields`, as [`Error::MissingField`].
fn require(path: &str, required: &[&str], fields: &Params) -> Result<(), Error> {
    match required.iter().find(|f| !fields.contains(f)) {
        Some(missing) => Err(Error::MissingField {
            path: path.to_owned(),
            field: (*missing).to_owned(),
        }),
        None => Ok(()),
    }
}

fn prepare_create<R: Create>(mut fields: Params) -> Result<Params, Error> {
    require(R::PATH, <R as Create>::REQUIRED, &fields)?;
    for (from, to) in R::RENAMES {
        fields.rename(from, to);
    }
    Ok(fields)
}

fn upload_id(request: &Value) -> Result<String, Error> {
    match request.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(Error::protocol(format!(
            "upload request returned no id: {request}"
        ))),
    }
}
