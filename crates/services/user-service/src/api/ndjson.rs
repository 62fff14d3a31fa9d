//! Line-delimited JSON responses.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use futures::{stream, StreamExt, TryStreamExt};

use common::{AppError, AppResult};

use crate::repository::UserStream;

/// Content type of a newline-delimited JSON body
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Streams users as one JSON object per line.
///
/// Build it with [`NdJson::start`] so a failure on the first page still
/// becomes a regular error response. Once the status line is out, a storage
/// error can only cut the body short; such errors are logged here.
pub struct NdJson(pub UserStream);

impl NdJson {
    /// Pull the first user before committing to `200 OK`.
    pub async fn start(mut users: UserStream) -> AppResult<Self> {
        let first = users.try_next().await?;
        Ok(Self(stream::iter(first.map(Ok)).chain(users).boxed()))
    }
}

impl IntoResponse for NdJson {
    fn into_response(self) -> Response {
        let lines = self
            .0
            .map(|item| {
                let user = item?;
                let mut line = serde_json::to_vec(&user)
                    .map_err(|e| AppError::internal(format!("serialize user: {e}")))?;
                line.push(b'\n');
                Ok::<_, AppError>(Bytes::from(line))
            })
            .inspect_err(|err| {
                tracing::error!(code = err.code(), error = ?err, "User stream aborted");
            });

        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(NDJSON_CONTENT_TYPE),
            )],
            Body::from_stream(lines),
        )
            .into_response()
    }
}
