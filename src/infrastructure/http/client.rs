use crate::domain::entities::{
    Credentials, EntityKind, LoginResponse, PendingAttachment, RecordId, Session,
};
use crate::domain::ports::attachment_gateway::AttachmentGateway;
use crate::domain::ports::auth_gateway::AuthGateway;
use crate::domain::ports::record_gateway::RecordGateway;
use crate::infrastructure::http::error::{ApiError, ApiResult, ErrorBody};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

const LOGIN_PATH: &str = "/auth/login";

/// Multipart field the API reads the image from.
const IMAGE_FIELD: &str = "image";

/// reqwest-backed adapter for every gateway port.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(request: RequestBuilder) -> ApiResult<Value> {
        let response = Self::check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// For calls whose reply carries nothing we use: any 2xx is success and
    /// the body, JSON or not, is dropped.
    async fn send_unit(request: RequestBuilder) -> ApiResult<()> {
        Self::check_status(request.send().await?).await?;
        Ok(())
    }

    /// Pass a 2xx response through, or turn the failure into an `ApiError`
    /// carrying the server's `message`.
    async fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        debug!(
            path = response.url().path(),
            status = status.as_u16(),
            "API response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::from_status(status, message))
    }

    /// `{base}{base_path}/{id}` with the id escaped as a single path segment.
    fn record_url(&self, base_path: &str, id: &RecordId) -> ApiResult<Url> {
        let mut url = Url::parse(&self.url(base_path))
            .map_err(|e| ApiError::Transport(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("API URL cannot take a path".to_string()))?
            .push(&id.to_string());
        Ok(url)
    }

    /// Decode list rows one by one. A row that does not decode is logged and
    /// left out instead of failing the whole list.
    fn decode_rows<K: EntityKind>(rows: Value) -> ApiResult<Vec<K::Record>> {
        let Value::Array(rows) = rows else {
            return Err(ApiError::Decode(format!(
                "'{}' is not a list",
                K::ROUTES.collection_field
            )));
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row
                    .get(K::ROUTES.delete_id_field)
                    .map(Value::to_string)
                    .unwrap_or_else(|| "?".to_string());
                match serde_json::from_value(row) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(kind = K::LABEL, id = %id, "Skipping unreadable row: {}", e);
                        None
                    }
                }
            })
            .collect())
    }

    fn take_field(body: &mut Value, field: &'static str) -> ApiResult<Value> {
        match body.get_mut(field).map(Value::take) {
            Some(Value::Null) | None => Err(ApiError::MissingField(field)),
            Some(value) => Ok(value),
        }
    }
}

#[async_trait]
impl<K: EntityKind> RecordGateway<K> for ApiClient {
    async fn list(&self, session: &Session) -> ApiResult<Vec<K::Record>> {
        let routes = K::ROUTES;
        let mut body = Self::send(
            self.http
                .get(self.url(routes.list))
                .bearer_auth(session.token()),
        )
        .await?;

        let collection = Self::take_field(&mut body, routes.collection_field)?;
        Self::decode_rows::<K>(collection)
    }

    async fn create(&self, session: &Session, draft: &K::Draft) -> ApiResult<RecordId> {
        let routes = K::ROUTES;
        let mut body = Self::send(
            self.http
                .post(self.url(routes.create))
                .bearer_auth(session.token())
                .json(draft),
        )
        .await?;

        let id = Self::take_field(&mut body, routes.created_id_field)?;
        Ok(serde_json::from_value(id)?)
    }

    async fn update(&self, session: &Session, changes: &K::Changes) -> ApiResult<()> {
        Self::send_unit(
            self.http
                .put(self.url(K::ROUTES.update))
                .bearer_auth(session.token())
                .json(changes),
        )
        .await
    }

    async fn delete(&self, session: &Session, id: &RecordId) -> ApiResult<()> {
        let routes = K::ROUTES;
        let mut body = Map::new();
        body.insert(routes.delete_id_field.to_string(), serde_json::to_value(id)?);

        Self::send_unit(
            self.http
                .delete(self.url(routes.delete))
                .bearer_auth(session.token())
                .json(&body),
        )
        .await
    }
}

#[async_trait]
impl AttachmentGateway for ApiClient {
    async fn upload_image(
        &self,
        session: &Session,
        base_path: &str,
        id: &RecordId,
        attachment: &PendingAttachment,
    ) -> ApiResult<()> {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let url = self.record_url(base_path, id)?;
        Self::send_unit(self.http.post(url).bearer_auth(session.token()).multipart(form)).await
    }
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let body = Self::send(self.http.post(self.url(LOGIN_PATH)).json(credentials)).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PetKind;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/pets/getPets"), "http://localhost:5000/api/pets/getPets");
    }

    #[test]
    fn test_take_field_rejects_missing_and_null() {
        let mut body = serde_json::json!({ "petId": null, "other": 1 });
        assert_eq!(
            ApiClient::take_field(&mut body, "petId"),
            Err(ApiError::MissingField("petId"))
        );
        assert_eq!(
            ApiClient::take_field(&mut body, "pets"),
            Err(ApiError::MissingField("pets"))
        );
        assert_eq!(ApiClient::take_field(&mut body, "other"), Ok(serde_json::json!(1)));
    }

    #[test]
    fn test_record_url_escapes_id() {
        let client = ApiClient::new("http://localhost:5000/api", Duration::from_secs(5)).unwrap();

        let url = client.record_url("/pets/image", &RecordId::from(42)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/pets/image/42");

        let url = client
            .record_url("/pets/image", &RecordId::from("a/b?c#d"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/pets/image/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let rows = serde_json::json!([
            { "petId": "p1", "name": "Rex", "description": "Friendly", "type": "Dog", "price": 1500, "stock": 3 },
            { "petId": "p2", "name": "Tom", "description": "Shy", "type": "Cat", "price": "", "stock": "" }
        ]);

        let pets = ApiClient::decode_rows::<PetKind>(rows).unwrap();
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Rex");
    }

    #[test]
    fn test_collection_must_be_a_list() {
        let err = ApiClient::decode_rows::<PetKind>(serde_json::json!({ "petId": "p1" })).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
