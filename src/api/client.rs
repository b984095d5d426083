//! HTTP client for the marketplace backend.
//!
//! Every read returns the `{ "data": ... }` envelope. Writes only care about
//! the status code. Failures carry the backend's optional `message` so the UI
//! can show it verbatim.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{Envelope, ErrorBody, Purpose, Route, TicketRequest, Vehicle};
use crate::core::session::Session;

/// Everything the screens need from the backend.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `GET /api/busRoute/all`
    async fn daily_routes(&self) -> Result<Vec<Route>, ApiError>;

    /// `GET /api/vehicle/purpose/{PURPOSE}/`
    async fn vehicles_for(&self, purpose: Purpose) -> Result<Vec<Vehicle>, ApiError>;

    /// `PATCH /api/busRoute/addToFavourite?routeId={id}`
    async fn add_favourite(&self, route_id: &str) -> Result<(), ApiError>;

    /// `POST /api/ticketRequest?routeId={id}`
    async fn send_ticket_request(
        &self,
        route_id: &str,
        request: &TicketRequest,
    ) -> Result<(), ApiError>;
}

/// `reqwest`-backed implementation. Injects `Authorization: Bearer <token>`
/// when the session carries one.
pub struct HttpApi {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: &str, session: &Session, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            token: session.token().map(str::to_string),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Backend response status: {}", response.status());

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        warn!("Backend error: {} - {}", status, body);
        Err(ApiError::Api { status, message })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl MarketplaceApi for HttpApi {
    async fn daily_routes(&self) -> Result<Vec<Route>, ApiError> {
        let routes: Vec<Route> = self.get_data("/api/busRoute/all").await?;
        info!("Fetched {} daily routes", routes.len());
        Ok(routes)
    }

    async fn vehicles_for(&self, purpose: Purpose) -> Result<Vec<Vehicle>, ApiError> {
        let path = format!("/api/vehicle/purpose/{}/", purpose.as_path());
        let vehicles: Vec<Vehicle> = self.get_data(&path).await?;
        info!("Fetched {} vehicles for {:?}", vehicles.len(), purpose);
        Ok(vehicles)
    }

    async fn add_favourite(&self, route_id: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PATCH, "/api/busRoute/addToFavourite")
            .query(&[("routeId", route_id)]);
        self.send(builder).await?;
        info!("Route {} added to favourites", route_id);
        Ok(())
    }

    async fn send_ticket_request(
        &self,
        route_id: &str,
        request: &TicketRequest,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/ticketRequest")
            .query(&[("routeId", route_id)])
            .json(request);
        self.send(builder).await?;
        info!(
            "Ticket request sent for route {} ({} people)",
            route_id, request.number_of_people
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_http_base_url() {
        let result = HttpApi::new("ftp://example.com", &Session::anonymous(), Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let api = HttpApi::new("http://localhost:8080/", &Session::anonymous(), Duration::from_secs(5))
            .unwrap();
        assert_eq!(api.base_url, "http://localhost:8080");
        assert!(api.token.is_none());
    }

    #[test]
    fn test_new_captures_session_token() {
        let session = Session::new("Asha", "9876543210", Some("tok-1".to_string()));
        let api = HttpApi::new("https://api.example.com", &session, Duration::from_secs(5)).unwrap();
        assert_eq!(api.token.as_deref(), Some("tok-1"));
    }
}
