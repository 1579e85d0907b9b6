use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use arrosage_bridge::app::Bridge;
use arrosage_bridge::models::FrameLayout;
use arrosage_bridge::services::{FrameParser, MockLink, SerialTransport};

pub struct MockApp {
    pub link: MockLink,
    pub bridge: Bridge,
    pub router: Router,
}

impl MockApp {
    pub fn new() -> Self {
        let link = MockLink::new();
        let transport = SerialTransport::connected(Box::new(link.clone()));

        Self::with_transport(link, transport)
    }

    pub fn without_rig() -> Self {
        Self::with_transport(MockLink::new(), SerialTransport::unavailable("No such file or directory"))
    }

    fn with_transport(link: MockLink, transport: SerialTransport) -> Self {
        let bridge = Bridge::new(transport, FrameParser::new(FrameLayout::Auto));
        let router = bridge.router();

        Self {
            link,
            bridge,
            router,
        }
    }

    /// Feeds one frame from the rig and runs a read pass.
    pub async fn receive(&self, line: &str) {
        self.link.feed_line(line);
        self.bridge.sensor_service.poll().await;
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn post(&self, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(Method::POST);
        if let Some(authorization) = authorization {
            builder = builder.header("Authorization", authorization);
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }
}
