use crate::api::device_service_client::DeviceServiceClient;
use crate::api::internal_service_client::InternalServiceClient;
use crate::api::{DeviceQueueItem, EnqueueDeviceQueueItemRequest, LoginRequest};
use crate::errors::{Error, Result};
use crate::model::QueueItem;
use async_trait::async_trait;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::{Channel, Endpoint};
use tonic::Code;
use tracing::{debug, info};

/// The two network-server calls the downlink session needs.
#[async_trait]
pub trait DownlinkService {
    /// Exchanges credentials for a session token.
    async fn login(&mut self, email: &str, password: &str) -> Result<String>;

    /// Enqueues `item` and returns the queue item id assigned by the server.
    async fn enqueue(&mut self, token: &str, item: &QueueItem) -> Result<String>;
}

/// ChirpStack gRPC API over a plaintext channel.
#[derive(Debug, Clone)]
pub struct ChirpstackClient {
    channel: Channel,
}

impl ChirpstackClient {
    /// The channel connects on first use, so this only fails on a malformed
    /// endpoint.
    pub fn new(endpoint: &str) -> Result<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())?.connect_lazy();
        Ok(Self { channel })
    }
}

#[async_trait]
impl DownlinkService for ChirpstackClient {
    async fn login(&mut self, email: &str, password: &str) -> Result<String> {
        info!(email, "Logging in to ChirpStack");

        let mut client = InternalServiceClient::new(self.channel.clone());
        let response = client
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(|status| match status.code() {
                Code::Unauthenticated | Code::PermissionDenied => {
                    Error::Auth(status.message().to_string())
                }
                _ => Error::Login(status),
            })?;

        let jwt = response.into_inner().jwt;
        if jwt.is_empty() {
            return Err(Error::Auth("server returned an empty token".to_string()));
        }
        Ok(jwt)
    }

    async fn enqueue(&mut self, token: &str, item: &QueueItem) -> Result<String> {
        debug!(
            dev_eui = %item.dev_eui,
            f_port = item.f_port,
            bytes = item.payload.bytes().len(),
            confirmed = item.confirmed,
            "Enqueueing downlink"
        );

        let mut request = tonic::Request::new(EnqueueDeviceQueueItemRequest {
            queue_item: Some(DeviceQueueItem {
                dev_eui: item.dev_eui.clone(),
                f_port: item.f_port,
                data: item.payload.bytes().to_vec(),
                confirmed: item.confirmed,
                ..Default::default()
            }),
        });
        let bearer: MetadataValue<Ascii> = format!("Bearer {}", token).parse()?;
        request.metadata_mut().insert("authorization", bearer);

        let mut client = DeviceServiceClient::new(self.channel.clone());
        let id = client.enqueue(request).await?.into_inner().id;
        if id.is_empty() {
            return Err(Error::Enqueue("server returned no queue id".to_string()));
        }

        info!(dev_eui = %item.dev_eui, queue_id = %id, "Downlink queued");
        Ok(id)
    }
}
