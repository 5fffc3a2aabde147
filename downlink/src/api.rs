//! Messages and clients for the part of the ChirpStack v4 gRPC API used here.
//!
//! Kept in the shape `tonic-build` emits so the crate builds without `protoc`.
//! Field tags follow `api/internal.proto` and `api/device.proto`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub email: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginResponse {
    #[prost(string, tag = "1")]
    pub jwt: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeviceQueueItem {
    /// Assigned by the server.
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub dev_eui: ::prost::alloc::string::String,
    #[prost(bool, tag = "3")]
    pub confirmed: bool,
    #[prost(uint32, tag = "4")]
    pub f_port: u32,
    #[prost(bytes = "vec", tag = "5")]
    pub data: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "7")]
    pub is_pending: bool,
    #[prost(uint32, tag = "8")]
    pub f_cnt_down: u32,
    #[prost(bool, tag = "9")]
    pub is_encrypted: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnqueueDeviceQueueItemRequest {
    #[prost(message, optional, tag = "1")]
    pub queue_item: ::core::option::Option<DeviceQueueItem>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnqueueDeviceQueueItemResponse {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
/// Generated client implementations.
pub mod internal_service_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    #[derive(Debug, Clone)]
    pub struct InternalServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl<T> InternalServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub async fn login(
            &mut self,
            request: impl tonic::IntoRequest<super::LoginRequest>,
        ) -> Result<tonic::Response<super::LoginResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/api.InternalService/Login");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
/// Generated client implementations.
pub mod device_service_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    #[derive(Debug, Clone)]
    pub struct DeviceServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl<T> DeviceServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        /// Adds the given item to the device downlink queue.
        pub async fn enqueue(
            &mut self,
            request: impl tonic::IntoRequest<super::EnqueueDeviceQueueItemRequest>,
        ) -> Result<tonic::Response<super::EnqueueDeviceQueueItemResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/api.DeviceService/Enqueue");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
