pub mod api_key;
pub mod metrics;
pub mod security_headers;
pub mod timing;
pub mod tracing;

pub use api_key::{
    API_KEY_HEADER, AuthFailure, RequestAuthenticator, SharedSecretAuthenticator,
    api_key_middleware,
};
