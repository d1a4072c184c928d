pub mod config;
pub mod logging;

pub mod credentials;
pub mod request_id;
pub mod response;
pub mod session;
pub mod storage;
pub mod submit;
