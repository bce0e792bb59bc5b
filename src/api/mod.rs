// Classification server API client
//
// - POST /upload     multipart image upload, returns the classification
// - GET  /health     server and model readiness
// - GET  /api/info   service metadata

pub mod client;
pub mod error;
pub mod types;
