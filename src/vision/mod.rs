mod client;
mod types;

pub use client::{AzureFaceClient, FaceAnalyzer};
pub use types::{DetectedFace, FaceRectangle, VerifyResult};
