// Adapters layer: concrete implementations for external systems (OpenAlex
// HTTP API, local filesystem storage).

pub mod openalex;
pub mod storage;
