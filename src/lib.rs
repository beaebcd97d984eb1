pub mod cli;
pub mod fetcher;
pub mod request;
pub mod telemetry;
pub mod transport;

pub use fetcher::{ContestPageFetcher, ContestPageFetcherBuilder, FetchError, Outcome};
pub use request::{PageRequest, PageResponse, RequestHeader};
pub use transport::{ReqwestTransport, Transport};
