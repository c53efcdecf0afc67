pub mod fetcher;
pub mod traits;

pub use fetcher::VendorFetcher;
pub use traits::PageFetcher;
