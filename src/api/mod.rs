// Provider boundary: OAuth token handling and raw payload retrieval.

pub mod amadeus;
pub mod traits;

pub use amadeus::{AmadeusClient, TokenCache};
pub use traits::FlightApi;
