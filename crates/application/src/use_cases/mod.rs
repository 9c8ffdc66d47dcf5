pub mod filter_response;

pub use filter_response::FilterResponseUseCase;
