#![allow(dead_code)]

mod builders;
mod dns_server_mock;
mod mock_handler;

pub use builders::*;
pub use dns_server_mock::*;
pub use mock_handler::*;
