pub mod helpers;

pub use helpers::{client_options, create_llm_client, create_storage, parse_bind_addr};
