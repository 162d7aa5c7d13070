pub(crate) mod common;

mod generate_api_test;
