#[cfg(test)]
pub mod invoke_endpoint_tests;
