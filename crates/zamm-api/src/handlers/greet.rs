//! The `greet` method.

use std::convert::Infallible;

use crate::method::ApiMethod;
use crate::models::{GreetRequest, GreetResponse};

/// Renders the greeting for `name`.
pub fn greeting_for(name: &str) -> String {
    format!("Hello, {name}! You have been greeted from Rust")
}

/// Says hello.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetMethod;

impl ApiMethod for GreetMethod {
    type Request = GreetRequest;
    type Response = GreetResponse;
    type Error = Infallible;

    fn name(&self) -> &'static str {
        "greet"
    }

    fn invoke(&self, request: GreetRequest) -> Result<GreetResponse, Infallible> {
        Ok(GreetResponse {
            greeting: greeting_for(&request.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::named("World", "Hello, World! You have been greeted from Rust")]
    #[case::empty("", "Hello, ! You have been greeted from Rust")]
    fn greets_by_name(#[case] name: &str, #[case] expected: &str) {
        let response = GreetMethod
            .invoke(GreetRequest {
                name: name.to_owned(),
            })
            .expect("greet never fails");
        assert_eq!(response.greeting, expected);
    }
}
