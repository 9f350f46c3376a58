//! Custom assertion macros and utilities
//!
//! Provides assertion macros for common response checks with more
//! descriptive failure messages.

/// Assert a response status, printing the body on failure
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "unexpected status, body: {}",
            $response.body
        );
    };
}

/// Assert an error response by status and message
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr, $message:expr) => {
        $crate::assert_status!($response, $status);
        assert_eq!($response.error(), $message);
        assert_eq!($response.body["status"], $status.as_u16());
    };
}

/// Assert the 401 returned for any rejected credential
#[macro_export]
macro_rules! assert_credentials_rejected {
    ($response:expr) => {
        $crate::assert_error!(
            $response,
            axum::http::StatusCode::UNAUTHORIZED,
            "Could not validate credentials"
        );
        assert_eq!(
            $response
                .headers
                .get(axum::http::header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    };
}

/// Assert that a JSON body never exposes password material
#[macro_export]
macro_rules! assert_no_secrets {
    ($body:expr) => {
        let text = $body.to_string();
        assert!(!text.contains("hashed_password"), "body leaks hash: {}", text);
        assert!(!text.contains("\"salt\""), "body leaks salt: {}", text);
    };
}
