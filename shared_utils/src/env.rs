use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables. Empty values
/// count as missing.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn reads_present_variable() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_VAR", "http://localhost:5000/") };
        assert_eq!(
            get_env_var("SHARED_UTILS_TEST_VAR").unwrap(),
            "http://localhost:5000/"
        );
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_VAR") };
    }

    #[test]
    #[serial]
    fn missing_and_blank_variables_are_errors() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_VAR") };
        let err = get_env_var("SHARED_UTILS_TEST_VAR").unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: SHARED_UTILS_TEST_VAR");

        unsafe { std::env::set_var("SHARED_UTILS_TEST_VAR", "   ") };
        assert!(get_env_var("SHARED_UTILS_TEST_VAR").is_err());
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_VAR") };
    }
}
