//! Result type alias for Caredesk

use super::errors::CaredeskError;

/// Result type alias for Caredesk operations
///
/// # Examples
///
/// ```
/// use caredesk::domain::result::Result;
/// use caredesk::domain::errors::CaredeskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CaredeskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CaredeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(CaredeskError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
