use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod stream;
mod style;

pub use spinner::Spinner;
pub use stream::print_translation;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive prompt, turning user cancellation into `Ok(None)`.
///
/// If the user cancels (Ctrl+C or Escape), a newline is printed to clean up
/// the terminal instead of propagating the error.
pub fn handle_prompt_cancellation<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
