//! Display validators
//!
//! Checks applied to already-sanitized text before it is shown.

pub mod display;

pub use display::*;

// Helper for running several checks and reporting every failure together
pub(crate) fn run_validators<T: ?Sized>(
    input: &T,
    validators: Vec<Box<dyn Fn(&T) -> crate::DigestResult<()>>>,
) -> crate::DigestResult<()> {
    let mut errors = Vec::new();

    for validator in validators {
        if let Err(err) = validator(input) {
            errors.push(err);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::errors::DigestError::composite(errors))
    }
}
