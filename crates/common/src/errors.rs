//! Error chain helpers used when reporting failures to the user.

mod private {
    use eyre::Chain;
    use std::error::Error;

    pub trait ErrorChain {
        fn chain(&self) -> Chain<'_>;
    }

    impl ErrorChain for dyn Error + 'static {
        fn chain(&self) -> Chain<'_> {
            Chain::new(self)
        }
    }

    impl ErrorChain for eyre::Report {
        fn chain(&self) -> Chain<'_> {
            self.chain()
        }
    }
}

/// Displays a chain of errors in a single line.
pub fn display_chain<E: private::ErrorChain + ?Sized>(error: &E) -> String {
    dedup_chain(error).join("; ")
}

/// Deduplicates a chain of errors.
///
/// Wrapping errors often repeat their source in their own message (`msg1: msg2; msg2`), only
/// the outermost occurrence is kept.
pub fn dedup_chain<E: private::ErrorChain + ?Sized>(error: &E) -> Vec<String> {
    let mut causes: Vec<String> =
        error.chain().map(|cause| cause.to_string().trim().to_string()).collect();
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{c32::C32Error, contract::ContractIdError};

    #[test]
    fn dedups_wrapped_sources() {
        let err = eyre::Report::from(ContractIdError::Address(C32Error::BadChecksum));
        assert_eq!(err.chain().count(), 2, "{err:?}");
        assert_eq!(display_chain(&err), "invalid contract address: c32check checksum mismatch");
    }

    #[test]
    fn keeps_distinct_context() {
        let err =
            eyre::Report::from(C32Error::TooShort).wrap_err("failed to load dividends config");
        assert_eq!(
            dedup_chain(&err),
            vec!["failed to load dividends config", "c32check payload is too short"]
        );
    }
}
