use crate::error::{CheckError, ErrorKind};

/// Outcome of one update check. Produced exactly once per check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    UpToDate,
    UpdateAvailable {
        new_version: String,
        download_url: Option<String>,
        mandatory: bool,
    },
    LookupFailed {
        reason: ErrorKind,
        message: String,
    },
}

impl UpdateDecision {
    #[must_use]
    pub fn is_update_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable { .. })
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<ErrorKind> {
        match self {
            Self::LookupFailed { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl From<CheckError> for UpdateDecision {
    fn from(error: CheckError) -> Self {
        Self::LookupFailed {
            reason: error.kind(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateDecision;
    use crate::error::{CheckError, ErrorKind};

    #[test]
    fn check_error_converts_to_lookup_failed() {
        let decision = UpdateDecision::from(CheckError::decode_from("expected value"));

        assert_eq!(decision.failure_reason(), Some(ErrorKind::DecodeError));
        assert!(matches!(
            decision,
            UpdateDecision::LookupFailed { ref message, .. } if message.contains("expected value")
        ));
    }

    #[test]
    fn up_to_date_has_no_failure_reason() {
        assert_eq!(UpdateDecision::UpToDate.failure_reason(), None);
        assert!(!UpdateDecision::UpToDate.is_update_available());
    }
}
