//! What counts as an answered field.

use crate::constants::NOT_APPLICABLE;
use crate::types::{Date, Timestamp};

/// A submitted field value as seen by the rule combinators.
pub trait Answer {
    /// `true` when nothing was entered: absent, empty text, or no selections.
    fn is_blank(&self) -> bool;

    /// `true` when the stored code is the N/A sentinel.
    fn is_not_applicable(&self) -> bool {
        false
    }

    /// Entered and not N/A.
    fn is_provided(&self) -> bool {
        !self.is_blank() && !self.is_not_applicable()
    }
}

impl Answer for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn is_not_applicable(&self) -> bool {
        self == NOT_APPLICABLE
    }
}

impl Answer for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }

    fn is_not_applicable(&self) -> bool {
        self.as_str().is_not_applicable()
    }
}

impl Answer for i32 {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Answer for Date {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Answer for Timestamp {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Answer for [String] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Answer for Vec<String> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Answer> Answer for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Answer::is_blank)
    }

    fn is_not_applicable(&self) -> bool {
        self.as_ref().is_some_and(Answer::is_not_applicable)
    }
}
