//! Out-pass Data

/// A student's out-pass application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOutPass {
    pub reason_type: String,
    pub reason: String,

    /// Overrides the phone number on the student's profile when present.
    pub contact_number: Option<String>,
}

impl NewOutPass {
    /// Trim every field, dropping a blank contact number.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            reason_type: self.reason_type.trim().to_string(),
            reason: self.reason.trim().to_string(),
            contact_number: self
                .contact_number
                .map(|number| number.trim().to_string())
                .filter(|number| !number.is_empty()),
        }
    }

    /// The first required field left blank, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.reason_type.trim().is_empty() {
            Some("reason_type")
        } else if self.reason.trim().is_empty() {
            Some("reason")
        } else {
            None
        }
    }
}
