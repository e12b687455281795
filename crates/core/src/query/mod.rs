//! Manager queries about an employee's entry.

use chrono::NaiveDate;
use shiftpay_shared::Notification;

use crate::allowance::EntryType;

/// A manager's question about one day of an employee's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerQuery {
    /// Where the query is sent.
    pub employee_email: String,
    /// Name of the asking manager.
    pub manager_name: String,
    /// Day the query is about.
    pub date: NaiveDate,
    /// Entry type code as shown to the manager.
    pub entry_type: String,
    /// The manager's question.
    pub message: String,
}

impl ManagerQuery {
    /// Returns the entry type's label, or the raw code if it is not known.
    fn type_label(&self) -> &str {
        self.entry_type
            .parse::<EntryType>()
            .map_or(self.entry_type.as_str(), |t| t.label())
    }

    /// Builds the notification sent to the employee.
    #[must_use]
    pub fn compose(&self) -> Notification {
        let label = self.type_label();
        let date = self.date.format("%Y-%m-%d");

        let subject = format!("Query regarding your {label} on {date}");
        let body = format!(
            "Hello,\n\n\
             Your manager {manager} has a query regarding your {label} on {date}:\n\n\
             {message}\n\n\
             Please respond to this query at your earliest convenience.",
            manager = self.manager_name,
            message = self.message.trim(),
        );

        Notification {
            recipient: self.employee_email.clone(),
            subject,
            body,
        }
    }
}
