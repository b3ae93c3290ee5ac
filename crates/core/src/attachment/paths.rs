//! Deterministic logical paths for attachments.

use uuid::Uuid;

/// The entity an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOwner {
    /// An accounts payable title.
    Payable(Uuid),
    /// A project.
    Project(Uuid),
    /// A time entry.
    TimeEntry(Uuid),
}

impl AttachmentOwner {
    fn prefix(&self) -> (&'static str, Uuid) {
        match self {
            Self::Payable(id) => ("accounts-payable", *id),
            Self::Project(id) => ("projects", *id),
            Self::TimeEntry(id) => ("time-entries", *id),
        }
    }
}

/// The logical storage path of an attachment:
/// `{owner-kind}/{owner-id}/attachments/{basename}`.
///
/// Any directory components in the filename are stripped; only the
/// basename is kept.
#[must_use]
pub fn attachment_path(owner: AttachmentOwner, filename: &str) -> String {
    let safe_name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let (kind, id) = owner.prefix();
    format!("{kind}/{id}/attachments/{safe_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payable_path() {
        let id = Uuid::parse_str("0195f8b2-4c6e-7c3a-9d2f-1a2b3c4d5e6f").unwrap();
        assert_eq!(
            attachment_path(AttachmentOwner::Payable(id), "nota.pdf"),
            format!("accounts-payable/{id}/attachments/nota.pdf")
        );
    }

    #[test]
    fn test_filename_is_sanitized_to_basename() {
        let id = Uuid::now_v7();
        assert_eq!(
            attachment_path(AttachmentOwner::Project(id), "../../etc/passwd"),
            format!("projects/{id}/attachments/passwd")
        );
        assert_eq!(
            attachment_path(AttachmentOwner::TimeEntry(id), "c:\\temp\\recibo.png"),
            format!("time-entries/{id}/attachments/recibo.png")
        );
    }

    #[test]
    fn test_path_is_deterministic() {
        let id = Uuid::now_v7();
        let owner = AttachmentOwner::Payable(id);
        assert_eq!(
            attachment_path(owner, "nota.pdf"),
            attachment_path(owner, "nota.pdf")
        );
    }
}
