//! Ticket domain entity

use chrono::{DateTime, Utc};

use crate::domain::{normalize_email, DomainError, DomainResult};

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 5000;

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Guidance shown next to the priority picker
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Low => "Small bug or minor annoyance",
            Self::Medium => "Causing delays or slowness",
            Self::High => "Critical issue affecting work",
        }
    }

    /// Case-insensitive parse
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(DomainError::Validation(format!(
                "Unknown priority '{}': expected Low, Medium or High",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [Self::Open, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Done => "done",
        }
    }

    /// Case-insensitive parse. `in_progress` and `in-progress` are accepted
    /// alongside the canonical `in progress`.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(DomainError::Validation(format!(
                "Unknown status '{}': expected open, in progress or done",
                other
            ))),
        }
    }

    /// Anything not done still needs attention
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Done)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Support ticket
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    /// Issue text
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Normalized creator email. Never changes after creation.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submission form contents
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Option<TicketPriority>,
}

/// Owner edit: only these fields may change
#[derive(Debug, Clone, Default)]
pub struct TicketEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
}

impl TicketEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none()
    }
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct TicketQuery {
    /// Restrict to tickets created by this (normalized) email
    pub created_by: Option<String>,
    pub status: Option<TicketStatus>,
}

impl Ticket {
    /// Build a new open ticket from a submission.
    pub fn submit(form: NewTicket, created_by: &str) -> DomainResult<Self> {
        let title = validate_title(&form.title)?;
        let description = validate_description(&form.description)?;
        let now = Utc::now();

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description,
            priority: form.priority.unwrap_or_default(),
            status: TicketStatus::Open,
            created_by: normalize_email(created_by),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an owner edit. Validation happens before any field changes.
    pub fn apply_edit(&mut self, edit: TicketEdit) -> DomainResult<()> {
        if edit.is_empty() {
            return Err(DomainError::Validation("Nothing to update".into()));
        }

        let title = edit.title.as_deref().map(validate_title).transpose()?;
        let description = edit
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn is_created_by(&self, email: &str) -> bool {
        self.created_by == normalize_email(email)
    }
}

fn validate_title(raw: &str) -> DomainResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("Title is required".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_description(raw: &str) -> DomainResult<String> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(DomainError::Validation("Please describe the issue".into()));
    }
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_LEN
        )));
    }
    Ok(description.to_string())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, description: &str) -> NewTicket {
        NewTicket {
            title: title.into(),
            description: description.into(),
            priority: None,
        }
    }

    #[test]
    fn submit_opens_ticket_with_defaults() {
        let t = Ticket::submit(form(" Printer ", " Jammed again "), " Alice@Corp.com ").unwrap();
        assert_eq!(t.title, "Printer");
        assert_eq!(t.description, "Jammed again");
        assert_eq!(t.priority, TicketPriority::Low);
        assert_eq!(t.status, TicketStatus::Open);
        assert_eq!(t.created_by, "alice@corp.com");
        assert!(t.is_created_by("ALICE@corp.com"));
    }

    #[test]
    fn submit_rejects_blank_issue_text() {
        let err = Ticket::submit(form("VPN", "   \n "), "a@b.c").unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("describe")));

        let err = Ticket::submit(form("", "desc"), "a@b.c").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn submit_rejects_overlong_title() {
        let long = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(Ticket::submit(form(&long, "desc"), "a@b.c").is_err());
    }

    #[test]
    fn edit_keeps_creator_and_status() {
        let mut t = Ticket::submit(form("Laptop", "Slow boot"), "a@b.c").unwrap();
        t.set_status(TicketStatus::InProgress);

        t.apply_edit(TicketEdit {
            title: Some("Laptop fan".into()),
            description: None,
            priority: Some(TicketPriority::High),
        })
        .unwrap();

        assert_eq!(t.title, "Laptop fan");
        assert_eq!(t.description, "Slow boot");
        assert_eq!(t.priority, TicketPriority::High);
        assert_eq!(t.status, TicketStatus::InProgress);
        assert_eq!(t.created_by, "a@b.c");
    }

    #[test]
    fn invalid_edit_changes_nothing() {
        let mut t = Ticket::submit(form("Laptop", "Slow boot"), "a@b.c").unwrap();
        let before = t.clone();

        let err = t
            .apply_edit(TicketEdit {
                title: Some("New title".into()),
                description: Some("  ".into()),
                priority: None,
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(t, before);
        assert!(t.apply_edit(TicketEdit::default()).is_err());
    }

    #[test]
    fn status_parsing_is_lenient_on_case_and_separator() {
        assert_eq!(TicketStatus::parse("Open").unwrap(), TicketStatus::Open);
        assert_eq!(TicketStatus::parse("in progress").unwrap(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::parse("IN_PROGRESS").unwrap(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::parse(" done ").unwrap(), TicketStatus::Done);
        assert!(TicketStatus::parse("closed").is_err());
        assert!(!TicketStatus::Done.is_active());
        assert!(TicketStatus::InProgress.is_active());
    }

    #[test]
    fn priority_parsing_and_hints() {
        assert_eq!(TicketPriority::parse("high").unwrap(), TicketPriority::High);
        assert_eq!(TicketPriority::parse("Medium").unwrap(), TicketPriority::Medium);
        assert!(TicketPriority::parse("urgent").is_err());
        assert_eq!(TicketPriority::High.hint(), "Critical issue affecting work");
    }
}
