//! Per-role ticket access policy
//!
//! | Caller               | view | edit/delete | change status |
//! |----------------------|------|-------------|---------------|
//! | admin                | all  | no          | yes           |
//! | employee, creator    | yes  | yes         | no            |
//! | employee, not creator| no   | no          | no            |

use super::model::Ticket;
use crate::domain::{Actor, DomainError, DomainResult, UserRole};

/// Controls a caller may use on one ticket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketPermissions {
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_change_status: bool,
}

impl TicketPermissions {
    pub fn for_actor(actor: &Actor, ticket: &Ticket) -> Self {
        match actor.role {
            UserRole::Admin => Self {
                can_view: true,
                can_edit: false,
                can_delete: false,
                can_change_status: true,
            },
            UserRole::Employee => {
                let owner = ticket.is_created_by(&actor.email);
                Self {
                    can_view: owner,
                    can_edit: owner,
                    can_delete: owner,
                    can_change_status: false,
                }
            }
        }
    }
}

/// Hidden tickets surface as not found so their existence is not disclosed.
pub fn ensure_can_view(actor: &Actor, ticket: &Ticket) -> DomainResult<()> {
    if TicketPermissions::for_actor(actor, ticket).can_view {
        Ok(())
    } else {
        Err(DomainError::ticket_not_found(&ticket.id))
    }
}

pub fn ensure_can_edit(actor: &Actor, ticket: &Ticket) -> DomainResult<()> {
    ensure_can_view(actor, ticket)?;
    if TicketPermissions::for_actor(actor, ticket).can_edit {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Only the employee who created a ticket can edit it".into(),
        ))
    }
}

pub fn ensure_can_delete(actor: &Actor, ticket: &Ticket) -> DomainResult<()> {
    ensure_can_view(actor, ticket)?;
    if TicketPermissions::for_actor(actor, ticket).can_delete {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Only the employee who created a ticket can delete it".into(),
        ))
    }
}

pub fn ensure_can_change_status(actor: &Actor, ticket: &Ticket) -> DomainResult<()> {
    ensure_can_view(actor, ticket)?;
    if TicketPermissions::for_actor(actor, ticket).can_change_status {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Only administrators can change ticket status".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::NewTicket;

    fn ticket_by(email: &str) -> Ticket {
        Ticket::submit(
            NewTicket {
                title: "Monitor".into(),
                description: "Flickers".into(),
                priority: None,
            },
            email,
        )
        .unwrap()
    }

    #[test]
    fn owner_employee_can_edit_and_delete_only() {
        let actor = Actor::new("u1", "Alice@corp.com", UserRole::Employee);
        let perms = TicketPermissions::for_actor(&actor, &ticket_by("alice@corp.com"));
        assert_eq!(
            perms,
            TicketPermissions {
                can_view: true,
                can_edit: true,
                can_delete: true,
                can_change_status: false,
            }
        );
    }

    #[test]
    fn non_owner_employee_sees_no_controls() {
        let actor = Actor::new("u2", "bob@corp.com", UserRole::Employee);
        let ticket = ticket_by("alice@corp.com");
        let perms = TicketPermissions::for_actor(&actor, &ticket);
        assert_eq!(perms, TicketPermissions::default());

        assert!(matches!(
            ensure_can_edit(&actor, &ticket),
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            ensure_can_delete(&actor, &ticket),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn admin_changes_status_but_does_not_edit() {
        let admin = Actor::new("a1", "root@corp.com", UserRole::Admin);
        let ticket = ticket_by("alice@corp.com");
        let perms = TicketPermissions::for_actor(&admin, &ticket);
        assert!(perms.can_view);
        assert!(perms.can_change_status);
        assert!(!perms.can_edit);
        assert!(!perms.can_delete);

        assert!(ensure_can_change_status(&admin, &ticket).is_ok());
        assert!(matches!(
            ensure_can_edit(&admin, &ticket),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn owner_cannot_change_status() {
        let actor = Actor::new("u1", "alice@corp.com", UserRole::Employee);
        assert!(matches!(
            ensure_can_change_status(&actor, &ticket_by("alice@corp.com")),
            Err(DomainError::Forbidden(_))
        ));
    }
}
