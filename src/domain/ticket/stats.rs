//! Ticket counts by status

use super::model::{Ticket, TicketStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl TicketStats {
    pub fn from_tickets<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        tickets
            .into_iter()
            .fold(Self::default(), |mut stats, ticket| {
                stats.total += 1;
                match ticket.status {
                    TicketStatus::Open => stats.open += 1,
                    TicketStatus::InProgress => stats.in_progress += 1,
                    TicketStatus::Done => stats.done += 1,
                }
                stats
            })
    }

    pub fn count(&self, status: TicketStatus) -> usize {
        match status {
            TicketStatus::Open => self.open,
            TicketStatus::InProgress => self.in_progress,
            TicketStatus::Done => self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::NewTicket;

    fn ticket(status: TicketStatus) -> Ticket {
        let mut t = Ticket::submit(
            NewTicket {
                title: "t".into(),
                description: "d".into(),
                priority: None,
            },
            "a@b.c",
        )
        .unwrap();
        t.set_status(status);
        t
    }

    #[test]
    fn counts_match_status_filters() {
        let tickets = vec![
            ticket(TicketStatus::Open),
            ticket(TicketStatus::Open),
            ticket(TicketStatus::InProgress),
            ticket(TicketStatus::Done),
        ];
        let stats = TicketStats::from_tickets(&tickets);

        assert_eq!(stats.total, tickets.len());
        for status in TicketStatus::ALL {
            let expected = tickets.iter().filter(|t| t.status == status).count();
            assert_eq!(stats.count(status), expected, "status {}", status);
        }
        assert_eq!(stats.open + stats.in_progress + stats.done, stats.total);
    }

    #[test]
    fn empty_set_is_all_zero() {
        assert_eq!(TicketStats::from_tickets(&[]), TicketStats::default());
    }
}
