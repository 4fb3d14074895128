//! View models for client selection cards.

use serde::Serialize;

use crate::domain::client::Client;

/// Avatar backgrounds, assigned by list position.
pub const AVATAR_COLORS: [&str; 4] = ["#4ECDC4", "#A8A8FF", "#90EE90", "#F0E68C"];

/// A client as shown in the selection grid. The derived display fields are
/// recomputed on every render and never stored.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientCard {
    pub id: i32,
    pub full_name: String,
    pub company: Option<String>,
    pub office_email: Option<String>,
    pub office_phone: Option<String>,
    pub initials: String,
    pub color: &'static str,
}

/// Up to two upper-cased initials from the first and last words of `name`.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().and_then(|w| w.chars().next());
    let last = words.next_back().and_then(|w| w.chars().next());

    first
        .into_iter()
        .chain(last)
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn avatar_color(index: usize) -> &'static str {
    AVATAR_COLORS[index % AVATAR_COLORS.len()]
}

impl ClientCard {
    pub fn new(client: &Client, index: usize) -> Self {
        Self {
            id: client.id.get(),
            full_name: client.full_name.to_string(),
            company: client.company.clone(),
            office_email: client.office_email.as_ref().map(ToString::to_string),
            office_phone: client.office_phone.as_ref().map(ToString::to_string),
            initials: initials(client.full_name.as_str()),
            color: avatar_color(index),
        }
    }
}

/// Cards for `clients` in list order.
pub fn client_cards(clients: &[Client]) -> Vec<ClientCard> {
    clients
        .iter()
        .enumerate()
        .map(|(index, client)| ClientCard::new(client, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(initials("randy dias"), "RD");
        assert_eq!(initials("Mary Ann van Dyke"), "MD");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn colors_cycle() {
        assert_eq!(avatar_color(0), "#4ECDC4");
        assert_eq!(avatar_color(4), "#4ECDC4");
        assert_eq!(avatar_color(3), "#F0E68C");
    }
}
