//! Core domain types for the SliceVote ordering backend.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Verb
// ---------------------------------------------------------------------------

/// HTTP verb label carried through errors and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Uppercase wire/display form (e.g. `GET`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SelfLinked
// ---------------------------------------------------------------------------

/// Implemented by resource objects that carry a canonical self link
/// (the backend serializes it under `_links`).
///
/// Types implementing this can be handed back to the API layer as a
/// resource reference instead of a raw path.
pub trait SelfLinked {
    /// The self link, if the backend supplied one.
    fn self_link(&self) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// Team resources
// ---------------------------------------------------------------------------

/// A team registered on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team name, unique on the backend.
    pub name: String,
    /// Canonical self link supplied by the backend.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,
}

impl SelfLinked for Team {
    fn self_link(&self) -> Option<&str> {
        self.links.as_deref()
    }
}

/// A selectable pizza ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,
}

impl SelfLinked for Ingredient {
    fn self_link(&self) -> Option<&str> {
        self.links.as_deref()
    }
}

/// A predefined pizza template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,
}

impl SelfLinked for Template {
    fn self_link(&self) -> Option<&str> {
        self.links.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Vote and order settings
// ---------------------------------------------------------------------------

/// How a team collects votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteModeKind {
    /// Open voting, no registration required.
    #[serde(rename = "std")]
    Std,
    /// Members must register before voting.
    #[serde(rename = "registration")]
    Registration,
}

impl std::fmt::Display for VoteModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteModeKind::Std => f.write_str("std"),
            VoteModeKind::Registration => f.write_str("registration"),
        }
    }
}

/// Vote mode setting of a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteMode {
    #[serde(rename = "voteMode")]
    pub vote_mode: VoteModeKind,
}

/// Whether a team's order is frozen (no further changes accepted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeState {
    pub freeze: bool,
}

/// How the order size is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Size counts people to feed.
    #[serde(rename = "persons")]
    Persons,
    /// Size counts individual pizza pieces.
    #[serde(rename = "pizzaPieces")]
    PizzaPieces,
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderKind::Persons => f.write_str("persons"),
            OrderKind::PizzaPieces => f.write_str("pizzaPieces"),
        }
    }
}

/// Order size setting (unit given by [`OrderType`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSize {
    pub size: u32,
}

/// Order size unit setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderType {
    #[serde(rename = "type")]
    pub kind: OrderKind,
}

/// Number of vegetarian portions in the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vegetarian {
    pub vegetarian: u32,
}

/// Number of portions that must not contain pork.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pork {
    #[serde(rename = "noPork")]
    pub no_pork: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_display_is_uppercase() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Patch.to_string(), "PATCH");
    }

    #[test]
    fn team_deserializes_with_self_link() {
        let team: Team =
            serde_json::from_str(r#"{"name":"backend","_links":"teams/backend"}"#).unwrap();
        assert_eq!(team.name, "backend");
        assert_eq!(team.self_link(), Some("teams/backend"));
    }

    #[test]
    fn team_without_links_has_no_self_link() {
        let team: Team = serde_json::from_str(r#"{"name":"backend"}"#).unwrap();
        assert_eq!(team.self_link(), None);
    }

    #[test]
    fn vote_mode_wire_names() {
        let mode: VoteMode = serde_json::from_str(r#"{"voteMode":"registration"}"#).unwrap();
        assert_eq!(mode.vote_mode, VoteModeKind::Registration);
        assert_eq!(
            serde_json::to_string(&mode).unwrap(),
            r#"{"voteMode":"registration"}"#
        );
    }

    #[test]
    fn order_type_wire_names() {
        let ty: OrderType = serde_json::from_str(r#"{"type":"pizzaPieces"}"#).unwrap();
        assert_eq!(ty.kind, OrderKind::PizzaPieces);
    }

    #[test]
    fn pork_uses_no_pork_field() {
        let pork: Pork = serde_json::from_str(r#"{"noPork":3}"#).unwrap();
        assert_eq!(pork.no_pork, 3);
        assert_eq!(serde_json::to_string(&pork).unwrap(), r#"{"noPork":3}"#);
    }
}
