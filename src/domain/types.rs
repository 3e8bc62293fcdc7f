//! # Domain Types
//!
//! Entities stored by the planner (events and RSVPs) and the closed vocabularies
//! the command surface maps user input onto.

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Database, Decode, Encode, FromRow, Type};
use std::fmt;
use std::str::FromStr;

pub type EventId = i64;

/// A scheduled event. `name` and the creator fields never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub location: String,
    #[sqlx(rename = "event_date")]
    pub date: String,
    #[sqlx(rename = "event_time")]
    pub time: String,
    pub creator: String,
    pub creator_id: String,
}

impl Event {
    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }
}

/// Event fields supplied by `create`, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub creator: String,
    pub creator_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsvpStatus {
    Going,
    Maybe,
    NotGoing,
}

impl RsvpStatus {
    /// Maps a user-typed choice (`g`, `maybe`, `Not Going`, ...) onto a status.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "g" | "going" => Some(Self::Going),
            "m" | "maybe" => Some(Self::Maybe),
            "n" | "not going" => Some(Self::NotGoing),
            _ => None,
        }
    }

    /// Storage and display form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Going => "Going",
            Self::Maybe => "Maybe",
            Self::NotGoing => "Not going",
        }
    }

    /// Going and Maybe responders hear about changes to the event.
    pub fn wants_updates(&self) -> bool {
        matches!(self, Self::Going | Self::Maybe)
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Going" => Ok(Self::Going),
            "Maybe" => Ok(Self::Maybe),
            "Not going" => Ok(Self::NotGoing),
            other => Err(format!("unknown rsvp status '{other}'")),
        }
    }
}

/// Stored as its display text (`Going`, `Maybe`, `Not going`).
impl Type<Sqlite> for RsvpStatus {
    fn type_info() -> SqliteTypeInfo {
        <str as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <str as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for RsvpStatus {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&'r str as Decode<'r, Sqlite>>::decode(value)?;
        Ok(text.parse::<RsvpStatus>()?)
    }
}

impl<'q> Encode<'q, Sqlite> for RsvpStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer,
    ) -> Result<IsNull, BoxDynError> {
        <&'q str as Encode<'q, Sqlite>>::encode(self.as_str(), buf)
    }
}

/// One user's attendance response to one event.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Rsvp {
    pub id: i64,
    pub event_id: EventId,
    pub username: String,
    pub user_id: String,
    pub status: RsvpStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub event_id: EventId,
    pub username: String,
    pub user_id: String,
    pub status: RsvpStatus,
}

/// Columns of `events` that may be rewritten after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    Description,
    Location,
    Date,
    Time,
}

impl EventColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Location => "location",
            Self::Date => "event_date",
            Self::Time => "event_time",
        }
    }
}

/// Field names accepted by `edit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditableField {
    Description,
    /// `desc+`: keep the current description and append a dated update line.
    AppendDescription,
    Location,
    Date,
    Time,
    Unknown(String),
}

impl EditableField {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "description" | "desc" => Self::Description,
            "description+" | "desc+" => Self::AppendDescription,
            "location" | "loc" => Self::Location,
            "date" => Self::Date,
            "time" => Self::Time,
            _ => Self::Unknown(name.trim().to_string()),
        }
    }

    pub fn column(&self) -> Option<EventColumn> {
        match self {
            Self::Description | Self::AppendDescription => Some(EventColumn::Description),
            Self::Location => Some(EventColumn::Location),
            Self::Date => Some(EventColumn::Date),
            Self::Time => Some(EventColumn::Time),
            Self::Unknown(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Description | Self::AppendDescription => "description",
            Self::Location => "location",
            Self::Date => "date",
            Self::Time => "time",
            Self::Unknown(name) => name,
        }
    }
}

/// Command verbs following the trigger token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Create,
    Info,
    Cancel,
    Edit,
    Rsvp,
    Help,
    Unknown(String),
}

impl Verb {
    pub fn parse(word: &str) -> Self {
        match word.to_lowercase().as_str() {
            "create" => Self::Create,
            "info" => Self::Info,
            "cancel" => Self::Cancel,
            "edit" => Self::Edit,
            "rsvp" => Self::Rsvp,
            "help" => Self::Help,
            _ => Self::Unknown(word.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Info => "info",
            Self::Cancel => "cancel",
            Self::Edit => "edit",
            Self::Rsvp => "rsvp",
            Self::Help => "help",
            Self::Unknown(word) => word,
        }
    }
}

/// A text message delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub content: String,
    pub channel_id: String,
    pub author_id: String,
    pub author_username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsvp_choice_mapping() {
        assert_eq!(RsvpStatus::from_choice("g"), Some(RsvpStatus::Going));
        assert_eq!(RsvpStatus::from_choice("GOING"), Some(RsvpStatus::Going));
        assert_eq!(RsvpStatus::from_choice("m"), Some(RsvpStatus::Maybe));
        assert_eq!(RsvpStatus::from_choice(" Maybe "), Some(RsvpStatus::Maybe));
        assert_eq!(RsvpStatus::from_choice("n"), Some(RsvpStatus::NotGoing));
        assert_eq!(RsvpStatus::from_choice("Not Going"), Some(RsvpStatus::NotGoing));
        assert_eq!(RsvpStatus::from_choice("yes"), None);
        assert_eq!(RsvpStatus::from_choice(""), None);
    }

    #[test]
    fn test_rsvp_status_storage_form() {
        for status in [RsvpStatus::Going, RsvpStatus::Maybe, RsvpStatus::NotGoing] {
            assert_eq!(status.as_str().parse::<RsvpStatus>(), Ok(status));
        }
        assert!("going".parse::<RsvpStatus>().is_err());
    }

    #[test]
    fn test_only_going_and_maybe_want_updates() {
        assert!(RsvpStatus::Going.wants_updates());
        assert!(RsvpStatus::Maybe.wants_updates());
        assert!(!RsvpStatus::NotGoing.wants_updates());
    }

    #[test]
    fn test_editable_field_aliases() {
        assert_eq!(EditableField::parse("desc"), EditableField::Description);
        assert_eq!(EditableField::parse("Description"), EditableField::Description);
        assert_eq!(EditableField::parse("DESC+"), EditableField::AppendDescription);
        assert_eq!(EditableField::parse("loc"), EditableField::Location);
        assert_eq!(EditableField::parse("Date"), EditableField::Date);
        assert_eq!(EditableField::parse("time"), EditableField::Time);
        assert_eq!(
            EditableField::parse("name"),
            EditableField::Unknown("name".to_string())
        );
        assert_eq!(EditableField::parse("name").column(), None);
    }

    #[test]
    fn test_editable_fields_map_to_fixed_columns() {
        assert_eq!(
            EditableField::AppendDescription.column(),
            Some(EventColumn::Description)
        );
        assert_eq!(EventColumn::Date.column_name(), "event_date");
        assert_eq!(EventColumn::Time.column_name(), "event_time");
    }

    #[test]
    fn test_verb_parse_is_case_insensitive() {
        assert_eq!(Verb::parse("CREATE"), Verb::Create);
        assert_eq!(Verb::parse("Rsvp"), Verb::Rsvp);
        assert_eq!(Verb::parse("dance"), Verb::Unknown("dance".to_string()));
    }
}
