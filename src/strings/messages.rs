//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes usage errors, event summaries, disambiguation lists and notification templates.

use crate::domain::types::{EditableField, Event, Rsvp, RsvpStatus, Verb};

pub const UNKNOWN_COMMAND: &str = "❓ Unknown command. Try `!event help`.";
pub const NOT_ALLOWED: &str = "🚫 Sorry, I can't take planner commands from you.";
pub const STORE_FAILURE: &str = "⚠️ Something went wrong talking to the event database. Please try again later.";

pub const CREATE_USAGE: &str = "Usage: `!event create name|description|location|date|time`";
pub const INFO_USAGE: &str = "Usage: `!event info eventID` or `!event info eventName`";
pub const CANCEL_USAGE: &str = "Usage: `!event cancel eventID`";
pub const EDIT_USAGE: &str = "Usage: `!event edit eventID|field|newValue`";
pub const RSVP_USAGE: &str = "Usage: `!event rsvp eventID|choice`";

pub const VALID_FIELDS: &str = "Valid fields: desc, desc+ (append an update), loc, date, time";
pub const VALID_CHOICES: &str = "Valid RSVP choices: G[oing], M[aybe], N[ot going]";

pub const CREATE_FAILED: &str =
    "Event creation failed.  Please make sure you are using the command correctly.";

pub fn no_events_found(token: &str) -> String {
    format!("No events found for `{token}`.  Try a different search.")
}

pub fn not_creator(event_name: &str) -> String {
    format!("🚫 Only the creator of **{event_name}** can do that.")
}

pub fn unknown_field(field: &str) -> String {
    format!("`{field}` is not an editable field. {VALID_FIELDS}")
}

pub fn unknown_choice(choice: &str) -> String {
    format!("`{choice}` is not an RSVP choice. {VALID_CHOICES}")
}

/// The command to retype once an id is known, e.g. `!event rsvp <ID>|choice`.
pub fn retry_hint(trigger: &str, verb: &Verb) -> String {
    match verb {
        Verb::Edit => format!("{trigger} edit <ID>|field|newValue"),
        Verb::Rsvp => format!("{trigger} rsvp <ID>|choice"),
        other => format!("{trigger} {} <ID>", other.as_str()),
    }
}

pub fn disambiguation(events: &[Event], trigger: &str, verb: &Verb) -> String {
    let mut listing = String::from("Your query matched the following events:\n");
    for event in events {
        listing.push_str(&format!(
            "• **{}** on {} at {} (ID: {})\n",
            event.name, event.date, event.time, event.id
        ));
    }
    listing.push_str(&format!(
        "Select one event by its ID with `{}`.",
        retry_hint(trigger, verb)
    ));
    listing
}

pub fn event_created(event: &Event) -> String {
    format!(
        "**Created event:** {}\n**Description:** {}\n**When:** {} at {}\n**Where:** {}\nYour event ID is {}.\nRemember this ID if you wish to make changes to your event.",
        event.name, event.description, event.date, event.time, event.location, event.id
    )
}

pub fn event_details(event: &Event, responses: &[Rsvp]) -> String {
    format!(
        "__**{}**__ (ID: {})\n**Created by:** {}\n**When:** {} at {}\n**Where:** {}\n**Description:** {}\n**RSVPs:** {}",
        event.name,
        event.id,
        event.creator,
        event.date,
        event.time,
        event.location,
        event.description,
        roster(responses)
    )
}

/// All responses on one line, e.g. `alice (Going), bob (Maybe)`.
pub fn roster(responses: &[Rsvp]) -> String {
    if responses.is_empty() {
        return "No RSVPs yet.".to_string();
    }
    responses
        .iter()
        .map(|r| format!("{} ({})", r.username, r.status))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn cancel_acknowledged(event: &Event) -> String {
    format!("🗑️ Your event **{}** (ID: {}) was cancelled.", event.name, event.id)
}

pub fn event_cancelled(event: &Event) -> String {
    format!(
        "❌ **{}** on {} at {} has been cancelled by {}.",
        event.name, event.date, event.time, event.creator
    )
}

pub fn edit_succeeded(event: &Event, field: &EditableField, value: &str) -> String {
    format!(
        "✅ Updated the {} of **{}** (ID: {}) to: {}",
        field.label(),
        event.name,
        event.id,
        value
    )
}

pub fn edit_failed(event: &Event, field: &EditableField) -> String {
    format!(
        "⚠️ Failed to update the {} of **{}**. Please try again later.",
        field.label(),
        event.name
    )
}

pub fn event_changed(event: &Event, field: &EditableField, value: &str) -> String {
    format!(
        "📝 **{}** changed. New {}: {}",
        event.name,
        field.label(),
        value
    )
}

pub fn description_update(existing: &str, addition: &str, stamp: &str) -> String {
    let line = format!("**Update ({stamp}):** {addition}");
    if existing.is_empty() {
        line
    } else {
        format!("{existing}\n{line}")
    }
}

pub fn rsvp_recorded(event: &Event, status: RsvpStatus) -> String {
    format!(
        "Your RSVP for **{}** (ID: {}) is recorded as: {}",
        event.name, event.id, status
    )
}
