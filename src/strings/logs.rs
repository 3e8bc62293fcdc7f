pub fn config_loaded(user: &str) -> String {
    format!("Loaded configuration for user: {user}")
}

pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";
pub const STARTING: &str = "Starting Event Planner...";

pub fn store_opened(url: &str) -> String {
    format!("Event store ready at {url}")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn set_display_name_fail(err: &str) -> String {
    format!("Failed to set display name: {err}")
}

pub const SYNC_LOOP_START: &str = "Starting sync loop...";

pub fn sync_loop_fail(err: &str) -> String {
    format!("Sync loop failed: {err}")
}

pub fn invite_received(room_id: &str) -> String {
    format!("💌 Received invite for room {room_id:?}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}

pub fn reply_failed(target: &str, err: &str) -> String {
    format!("Failed to deliver reply to {target}: {err}")
}

pub fn delivery_failed(user_id: &str, err: &str) -> String {
    format!("Notification to {user_id} failed: {err}")
}

pub fn rollback_failed(err: &str, rollback: &str) -> String {
    format!("Rollback failed after '{err}': {rollback}")
}

pub fn router_dispatch(verb: &str, args: &str, sender: &str) -> String {
    format!("Router dispatching verb='{verb}' args='{args}' sender='{sender}'")
}

pub fn command_refused(reason: &str) -> String {
    format!("Command refused: {reason}")
}

pub fn store_failure(content: &str, err: &str) -> String {
    format!("Store failure handling '{content}': {err}")
}

pub fn event_created(id: i64, name: &str, creator_id: &str) -> String {
    format!("Event {id} '{name}' created by {creator_id}")
}

pub fn create_failed(name: &str, err: &str) -> String {
    format!("Failed to create event '{name}': {err}")
}

pub fn event_cancelled(id: i64, name: &str, responses: usize) -> String {
    format!("Event {id} '{name}' cancelled; {responses} rsvps read before removal")
}

pub fn edit_failed(field: &str, id: i64, err: &str) -> String {
    format!("Failed to update {field} of event {id}: {err}")
}

pub fn event_edited(id: i64, field: &str, editor: &str) -> String {
    format!("Event {id} {field} updated by {editor}")
}

pub fn roster_unavailable(id: i64, err: &str) -> String {
    format!("Could not load rsvps of event {id} for notification: {err}")
}

pub fn rsvp_updated(rsvp_id: i64, event_id: i64, status: &str) -> String {
    format!("Updated rsvp {rsvp_id} for event {event_id} to {status}")
}

pub fn rsvp_recorded(rsvp_id: i64, event_id: i64, status: &str) -> String {
    format!("Recorded rsvp {rsvp_id} for event {event_id} as {status}")
}

pub fn notification_task_failed(err: &str) -> String {
    format!("Notification task failed: {err}")
}

pub fn notification_panicked(err: &str) -> String {
    format!("Notification delivery panicked: {err}")
}

pub fn sending_message(channel_id: &str, content: &str) -> String {
    format!("Bot sending message to {channel_id}: {content}")
}
