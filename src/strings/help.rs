//! # Help Text
//!
//! Help message for planner commands.
//! Displayed to the user via the `help` verb.

pub const MAIN: &str = concat!(
    "**📅 Event Planner Help**\n",
    "Use: !event command _args_ (or the short form !ev)\n",
    "\n",
    "**Create event:** !event create name|description|location|date|time\n",
    "**Show event:** !event info eventID  OR  !event info eventName\n",
    "**Edit event:** !event edit eventID|field|newValue\n",
    "**Cancel event:** !event cancel eventID\n",
    "**RSVP:** !event rsvp eventID|choice  OR  !event rsvp eventName|choice\n",
    "\n",
    "**Editable fields:** desc, desc+ (append an update), loc, date, time\n",
    "**RSVP choices:** G[oing], M[aybe], N[ot going]\n",
    "Only the creator of an event can edit or cancel it. ",
    "`|` separates fields and cannot appear inside a value.\n"
);
