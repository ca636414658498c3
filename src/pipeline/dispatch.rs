use anyhow::Result;

use crate::actions::{Action, EventRecord, EventSink};
use crate::config::Profile;
use crate::gestures::Gesture;

pub fn dispatch_gesture(g: Gesture, t: f64, profile: &Profile, sink: &mut EventSink) -> Result<()> {
    let action = profile.action_for(g);
    let token = match &action {
        Action::Emit(token) => Some(token.clone()),
        _ => None,
    };

    sink.emit(&EventRecord {
        t,
        gesture: g,
        token,
    })?;

    if let Action::Command(cmd) = action {
        sink.run_command(&cmd)?;
    }
    Ok(())
}
