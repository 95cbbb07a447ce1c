//! Helpers for driving cinematics in tests

use void_ai::{CombatWorld, DialogueCompleted};

pub use void_ai::testing::{RecordingDialogue, RecordingUi};

/// Announce that a conversation ended, as a dialogue system would
pub fn finish_conversation(world: &CombatWorld, conversation: &str) {
    world.events().publish(DialogueCompleted {
        conversation: conversation.to_string(),
    });
}
