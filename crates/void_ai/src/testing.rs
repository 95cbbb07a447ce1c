//! Recording collaborators for tests and headless simulation.
//!
//! Every double is `Clone`; clones share the same log, so a test keeps one
//! handle and gives the other to the world.

use crate::capabilities::{
    AnimationCueSink, AudioCueSink, DialogueCollaborator, Faction, ParameterKind,
    QuestCollaborator, Targetable, UiCollaborator,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use void_combat::{DamageInfo, DamageOutcome, Damageable, HealthTracker};
use void_math::Vec2;

#[derive(Debug)]
struct AnimatorLog {
    accept_all: bool,
    parameters: HashSet<String>,
    triggered: Vec<String>,
    reset: Vec<String>,
    visible: bool,
}

/// Animation sink that records cues
#[derive(Debug, Clone)]
pub struct RecordingAnimator {
    log: Arc<Mutex<AnimatorLog>>,
}

impl RecordingAnimator {
    /// Animator that has every parameter
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(AnimatorLog {
                accept_all: true,
                parameters: HashSet::new(),
                triggered: Vec::new(),
                reset: Vec::new(),
                visible: true,
            })),
        }
    }

    /// Animator that only has the listed parameters
    pub fn with_parameters(names: &[&str]) -> Self {
        let animator = Self::new();
        {
            let mut log = animator.log.lock();
            log.accept_all = false;
            log.parameters = names.iter().map(|name| name.to_string()).collect();
        }
        animator
    }

    pub fn triggered(&self) -> Vec<String> {
        self.log.lock().triggered.clone()
    }

    /// How many times `cue` was triggered
    pub fn count(&self, cue: &str) -> usize {
        self.log.lock().triggered.iter().filter(|c| c.as_str() == cue).count()
    }

    pub fn resets(&self) -> Vec<String> {
        self.log.lock().reset.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.log.lock().visible
    }
}

impl Default for RecordingAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationCueSink for RecordingAnimator {
    fn trigger(&mut self, cue: &str) {
        self.log.lock().triggered.push(cue.to_string());
    }

    fn reset_cue(&mut self, cue: &str) {
        self.log.lock().reset.push(cue.to_string());
    }

    fn has_parameter(&self, name: &str, _kind: ParameterKind) -> bool {
        let log = self.log.lock();
        log.accept_all || log.parameters.contains(name)
    }

    fn set_visible(&mut self, visible: bool) {
        self.log.lock().visible = visible;
    }
}

/// Audio sink that records played cues
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    played: Arc<Mutex<Vec<(String, f32)>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().iter().map(|(cue, _)| cue.clone()).collect()
    }

    pub fn count(&self, cue: &str) -> usize {
        self.played.lock().iter().filter(|(c, _)| c == cue).count()
    }
}

impl AudioCueSink for RecordingAudio {
    fn play(&mut self, cue: &str, delay: f32) {
        self.played.lock().push((cue.to_string(), delay));
    }
}

/// Quest collaborator that records completed objectives
#[derive(Debug, Clone, Default)]
pub struct RecordingQuest {
    completed: Arc<Mutex<Vec<String>>>,
}

impl RecordingQuest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().clone()
    }
}

impl QuestCollaborator for RecordingQuest {
    fn complete_objective_by_title(&mut self, title: &str) {
        self.completed.lock().push(title.to_string());
    }
}

/// Dialogue collaborator that records started conversations
#[derive(Debug, Clone, Default)]
pub struct RecordingDialogue {
    started: Arc<Mutex<Vec<String>>>,
}

impl RecordingDialogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().clone()
    }
}

impl DialogueCollaborator for RecordingDialogue {
    fn start_conversation(&mut self, id: &str) {
        self.started.lock().push(id.to_string());
    }
}

#[derive(Debug, Default)]
struct UiLog {
    hidden: bool,
    hide_calls: u32,
    restore_calls: u32,
}

/// UI collaborator that tracks HUD visibility
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    log: Arc<Mutex<UiLog>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.log.lock().hidden
    }

    pub fn hide_calls(&self) -> u32 {
        self.log.lock().hide_calls
    }

    pub fn restore_calls(&self) -> u32 {
        self.log.lock().restore_calls
    }
}

impl UiCollaborator for RecordingUi {
    fn hide_hud(&mut self) {
        let mut log = self.log.lock();
        log.hidden = true;
        log.hide_calls += 1;
    }

    fn restore_hud(&mut self) {
        let mut log = self.log.lock();
        log.hidden = false;
        log.restore_calls += 1;
    }
}

#[derive(Debug)]
struct TargetState {
    position: Vec2,
    health: HealthTracker,
    faction: Faction,
    radius: f32,
    facing: f32,
    hits: u32,
}

/// A movable, damageable stand-in for the player
#[derive(Debug, Clone)]
pub struct TestTarget {
    state: Arc<Mutex<TargetState>>,
}

impl TestTarget {
    pub fn new(position: Vec2, max_health: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(TargetState {
                position,
                health: HealthTracker::new(max_health),
                faction: Faction::Player,
                radius: 0.5,
                facing: 1.0,
                hits: 0,
            })),
        }
    }

    pub fn with_faction(self, faction: Faction) -> Self {
        self.state.lock().faction = faction;
        self
    }

    pub fn set_position(&self, position: Vec2) {
        self.state.lock().position = position;
    }

    pub fn health(&self) -> f32 {
        self.state.lock().health.current()
    }

    /// Kill the target from outside the combat world
    pub fn kill(&self) {
        self.state.lock().health.kill();
    }

    /// Number of hit reactions received
    pub fn hits(&self) -> u32 {
        self.state.lock().hits
    }

    pub fn facing(&self) -> f32 {
        self.state.lock().facing
    }
}

impl Damageable for TestTarget {
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageOutcome {
        self.state.lock().health.apply_damage(damage.amount)
    }

    fn is_alive(&self) -> bool {
        self.state.lock().health.is_alive()
    }

    fn react_to_hit(&mut self, _source: Option<u64>) {
        self.state.lock().hits += 1;
    }
}

impl Targetable for TestTarget {
    fn position(&self) -> Vec2 {
        self.state.lock().position
    }

    fn body_radius(&self) -> f32 {
        self.state.lock().radius
    }

    fn faction(&self) -> Faction {
        self.state.lock().faction
    }

    fn face_towards(&mut self, x: f32) {
        let mut state = self.state.lock();
        if x != state.position.x {
            state.facing = void_math::facing_sign(x - state.position.x);
        }
    }
}
