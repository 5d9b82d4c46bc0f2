// Events handed to the presentation sink; readings are in physical units.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepClass {
    Fast,
    Slow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DisplayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displacement_m: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_mps: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RepCompleted {
    pub peak_velocity_mps: f32,
    pub classification: RepClass,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputEvent {
    DisplayUpdate(DisplayUpdate),
    RepCompleted(RepCompleted),
}
