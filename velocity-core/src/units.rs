// Raw sensor units to physical units.

#[derive(Clone, Copy, Debug)]
pub struct UnitConverter {
    meters_per_unit: f32,
}

impl UnitConverter {
    pub fn new(meters_per_unit: f32) -> Self {
        Self { meters_per_unit }
    }

    pub fn to_meters(&self, raw: f32) -> f32 {
        raw * self.meters_per_unit
    }

    pub fn convert(&self, raw: Option<f32>) -> Option<f32> {
        raw.map(|value| self.to_meters(value))
    }
}
